use super::listeners::ListenerTable;

/// Holds at most one compiled [`ListenerTable`].
///
/// The cache is either [`CacheState::Invalid`] (never built, or dropped after
/// an override changed) or [`CacheState::Valid`]. A table is only ever stored
/// after a compilation succeeds, so a failed compilation leaves the cache
/// invalid.
pub(crate) struct DispatchCache<E, I> {
    state: CacheState<E, I>,
    compilations: u64,
}

pub(crate) enum CacheState<E, I> {
    Invalid,
    Valid(ListenerTable<E, I>),
}

impl<E, I> DispatchCache<E, I> {
    pub(crate) fn new() -> Self {
        Self {
            state: CacheState::Invalid,
            compilations: 0,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        matches!(self.state, CacheState::Valid(_))
    }

    /// Number of successful compilations over the cache's lifetime.
    pub(crate) fn compilations(&self) -> u64 {
        self.compilations
    }

    /// The cached table, without compiling.
    pub(crate) fn table(&self) -> Option<&ListenerTable<E, I>> {
        match &self.state {
            CacheState::Valid(table) => Some(table),
            CacheState::Invalid => None,
        }
    }

    /// Discard the cached table. Returns whether a table was dropped.
    pub(crate) fn invalidate(&mut self) -> bool {
        let was_valid = self.is_valid();
        self.state = CacheState::Invalid;
        was_valid
    }

    /// Return the cached table, compiling it with `compile` first if the
    /// cache is invalid.
    pub(crate) fn get_or_try_compile<Err>(
        &mut self,
        compile: impl FnOnce() -> Result<ListenerTable<E, I>, Err>,
    ) -> Result<&ListenerTable<E, I>, Err> {
        if let CacheState::Invalid = self.state {
            let table = compile()?;
            self.state = CacheState::Valid(table);
            self.compilations += 1;
        }
        match &self.state {
            CacheState::Valid(table) => Ok(table),
            CacheState::Invalid => unreachable!("dispatch cache populated above"),
        }
    }
}
