use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A compiled, read-only mapping from event to the ordered listeners that
/// should fire for it.
///
/// Produced by compiling an [`OverrideSet`](super::OverrideSet). Listeners for
/// an event appear in the order they were registered, which is the order of
/// the contributing rules.
pub struct ListenerTable<E, I> {
    listeners: HashMap<E, Vec<I>>,
    len: usize,
}

impl<E: Eq + Hash, I> ListenerTable<E, I> {
    /// The listeners registered for `event`, in dispatch order.
    ///
    /// Returns an empty slice for events nothing listens to.
    #[must_use]
    pub fn get(&self, event: &E) -> &[I] {
        self.listeners
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Like [`get`](Self::get), but returns `None` when there is nothing to
    /// dispatch.
    #[must_use]
    pub fn invokers(&self, event: &E) -> Option<&[I]> {
        let invokers = self.get(event);
        (!invokers.is_empty()).then_some(invokers)
    }

    /// Whether at least one listener is registered for `event`.
    #[must_use]
    pub fn contains(&self, event: &E) -> bool {
        self.listeners.contains_key(event)
    }
}

impl<E, I> ListenerTable<E, I> {
    fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            len: 0,
        }
    }

    /// Total number of registered listeners across all events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct events with at least one listener.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.listeners.len()
    }

    /// Iterate over every event and its listeners. Event order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &[I])> {
        self.listeners.iter().map(|(e, l)| (e, l.as_slice()))
    }
}

impl<E, I> fmt::Debug for ListenerTable<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerTable")
            .field("events", &self.listeners.len())
            .field("listeners", &self.len)
            .finish()
    }
}

impl<E, I> fmt::Display for ListenerTable<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ListenerTable({} events, {} listeners)",
            self.listeners.len(),
            self.len
        )
    }
}

/// Accumulates listener registrations while a table is being compiled.
///
/// Rules receive a builder in [`Rule::contribute_listeners`](super::Rule::contribute_listeners)
/// and register listeners with [`listen`](Self::listen). Registrations for the
/// same event are kept in call order.
pub struct ListenerTableBuilder<E, I> {
    table: ListenerTable<E, I>,
}

impl<E: Eq + Hash, I> ListenerTableBuilder<E, I> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: ListenerTable::new(),
        }
    }

    /// Append `invoker` to the listeners of `event`.
    pub fn listen(&mut self, event: E, invoker: I) -> &mut Self {
        self.table.listeners.entry(event).or_default().push(invoker);
        self.table.len += 1;
        self
    }

    /// Number of listeners registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    #[must_use]
    pub fn build(self) -> ListenerTable<E, I> {
        self.table
    }
}

impl<E: Eq + Hash, I> Default for ListenerTableBuilder<E, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, I> fmt::Debug for ListenerTableBuilder<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerTableBuilder")
            .field("table", &self.table)
            .finish()
    }
}
