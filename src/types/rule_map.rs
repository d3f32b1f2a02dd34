use std::fmt;

use tracing::{debug, trace};

use super::cache::DispatchCache;
use super::listeners::ListenerTable;
use super::outcome::Outcome;
use super::overrides::OverrideSet;
use super::registry::RuleRegistry;
use super::rule::{NaturalOrder, Rule, RuleOrder};

/// Rule overrides for one scope, with a lazily compiled listener table.
///
/// [`set`](Self::set) and [`test`](Self::test) operate on the sparse
/// [`OverrideSet`]. [`invokers_for`](Self::invokers_for) reads through a
/// cached [`ListenerTable`] that is compiled on first use and dropped only
/// when an override actually changes.
///
/// All access is single-owner: reads that may compile take `&mut self`.
/// Dropping the map is its whole teardown.
///
/// # Example
///
/// ```
/// use rulemap::{ListenerTableBuilder, Outcome, Rule, RuleMap};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// enum GameRule {
///     Pvp,
///     Hunger,
/// }
///
/// impl Rule for GameRule {
///     type Event = &'static str;
///     type Invoker = fn() -> bool;
///     type Error = std::convert::Infallible;
///
///     fn contribute_listeners(
///         &self,
///         listeners: &mut ListenerTableBuilder<&'static str, fn() -> bool>,
///         outcome: Outcome,
///     ) -> Result<(), Self::Error> {
///         let cancel: fn() -> bool = if outcome.is_deny() { || true } else { || false };
///         match self {
///             GameRule::Pvp => listeners.listen("attack", cancel),
///             GameRule::Hunger => listeners.listen("tick", cancel),
///         };
///         Ok(())
///     }
/// }
///
/// let mut rules = RuleMap::new();
/// assert_eq!(rules.test(&GameRule::Pvp), Outcome::Neutral);
///
/// rules.set(GameRule::Pvp, Outcome::Deny);
/// let invokers = rules.invokers_for(&"attack").unwrap().unwrap();
/// assert!(invokers.iter().all(|cancel| cancel()));
///
/// rules.set(GameRule::Pvp, Outcome::Neutral);
/// assert!(rules.invokers_for(&"attack").unwrap().is_none());
/// ```
pub struct RuleMap<R: Rule, O = NaturalOrder> {
    overrides: OverrideSet<R>,
    cache: DispatchCache<R::Event, R::Invoker>,
    order: O,
}

impl<R: Rule + Ord> RuleMap<R> {
    /// An empty map composing rules in their natural [`Ord`] order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new()
    }
}

impl<R: Rule + Ord> Default for RuleMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rule, O: RuleOrder<R>> RuleMap<R, O> {
    /// An empty map composing rules in `order`.
    #[must_use]
    pub fn with_order(order: O) -> Self {
        Self {
            overrides: OverrideSet::new(),
            cache: DispatchCache::new(),
            order,
        }
    }

    /// Set the outcome for `rule`, returning whether it changed.
    ///
    /// A change drops the compiled listener table; re-setting the current
    /// value (including `Neutral` on an unset rule) keeps it.
    pub fn set(&mut self, rule: R, outcome: Outcome) -> bool {
        if self.overrides.set(rule, outcome) {
            let dropped = self.cache.invalidate();
            trace!(%outcome, dropped, "rule override changed");
            true
        } else {
            trace!(%outcome, "rule override unchanged");
            false
        }
    }

    /// The effective outcome for `rule`. Never compiles.
    #[must_use]
    pub fn test(&self, rule: &R) -> Outcome {
        self.overrides.test(rule)
    }

    /// The listeners to dispatch for `event`, in rule order.
    ///
    /// Returns `Ok(None)` when no active override listens to `event`.
    ///
    /// # Errors
    ///
    /// Returns the rule's error if compiling the listener table fails; the
    /// table stays uncompiled and the next call tries again.
    pub fn invokers_for(&mut self, event: &R::Event) -> Result<Option<&[R::Invoker]>, R::Error> {
        Ok(self.listeners()?.invokers(event))
    }

    /// The full compiled listener table, compiling it if needed.
    ///
    /// # Errors
    ///
    /// Returns the rule's error if compilation fails.
    pub fn listeners(&mut self) -> Result<&ListenerTable<R::Event, R::Invoker>, R::Error> {
        self.cache.get_or_try_compile(|| {
            crate::compile::compile(&self.overrides, &self.order).inspect_err(|_| {
                debug!(
                    overrides = self.overrides.len(),
                    "listener compilation failed; table left uncompiled"
                );
            })
        })
    }

    /// Apply every `(rule, outcome)` pair in order, returning how many
    /// changed a stored value.
    ///
    /// The count is per pair, not net: `[(r, Deny), (r, Neutral)]` counts 2
    /// and drops the compiled table even though `r` ends where it started.
    pub fn apply(&mut self, overrides: impl IntoIterator<Item = (R, Outcome)>) -> usize {
        let mut changed = 0;
        for (rule, outcome) in overrides {
            if self.set(rule, outcome) {
                changed += 1;
            }
        }
        changed
    }

    /// Remove every override.
    pub fn clear(&mut self) {
        if !self.overrides.is_empty() {
            self.overrides.clear();
            self.cache.invalidate();
        }
    }

    /// The current overrides.
    #[must_use]
    pub fn overrides(&self) -> &OverrideSet<R> {
        &self.overrides
    }

    /// Whether a compiled listener table is currently cached.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.cache.is_valid()
    }

    /// The cached listener table, without compiling.
    #[must_use]
    pub fn compiled(&self) -> Option<&ListenerTable<R::Event, R::Invoker>> {
        self.cache.table()
    }

    /// Number of times the listener table has been compiled.
    #[must_use]
    pub fn compilations(&self) -> u64 {
        self.cache.compilations()
    }

    #[must_use]
    pub fn order(&self) -> &O {
        &self.order
    }
}

impl<R: Rule + Clone, O: RuleOrder<R>> RuleMap<R, O> {
    /// Parse override declarations and apply them, resolving rule names in
    /// `registry`.
    ///
    /// Every name is resolved before anything is applied, so an error leaves
    /// the map untouched. Returns the change count from
    /// [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// Returns [`RuleMapError`](crate::RuleMapError) on a syntax error or an
    /// unknown rule name.
    pub fn apply_dsl(
        &mut self,
        input: &str,
        registry: &RuleRegistry<R>,
    ) -> Result<usize, crate::RuleMapError> {
        let parsed = crate::parse::parse(input)?;
        let resolved = parsed
            .overrides
            .into_iter()
            .map(|decl| match registry.get(&decl.rule) {
                Some(rule) => Ok((rule.clone(), decl.outcome)),
                None => Err(crate::RuleMapError::UnknownRule { name: decl.rule }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.apply(resolved))
    }
}

impl<R: Rule, O> fmt::Debug for RuleMap<R, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleMap")
            .field("overrides", &self.overrides.len())
            .field("compiled", &self.cache.is_valid())
            .field("compilations", &self.cache.compilations())
            .finish_non_exhaustive()
    }
}

impl<R: Rule, O> fmt::Display for RuleMap<R, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.cache.is_valid() {
            "compiled"
        } else {
            "uncompiled"
        };
        write!(f, "RuleMap({} overrides, {state})", self.overrides.len())
    }
}
