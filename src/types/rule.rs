use std::cmp::Ordering;
use std::hash::Hash;
use std::sync::Arc;

use super::listeners::ListenerTableBuilder;
use super::outcome::Outcome;

/// A governable behavior that knows how to enforce itself.
///
/// Each rule decides which listeners an active override contributes. The
/// compiler calls [`contribute_listeners`](Rule::contribute_listeners) once
/// per overridden rule, in [`RuleOrder`] order, so adding a new kind of rule
/// never requires touching the compiler.
///
/// # Example
///
/// ```
/// use rulemap::{ListenerTableBuilder, Outcome, Rule, RuleMap};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// enum GameRule {
///     Pvp,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Event {
///     Attack,
/// }
///
/// impl Rule for GameRule {
///     type Event = Event;
///     type Invoker = &'static str;
///     type Error = std::convert::Infallible;
///
///     fn contribute_listeners(
///         &self,
///         listeners: &mut ListenerTableBuilder<Event, &'static str>,
///         outcome: Outcome,
///     ) -> Result<(), Self::Error> {
///         if outcome.is_deny() {
///             listeners.listen(Event::Attack, "cancel_attack");
///         }
///         Ok(())
///     }
/// }
///
/// let mut rules = RuleMap::new();
/// rules.set(GameRule::Pvp, Outcome::Deny);
/// assert_eq!(rules.invokers_for(&Event::Attack).unwrap(), Some(&["cancel_attack"][..]));
/// ```
pub trait Rule: Eq + Hash {
    /// The event type listeners are keyed by.
    type Event: Eq + Hash;
    /// The handle stored for each registered listener.
    type Invoker;
    /// Error raised while registering listeners.
    type Error;

    /// Register the listeners that enforce `outcome` for this rule.
    ///
    /// `outcome` is never [`Outcome::Neutral`]: neutral rules carry no
    /// override and are skipped during compilation.
    ///
    /// # Errors
    ///
    /// Any error returned here aborts compilation and is handed back to the
    /// caller that triggered it.
    fn contribute_listeners(
        &self,
        listeners: &mut ListenerTableBuilder<Self::Event, Self::Invoker>,
        outcome: Outcome,
    ) -> Result<(), Self::Error>;
}

/// A total order over rule keys, used to compose contributions from several
/// rules into one deterministic listener sequence.
pub trait RuleOrder<R: ?Sized> {
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

/// Orders rules by their own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<R: Ord + ?Sized> RuleOrder<R> for NaturalOrder {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        a.cmp(b)
    }
}

/// Orders rules with a comparison function.
///
/// ```
/// use rulemap::{OrderBy, RuleOrder};
/// use std::cmp::Ordering;
///
/// let reversed = OrderBy::new(|a: &u32, b: &u32| b.cmp(a));
/// assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrderBy<F>(F);

impl<F> OrderBy<F> {
    pub fn new(compare: F) -> Self {
        Self(compare)
    }
}

impl<R: ?Sized, F> RuleOrder<R> for OrderBy<F>
where
    F: Fn(&R, &R) -> Ordering,
{
    fn compare(&self, a: &R, b: &R) -> Ordering {
        (self.0)(a, b)
    }
}

impl<R: ?Sized, T: RuleOrder<R> + ?Sized> RuleOrder<R> for &T {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        (**self).compare(a, b)
    }
}

impl<R: ?Sized, T: RuleOrder<R> + ?Sized> RuleOrder<R> for Arc<T> {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        (**self).compare(a, b)
    }
}
