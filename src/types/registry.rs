use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::error::RegistryError;
use super::rule::RuleOrder;

/// Builder for a [`RuleRegistry`].
///
/// # Example
///
/// ```
/// use rulemap::{RuleOrder, RuleRegistryBuilder};
/// use std::cmp::Ordering;
///
/// let registry = RuleRegistryBuilder::new()
///     .rule("pvp", 1_u32, 10)
///     .rule("hunger", 2_u32, 0)
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.get("pvp"), Some(&1));
/// // Lower priority numbers come first.
/// assert_eq!(registry.compare(&2, &1), Ordering::Less);
/// ```
#[derive(Debug)]
pub struct RuleRegistryBuilder<R> {
    rules: Vec<(String, R, u32)>,
}

impl<R> RuleRegistryBuilder<R> {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register `rule` under `name`. Lower priority numbers are ordered first;
    /// equal priorities keep registration order.
    #[must_use]
    pub fn rule(mut self, name: &str, rule: R, priority: u32) -> Self {
        self.rules.push((name.to_owned(), rule, priority));
        self
    }
}

impl<R: Clone + Eq + Hash> RuleRegistryBuilder<R> {
    /// Validate the registrations and build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a name is used twice or the same rule is
    /// registered under two names.
    pub fn build(self) -> Result<RuleRegistry<R>, RegistryError> {
        let mut by_name = HashMap::with_capacity(self.rules.len());
        let mut entries: HashMap<R, Registered> = HashMap::with_capacity(self.rules.len());

        for (index, (name, rule, priority)) in self.rules.into_iter().enumerate() {
            if by_name.contains_key(&name) {
                return Err(RegistryError::DuplicateName { name });
            }
            if let Some(existing) = entries.get(&rule) {
                return Err(RegistryError::DuplicateRule {
                    name,
                    existing: existing.name.clone(),
                });
            }
            by_name.insert(name.clone(), rule.clone());
            entries.insert(
                rule,
                Registered {
                    name,
                    priority,
                    index,
                },
            );
        }

        Ok(RuleRegistry { by_name, entries })
    }
}

impl<R> Default for RuleRegistryBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// The universe of known rules: name lookup plus the global order rules are
/// composed in.
///
/// Immutable once built; share it between rule maps with `Arc`.
#[derive(Debug, Clone)]
pub struct RuleRegistry<R> {
    by_name: HashMap<String, R>,
    entries: HashMap<R, Registered>,
}

#[derive(Debug, Clone)]
struct Registered {
    name: String,
    priority: u32,
    index: usize,
}

impl Registered {
    fn rank(&self) -> (u32, usize) {
        (self.priority, self.index)
    }
}

impl<R: Eq + Hash> RuleRegistry<R> {
    /// Look up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&R> {
        self.by_name.get(name)
    }

    #[must_use]
    pub fn name_of(&self, rule: &R) -> Option<&str> {
        self.entries.get(rule).map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn priority_of(&self, rule: &R) -> Option<u32> {
        self.entries.get(rule).map(|e| e.priority)
    }

    #[must_use]
    pub fn contains(&self, rule: &R) -> bool {
        self.entries.contains_key(rule)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered `(name, rule)` pairs in registry order.
    #[must_use]
    pub fn ordered(&self) -> Vec<(&str, &R)> {
        let mut rules: Vec<(&R, &Registered)> = self.entries.iter().collect();
        rules.sort_by_key(|(_, e)| e.rank());
        rules
            .into_iter()
            .map(|(rule, e)| (e.name.as_str(), rule))
            .collect()
    }
}

/// Registered rules order by `(priority, registration index)`. Rules the
/// registry does not know sort after every registered rule and compare equal
/// to each other.
impl<R: Eq + Hash> RuleOrder<R> for RuleRegistry<R> {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        match (self.entries.get(a), self.entries.get(b)) {
            (Some(a), Some(b)) => a.rank().cmp(&b.rank()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<R> fmt::Display for RuleRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleRegistry({} rules)", self.entries.len())
    }
}
