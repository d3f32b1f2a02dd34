use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;

use super::outcome::Outcome;
use super::rule::RuleOrder;

/// Sparse rule → outcome mapping holding only non-neutral overrides.
///
/// A rule absent from the set is [`Outcome::Neutral`]. Setting a rule to
/// `Neutral` removes its entry, so iteration only ever visits real overrides.
#[derive(Debug, Clone)]
pub struct OverrideSet<R> {
    entries: HashMap<R, Override>,
    next_seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct Override {
    outcome: Outcome,
    /// Insertion sequence, the tie-break for rules the order ranks equal.
    seq: u64,
}

impl<R> OverrideSet<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Number of rules currently overridden.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over every override. Order is unspecified; use
    /// [`sorted`](Self::sorted) for a deterministic sequence.
    pub fn iter(&self) -> impl Iterator<Item = (&R, Outcome)> {
        self.entries.iter().map(|(rule, o)| (rule, o.outcome))
    }

    /// Drop every override.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The overrides sorted by `order`, ties broken by insertion order.
    pub fn sorted<O: RuleOrder<R> + ?Sized>(&self, order: &O) -> Vec<(&R, Outcome)> {
        let mut entries: Vec<(&R, Override)> =
            self.entries.iter().map(|(rule, o)| (rule, *o)).collect();
        entries.sort_by(|(ra, a), (rb, b)| order.compare(*ra, *rb).then(a.seq.cmp(&b.seq)));
        entries
            .into_iter()
            .map(|(rule, o)| (rule, o.outcome))
            .collect()
    }
}

impl<R: Eq + Hash> OverrideSet<R> {
    /// Store `outcome` for `rule`, returning whether the effective value
    /// changed.
    ///
    /// `Neutral` removes the override. Re-setting the current value,
    /// including `Neutral` on a rule with no override, changes nothing and
    /// returns `false`.
    pub fn set(&mut self, rule: R, outcome: Outcome) -> bool {
        if outcome.is_neutral() {
            return self.entries.remove(&rule).is_some();
        }

        match self.entries.entry(rule) {
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                if current.outcome == outcome {
                    false
                } else {
                    current.outcome = outcome;
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(Override {
                    outcome,
                    seq: self.next_seq,
                });
                self.next_seq += 1;
                true
            }
        }
    }

    /// The effective outcome for `rule`; `Neutral` when not overridden.
    #[must_use]
    pub fn test(&self, rule: &R) -> Outcome {
        self.get(rule).unwrap_or_default()
    }

    /// The stored override for `rule`, if any. Never returns `Some(Neutral)`.
    #[must_use]
    pub fn get(&self, rule: &R) -> Option<Outcome> {
        self.entries.get(rule).map(|o| o.outcome)
    }

    #[must_use]
    pub fn contains(&self, rule: &R) -> bool {
        self.entries.contains_key(rule)
    }
}

impl<R> Default for OverrideSet<R> {
    fn default() -> Self {
        Self::new()
    }
}
