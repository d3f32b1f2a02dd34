use std::fmt;

/// The effect a rule currently has.
///
/// [`Outcome::Neutral`] is the implicit default for every rule that has no
/// override. It is never stored in an [`OverrideSet`](super::OverrideSet):
/// setting a rule to `Neutral` removes its override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Outcome {
    /// No override; the rule behaves as if it were never set.
    #[default]
    Neutral,
    /// The governed behavior is forced on.
    Allow,
    /// The governed behavior is forced off.
    Deny,
}

impl Outcome {
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self == Outcome::Neutral
    }

    #[must_use]
    pub fn is_allow(self) -> bool {
        self == Outcome::Allow
    }

    #[must_use]
    pub fn is_deny(self) -> bool {
        self == Outcome::Deny
    }

    /// The lower-case keyword used by the override DSL.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Neutral => "neutral",
            Outcome::Allow => "allow",
            Outcome::Deny => "deny",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
