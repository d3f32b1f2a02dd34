use crate::Outcome;

/// One `rule = outcome` declaration, with the rule still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideDecl {
    pub rule: String,
    pub outcome: Outcome,
}

/// The result of parsing override declarations, in source order.
#[derive(Debug, Default)]
pub struct ParsedOverrides {
    pub overrides: Vec<OverrideDecl>,
}
