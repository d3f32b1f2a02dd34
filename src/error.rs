use thiserror::Error;

use crate::parse::ParseError;
use crate::RegistryError;

/// Unified error type for configuring rule maps from text.
///
/// Returned by [`RuleMap::apply_dsl()`](crate::RuleMap::apply_dsl). Rule
/// compilation errors are never wrapped here: they are the rule's own
/// [`Rule::Error`](crate::Rule::Error) and reach the caller unmodified.
#[derive(Debug, Error)]
pub enum RuleMapError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unknown rule '{name}'")]
    UnknownRule { name: String },
}
