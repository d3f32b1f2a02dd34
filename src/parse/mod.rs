mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::{OverrideDecl, ParsedOverrides};

/// Parse override declarations into [`ParsedOverrides`].
///
/// ```text
/// # comments run to end of line
/// pvp = deny
/// block_break = allow;
/// hunger = neutral
/// ```
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid syntax.
pub fn parse(input: &str) -> Result<ParsedOverrides, ParseError> {
    use winnow::Parser;
    grammar::parse_overrides
        .parse(input)
        .map_err(|e| ParseError::at_offset(input, e.offset(), e.inner().to_string()))
}
