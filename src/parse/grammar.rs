use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, eof, opt, preceded, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::Outcome;

use super::parser::{OverrideDecl, ParsedOverrides};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_char),
    )
        .take()
        .parse_next(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == ':'
}

// -- Outcomes ---------------------------------------------------------------

fn outcome(input: &mut &str) -> ModalResult<Outcome> {
    // Same word class as an identifier tail, so `allow_fly` is one bad word.
    take_while(1.., is_ident_char)
        .verify_map(|word: &str| {
            if word.eq_ignore_ascii_case("allow") {
                Some(Outcome::Allow)
            } else if word.eq_ignore_ascii_case("deny") {
                Some(Outcome::Deny)
            } else if word.eq_ignore_ascii_case("neutral") || word.eq_ignore_ascii_case("pass") {
                Some(Outcome::Neutral)
            } else {
                None
            }
        })
        .context(StrContext::Expected(StrContextValue::StringLiteral("allow")))
        .context(StrContext::Expected(StrContextValue::StringLiteral("deny")))
        .context(StrContext::Expected(StrContextValue::StringLiteral("neutral")))
        .parse_next(input)
}

// -- Declarations -----------------------------------------------------------

fn declaration(input: &mut &str) -> ModalResult<OverrideDecl> {
    ws.parse_next(input)?;
    let rule = ident.parse_next(input)?;

    ws.parse_next(input)?;
    cut_err('=')
        .context(StrContext::Expected(StrContextValue::CharLiteral('=')))
        .parse_next(input)?;

    ws.parse_next(input)?;
    let outcome = cut_err(outcome).parse_next(input)?;

    let _ = opt(preceded(ws, ';')).parse_next(input)?;

    Ok(OverrideDecl {
        rule: rule.to_owned(),
        outcome,
    })
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_overrides(input: &mut &str) -> ModalResult<ParsedOverrides> {
    let overrides: Vec<OverrideDecl> = repeat(0.., declaration).parse_next(input)?;
    ws.parse_next(input)?;
    eof.context(StrContext::Expected(StrContextValue::Description(
        "declaration",
    )))
    .parse_next(input)?;
    Ok(ParsedOverrides { overrides })
}
