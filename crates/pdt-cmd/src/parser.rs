//! Command parser using nom
//!
//! Parses precision drawing commands into structured `ParsedCommand` values.
//!
//! # Syntax
//!
//! ```text
//! <opcode><mode><value>[,<value>...]
//! ```
//!
//! - `opcode`: one of `C D E G N P S V`
//! - `mode`: one of `A D I P`
//! - values: comma-separated decimal numbers
//!
//! Letters are case-insensitive and whitespace around values is ignored, so
//! `ca 1, 2, 3` and `CA1,2,3` are the same command.

use nom::{
    bytes::complete::take_till,
    character::complete::{anychar, char},
    multi::separated_list0,
    sequence::pair,
    IResult,
};

use crate::args::{Mode, Opcode, ParsedCommand};
use crate::error::ParseError;

/// How unparsable values are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberPolicy {
    /// Unparsable values read as `0.0`
    #[default]
    Lenient,
    /// Unparsable values are an error
    Strict,
}

impl NumberPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            NumberPolicy::Strict
        } else {
            NumberPolicy::Lenient
        }
    }
}

/// Opcode and mode letters
fn header(input: &str) -> IResult<&str, (char, char)> {
    pair(anychar, anychar)(input)
}

/// Raw comma-separated value tokens
fn value_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), take_till(|c| c == ','))(input)
}

fn parse_value(token: &str, policy: NumberPolicy) -> Result<f64, ParseError> {
    let token = token.trim();
    match (token.parse::<f64>(), policy) {
        (Ok(value), _) => Ok(value),
        (Err(_), NumberPolicy::Lenient) => {
            log::debug!("Reading unparsable value '{}' as 0", token);
            Ok(0.0)
        }
        (Err(_), NumberPolicy::Strict) => Err(ParseError::InvalidNumber(token.to_string())),
    }
}

/// Parse a single command
///
/// The length check counts the raw input, so `"CA "` parses to a command
/// with one empty value and fails the argument count later. Surrounding
/// whitespace is dropped before the letters are read. The argument count is
/// left for the dispatcher to check.
///
/// # Example
/// ```
/// use pdt_cmd::{parse_command, Mode, NumberPolicy, Opcode};
///
/// let cmd = parse_command("ca1,2,3", NumberPolicy::Lenient).unwrap();
/// assert_eq!(cmd.opcode, Opcode::Cursor);
/// assert_eq!(cmd.mode, Mode::Absolute);
/// assert_eq!(cmd.args, vec![1.0, 2.0, 3.0]);
/// ```
pub fn parse_command(input: &str, policy: NumberPolicy) -> Result<ParsedCommand, ParseError> {
    if input.chars().count() < 3 {
        return Err(ParseError::TooShort);
    }
    let input = input.trim();
    if input.chars().count() < 2 {
        return Err(ParseError::TooShort);
    }

    let (rest, (op, mode)) = header(input)?;
    let opcode = Opcode::from_char(op).ok_or(ParseError::InvalidOpcode(op))?;
    let mode = Mode::from_char(mode).ok_or(ParseError::InvalidMode(mode))?;

    let (_, tokens) = value_tokens(rest)?;
    let args = tokens
        .into_iter()
        .map(|t| parse_value(t, policy))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedCommand { opcode, mode, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(input: &str) -> Result<ParsedCommand, ParseError> {
        parse_command(input, NumberPolicy::Lenient)
    }

    #[test]
    fn test_absolute_cursor() {
        let cmd = lenient("CA1,2,3").unwrap();
        assert_eq!(cmd.opcode, Opcode::Cursor);
        assert_eq!(cmd.mode, Mode::Absolute);
        assert_eq!(cmd.args, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_case_and_whitespace() {
        let cmd = lenient("  gd 0.5 , -1 ,2e1 ").unwrap();
        assert_eq!(cmd.opcode, Opcode::Move);
        assert_eq!(cmd.mode, Mode::Delta);
        assert_eq!(cmd.args, vec![0.5, -1.0, 20.0]);
    }

    #[test]
    fn test_every_opcode_letter() {
        for (letter, op) in [
            ('c', Opcode::Cursor),
            ('d', Opcode::Duplicate),
            ('e', Opcode::ExtrudeGeometry),
            ('g', Opcode::Move),
            ('n', Opcode::NewVertex),
            ('p', Opcode::Pivot),
            ('s', Opcode::SplitEdge),
            ('v', Opcode::ExtrudeVertex),
        ] {
            let cmd = lenient(&format!("{}i5,45", letter)).unwrap();
            assert_eq!(cmd.opcode, op);
            assert_eq!(cmd.mode, Mode::Polar);
        }
    }

    #[test]
    fn test_too_short() {
        assert_eq!(lenient("CA"), Err(ParseError::TooShort));
        assert_eq!(lenient(""), Err(ParseError::TooShort));
        assert_eq!(lenient("  C  "), Err(ParseError::TooShort));
    }

    #[test]
    fn test_trailing_space_counts_toward_length() {
        let cmd = lenient("CA ").unwrap();
        assert_eq!(cmd.opcode, Opcode::Cursor);
        assert_eq!(cmd.args, vec![0.0]);
        assert_eq!(cmd.arg_count(), 1);
    }

    #[test]
    fn test_invalid_letters() {
        assert_eq!(lenient("XA1,2,3"), Err(ParseError::InvalidOpcode('X')));
        assert_eq!(lenient("CX1,2,3"), Err(ParseError::InvalidMode('X')));
    }

    #[test]
    fn test_lenient_numbers() {
        let cmd = lenient("CAfoo,2,").unwrap();
        assert_eq!(cmd.args, vec![0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_strict_numbers() {
        assert_eq!(
            parse_command("CAfoo,2,3", NumberPolicy::Strict),
            Err(ParseError::InvalidNumber("foo".to_string()))
        );
        assert!(parse_command("CA1,2,3", NumberPolicy::Strict).is_ok());
    }

    #[test]
    fn test_count_not_checked() {
        let cmd = lenient("CA1,2").unwrap();
        assert_eq!(cmd.args.len(), 2);
        let cmd = lenient("NP50,1,2,3").unwrap();
        assert_eq!(cmd.args.len(), 4);
    }

    #[test]
    fn test_multibyte_input() {
        assert_eq!(lenient("é1,2"), Err(ParseError::InvalidOpcode('é')));
    }
}
