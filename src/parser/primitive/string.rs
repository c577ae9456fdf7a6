//! String literal lexing, shared by the JSON literal dialect and the JSONPath quoted-name/string
//! dialect.
//!
//! Both dialects use the same escape set (`" \ / b f n r t uXXXX`), the same four-hex-digit
//! `\uXXXX` form with surrogate-pair combination for code points above `U+FFFF`, and both reject
//! raw (unescaped) control characters below `U+0020`. They differ only in which quote character
//! delimits the literal and which quote character may be escaped inside it: `\'` is only valid
//! inside a single-quoted literal, `\"` only inside a double-quoted one.
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::char;
use nom::{
    branch::alt,
    combinator::{map, map_opt, map_res, opt, value},
    multi::fold_many0,
    sequence::{preceded, tuple},
};

use crate::parser::PResult;

fn parse_hex4(input: &str) -> PResult<u16> {
    map_res(
        take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        |hex| u16::from_str_radix(hex, 16),
    )(input)
}

fn parse_unicode_escape(input: &str) -> PResult<u16> {
    preceded(char('u'), parse_hex4)(input)
}

fn is_high_surrogate(u: u16) -> bool {
    (0xD800..=0xDBFF).contains(&u)
}

fn is_low_surrogate(u: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&u)
}

fn combine_surrogate_pair(high: u16, low: u16) -> u32 {
    0x10000 + ((high as u32 - 0xD800) << 10) + (low as u32 - 0xDC00)
}

/// Parse a `\uXXXX` escape, combining a high/low surrogate pair into a single code point, and
/// rejecting an unpaired surrogate half.
fn parse_unicode(input: &str) -> PResult<char> {
    let (rest, first) = parse_unicode_escape(input)?;
    if is_high_surrogate(first) {
        map_opt(
            opt(preceded(tuple((char('\\'), char('u'))), parse_hex4)),
            move |low| match low {
                Some(low) if is_low_surrogate(low) => {
                    char::from_u32(combine_surrogate_pair(first, low))
                }
                _ => None,
            },
        )(rest)
    } else if is_low_surrogate(first) {
        // A lone low surrogate is never a valid scalar value.
        Err(nom::Err::Error(nom::error::make_error(
            input,
            nom::error::ErrorKind::MapOpt,
        )))
    } else {
        match char::from_u32(first as u32) {
            Some(c) => Ok((rest, c)),
            None => Err(nom::Err::Error(nom::error::make_error(
                input,
                nom::error::ErrorKind::MapOpt,
            ))),
        }
    }
}

#[derive(Copy, Clone)]
enum Quotes {
    Single,
    Double,
}

fn parse_escaped_quote(quoted_with: Quotes) -> impl Fn(&str) -> PResult<char> {
    move |input: &str| match quoted_with {
        Quotes::Single => value('\u{0027}', char('\''))(input),
        Quotes::Double => value('\u{0022}', char('"'))(input),
    }
}

fn parse_escaped_char(quoted_with: Quotes) -> impl Fn(&str) -> PResult<char> {
    move |input: &str| {
        preceded(
            char('\\'),
            alt((
                parse_unicode,
                value('\u{0008}', char('b')),
                value('\u{0009}', char('t')),
                value('\u{000A}', char('n')),
                value('\u{000C}', char('f')),
                value('\u{000D}', char('r')),
                value('\u{002F}', char('/')),
                value('\u{005C}', char('\\')),
                parse_escaped_quote(quoted_with),
            )),
        )(input)
    }
}

/// A run of unescaped characters, none of which is the delimiting quote, a backslash, or a raw
/// control character below `U+0020`.
fn parse_literal(quoted_with: Quotes) -> impl Fn(&str) -> PResult<&str> {
    move |input: &str| {
        let end = input
            .char_indices()
            .find(|(_, c)| {
                *c == '\\'
                    || *c < '\u{0020}'
                    || matches!(
                        (quoted_with, c),
                        (Quotes::Single, '\'') | (Quotes::Double, '"')
                    )
            })
            .map(|(i, _)| i)
            .unwrap_or(input.len());
        if end == 0 {
            Err(nom::Err::Error(nom::error::make_error(
                input,
                nom::error::ErrorKind::TakeTill1,
            )))
        } else {
            Ok((&input[end..], &input[..end]))
        }
    }
}

enum StringFragment<'a> {
    Literal(&'a str),
    EscapedChar(char),
}

fn parse_fragment(quoted_with: Quotes) -> impl Fn(&str) -> PResult<StringFragment<'_>> {
    move |input: &str| {
        alt((
            map(parse_literal(quoted_with), StringFragment::Literal),
            map(parse_escaped_char(quoted_with), StringFragment::EscapedChar),
        ))(input)
    }
}

fn parse_internal(quoted_with: Quotes) -> impl Fn(&str) -> PResult<String> {
    move |input: &str| {
        fold_many0(
            parse_fragment(quoted_with),
            String::new,
            |mut string, fragment| {
                match fragment {
                    StringFragment::Literal(s) => string.push_str(s),
                    StringFragment::EscapedChar(c) => string.push(c),
                }
                string
            },
        )(input)
    }
}

fn parse_single_quoted(input: &str) -> PResult<String> {
    nom::sequence::delimited(char('\''), parse_internal(Quotes::Single), char('\''))(input)
}

fn parse_double_quoted(input: &str) -> PResult<String> {
    nom::sequence::delimited(char('"'), parse_internal(Quotes::Double), char('"'))(input)
}

/// Parse a JSONPath string literal: either single- or double-quoted, with `\'` only valid in the
/// former and `\"` only in the latter.
pub fn parse_string_literal(input: &str) -> PResult<String> {
    alt((parse_single_quoted, parse_double_quoted))(input)
}

#[cfg(test)]
mod tests {
    use super::parse_string_literal;

    #[test]
    fn valid_double_quoted_selectors() {
        assert_eq!(
            parse_string_literal("\"test\""),
            Ok(("", String::from("test")))
        );
        assert_eq!(
            parse_string_literal("\"test\\ntest\""),
            Ok(("", String::from("test\ntest")))
        );
        assert_eq!(
            parse_string_literal("\"test\\\"\""),
            Ok(("", String::from("test\"")))
        );
        assert_eq!(
            parse_string_literal("\"tes't\""),
            Ok(("", String::from("tes't")))
        );
    }

    #[test]
    fn valid_single_quoted_selectors() {
        assert_eq!(
            parse_string_literal("'test'"),
            Ok(("", String::from("test")))
        );
        assert_eq!(
            parse_string_literal(r#"'te"st'"#),
            Ok(("", String::from("te\"st")))
        );
        assert_eq!(
            parse_string_literal(r#"'te\'st'"#),
            Ok(("", String::from("te'st")))
        );
    }

    #[test]
    fn rejects_raw_control_char() {
        assert!(parse_string_literal("\"a\u{0001}b\"").is_err());
    }

    #[test]
    fn four_digit_unicode_escape() {
        assert_eq!(
            parse_string_literal("\"\\u00e9\""),
            Ok(("", String::from("é")))
        );
    }

    #[test]
    fn surrogate_pair_combination() {
        // U+1F600 GRINNING FACE, encoded as a UTF-16 surrogate pair.
        assert_eq!(
            parse_string_literal("\"\\ud83d\\ude00\""),
            Ok(("", String::from('\u{1F600}')))
        );
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        assert!(parse_string_literal("\"\\ud83d\"").is_err());
    }
}
