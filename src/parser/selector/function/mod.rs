use nom::character::complete::{char, satisfy, space0};
use nom::combinator::{map, map_res};
use nom::multi::{fold_many1, separated_list0};
use nom::sequence::{delimited, pair, tuple};
use nom::{branch::alt, IResult};

use crate::spec::functions::{FunctionExpr, FunctionName, FunctionValidationError, RawFunctionArg};

use super::filter::{parse_literal, Comparable};
use crate::parser::{parse_query, PResult};

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_function_name_first(input: &str) -> PResult<char> {
    satisfy(|c| c.is_ascii_lowercase())(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_function_name_char(input: &str) -> PResult<char> {
    alt((
        parse_function_name_first,
        char('_'),
        satisfy(|c| c.is_ascii_digit()),
    ))(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_function_name(input: &str) -> PResult<String> {
    map(
        pair(
            parse_function_name_first,
            fold_many1(
                parse_function_name_char,
                String::new,
                |mut string, fragment| {
                    string.push(fragment);
                    string
                },
            ),
        ),
        |(first, rest)| format!("{first}{rest}"),
    )(input)
}

/// An argument to a function call is either a literal, a query (`$...`/`@...`), or a nested
/// function call — never a comparison or logical expression directly.
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_function_argument(input: &str) -> PResult<RawFunctionArg> {
    alt((
        map(parse_literal, RawFunctionArg::Literal),
        map(parse_query, RawFunctionArg::Query),
        map(parse_function_expr, RawFunctionArg::FunctionExpr),
    ))(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub(crate) fn parse_function_expr(input: &str) -> PResult<FunctionExpr> {
    map_res(
        pair(
            parse_function_name,
            delimited(
                pair(char('('), space0),
                separated_list0(tuple((space0, char(','), space0)), parse_function_argument),
                pair(space0, char(')')),
            ),
        ),
        |(name, args)| {
            let name = FunctionName::from_str(&name)
                .ok_or_else(|| FunctionValidationError::Undefined(name.clone()))?;
            FunctionExpr::validate(name, args)
        },
    )(input)
}

/// Parse a function call validated to be `Value`-returning, for use as a [`Comparable`] operand.
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub(crate) fn parse_function_expr_comparable(input: &str) -> IResult<&str, Comparable, nom::error::VerboseError<&str>> {
    map_res(parse_function_expr, |fe| {
        use crate::spec::functions::ReturnKind;
        match fe.return_kind() {
            ReturnKind::Value => Ok(Comparable::FunctionExpr(fe)),
            ReturnKind::Logical => Err(FunctionValidationError::ValueFunctionAsTest(fe.name)),
        }
    })(input)
}

#[cfg(test)]
mod tests {
    use crate::spec::functions::FunctionName;

    use super::parse_function_expr;

    #[test]
    fn length_of_string_literal() {
        let (_, fe) = parse_function_expr("length('abc')").unwrap();
        assert_eq!(fe.name, FunctionName::Length);
        assert_eq!(fe.args.len(), 1);
    }

    #[test]
    fn count_of_query() {
        let (_, fe) = parse_function_expr("count(@.*)").unwrap();
        assert_eq!(fe.name, FunctionName::Count);
    }

    #[test]
    fn match_of_two_args() {
        let (_, fe) = parse_function_expr("match(@.a, 'a.*')").unwrap();
        assert_eq!(fe.name, FunctionName::Match);
        assert_eq!(fe.args.len(), 2);
    }

    #[test]
    fn undefined_function_is_rejected() {
        assert!(parse_function_expr("nonexistent(@.a)").is_err());
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(parse_function_expr("length(@.a, @.b)").is_err());
    }

    #[test]
    fn non_singular_value_arg_is_rejected() {
        assert!(parse_function_expr("length(@.*)").is_err());
    }
}
