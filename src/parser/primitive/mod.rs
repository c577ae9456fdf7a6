use nom::{branch::alt, bytes::complete::tag, combinator::value};

use super::PResult;

pub mod int;
pub mod number;
pub mod string;

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub fn parse_null(input: &str) -> PResult<()> {
    value((), tag("null"))(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub fn parse_bool(input: &str) -> PResult<bool> {
    alt((value(true, tag("true")), value(false, tag("false"))))(input)
}
