//! A recursive-descent parser, built on [`nom`], that turns a JSONPath query string into a
//! [`crate::spec::query::Query`]
//!
//! Static well-formedness (singular-query requirements, function arity/kind, `!` applicability)
//! is checked as part of parsing: see [`selector::filter`] and [`selector::function`].
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::error::VerboseError;
use nom::{branch::alt, combinator::map, multi::many0, sequence::preceded, IResult};

use crate::spec::query::{Query, QueryKind};
use crate::spec::segment::QuerySegment;

use self::segment::parse_segment;

pub(crate) mod primitive;
mod segment;
pub(crate) mod selector;
pub(crate) mod utils;

pub(crate) type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_query_segments(input: &str) -> PResult<Vec<QuerySegment>> {
    many0(parse_segment)(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_root_query(input: &str) -> PResult<Query> {
    map(preceded(char('$'), parse_query_segments), |segments| Query {
        kind: QueryKind::Root,
        segments,
    })(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_current_query(input: &str) -> PResult<Query> {
    map(preceded(char('@'), parse_query_segments), |segments| Query {
        kind: QueryKind::Current,
        segments,
    })(input)
}

/// Parse a query embedded within another construct, e.g. a filter expression — `$...` or `@...`
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub(crate) fn parse_query(input: &str) -> PResult<Query> {
    alt((parse_root_query, parse_current_query))(input)
}

/// Parse a complete JSONPath query string, requiring it to start with `$` and leave no trailing
/// input
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub fn parse_query_main(input: &str) -> PResult<Query> {
    all_consuming(parse_root_query)(input)
}

#[cfg(test)]
mod tests {
    use crate::spec::{
        query::QueryKind,
        segment::Segment,
        selector::{name::Name, Selector},
    };

    use super::{parse_query, parse_query_main};

    #[test]
    fn root_path() {
        {
            let (_, p) = parse_query("$").unwrap();
            assert!(matches!(p.kind, QueryKind::Root));
        }
        {
            let (_, p) = parse_query("$.name").unwrap();
            assert_eq!(p.segments[0].segment.as_dot_name().unwrap(), "name");
        }
        {
            let (_, p) = parse_query("$.names['first_name']..*").unwrap();
            assert_eq!(p.segments[0].segment.as_dot_name().unwrap(), "names");
            let clh = p.segments[1].segment.as_long_hand().unwrap();
            assert!(matches!(&clh[0], Selector::Name(Name(s)) if s == "first_name"));
            assert!(matches!(p.segments[2].segment, Segment::Wildcard));
        }
    }

    #[test]
    fn current_path() {
        let (_, p) = parse_query("@").unwrap();
        assert!(matches!(p.kind, QueryKind::Current));
    }

    #[test]
    fn no_tail() {
        assert!(parse_query_main("$.a['b']tail").is_err());
    }

    #[test]
    fn requires_leading_dollar() {
        assert!(parse_query_main("foo.bar").is_err());
        assert!(parse_query_main("@.bar").is_err());
    }
}
