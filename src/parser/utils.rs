use nom::{error::ParseError, IResult, Parser};

/// Prevent a `cut` parser from poisoning an outer `alt` branch
///
/// A `cut()` applied to a sub-parser turns a recoverable `nom::Err::Error` into an
/// unrecoverable `nom::Err::Failure`, which `alt` will propagate instead of trying the next
/// branch. Wrapping the whole thing in `uncut` demotes a `Failure` back down to an `Error` so
/// `alt` can still try sibling branches, while letting any genuine, non-`cut`-produced failure
/// through unchanged.
pub(crate) fn uncut<I, O, E: ParseError<I>, F: Parser<I, O, E>>(
    mut parser: F,
) -> impl FnMut(I) -> IResult<I, O, E> {
    move |input: I| match parser.parse(input) {
        Err(nom::Err::Failure(e)) => Err(nom::Err::Error(e)),
        rest => rest,
    }
}
