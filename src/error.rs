//! Error type for JSONPath query string parsing errors
use nom::error::{VerboseError, VerboseErrorKind};

/// An error produced while parsing a JSONPath query string
///
/// This is deliberately opaque: the grammar in [`crate::parser`] is recursive-descent over
/// `nom` combinators, and the precise shape of a `nom::error::VerboseError` is an internal
/// implementation detail that is not meant to be matched on by callers. Instead, this exposes
/// the byte offset into the original query string where parsing gave up, and a human-readable
/// message describing what was expected there.
#[derive(Debug, thiserror::Error)]
#[error("{err}")]
pub struct ParseError {
    err: Box<ErrorImpl>,
}

impl ParseError {
    /// Get the byte offset into the query string where parsing failed
    pub fn position(&self) -> usize {
        self.err.position
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.err.message
    }
}

#[derive(Debug, thiserror::Error)]
#[error("at position {position}, {message}")]
struct ErrorImpl {
    position: usize,
    message: Box<str>,
}

/// Compute the byte offset of a remaining-input slice relative to the original input.
///
/// This relies on `remaining` being a suffix of `original`'s underlying buffer, which always
/// holds for `nom`'s `&str` inputs since every combinator narrows the slice without copying.
fn offset_of(original: &str, remaining: &str) -> usize {
    let start = original.as_ptr() as usize;
    let end = remaining.as_ptr() as usize;
    if end >= start && end <= start + original.len() {
        end - start
    } else {
        original.len()
    }
}

fn describe(kind: &VerboseErrorKind) -> String {
    match kind {
        VerboseErrorKind::Context(ctx) => ctx.to_string(),
        VerboseErrorKind::Char(c) => format!("expected '{c}'"),
        VerboseErrorKind::Nom(kind) => format!("{kind:?}"),
    }
}

impl<'a> From<(&'a str, VerboseError<&'a str>)> for ParseError {
    fn from((input, err): (&'a str, VerboseError<&'a str>)) -> Self {
        #[cfg(feature = "trace")]
        tracing::trace!(%input, parser_error = ?err);
        let position = err
            .errors
            .iter()
            .map(|(remaining, _)| offset_of(input, remaining))
            .max()
            .unwrap_or(0);
        let message = err
            .errors
            .iter()
            .map(|(_, kind)| describe(kind))
            .collect::<Vec<_>>()
            .join(", or ");
        let message = if message.is_empty() {
            "invalid JSONPath query".to_owned()
        } else {
            format!("expected {message}")
        };
        Self {
            err: Box::new(ErrorImpl {
                position,
                message: message.into(),
            }),
        }
    }
}
