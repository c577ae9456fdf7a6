//! Types representing the JSONPath query language (RFC 9535)
//!
//! This module holds the compiled query representation — the typed AST produced by
//! [`crate::parser`] — along with the [`query::Queryable`] trait that evaluates it against a
//! [`serde_json::Value`]. Nothing in this module parses text; it only defines what a query *is*
//! and what evaluating one *means*.
pub mod functions;
pub mod integer;
pub mod query;
pub mod segment;
pub mod selector;
