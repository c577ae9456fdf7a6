//! Function extensions in JSONPath
//!
//! The specification this crate implements closes the function-extension mechanism down to the
//! five functions the IETF draft itself defines: [`length`][length], [`count`][count],
//! [`value`][value], [`match`][match_fn] and [`search`][search]. There is no user-extensible
//! registry; a function call is resolved against [`FunctionName`] at parse time, and an unknown
//! name is a compile error (see [`crate::parser::selector::function`]).
//!
//! [length]: https://www.rfc-editor.org/rfc/rfc9535.html#section-2.4.4
//! [count]: https://www.rfc-editor.org/rfc/rfc9535.html#section-2.4.5
//! [value]: https://www.rfc-editor.org/rfc/rfc9535.html#section-2.4.8
//! [match_fn]: https://www.rfc-editor.org/rfc/rfc9535.html#section-2.4.7
//! [search]: https://www.rfc-editor.org/rfc/rfc9535.html#section-2.4.6
use regex::Regex;
use serde_json::Value;

use crate::node::NodeList;

use super::query::{Query, Queryable};
use super::selector::filter::{Literal, SingularQuery, ValueResult};

/// The name of a built-in JSONPath function
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FunctionName {
    /// `length(value)`
    Length,
    /// `count(nodes)`
    Count,
    /// `value(nodes)`
    Value,
    /// `match(string, pattern)`
    Match,
    /// `search(string, pattern)`
    Search,
}

impl FunctionName {
    /// Look up a function by its source-text name
    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "length" => Some(Self::Length),
            "count" => Some(Self::Count),
            "value" => Some(Self::Value),
            "match" => Some(Self::Match),
            "search" => Some(Self::Search),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            FunctionName::Length => "length",
            FunctionName::Count => "count",
            FunctionName::Value => "value",
            FunctionName::Match => "match",
            FunctionName::Search => "search",
        }
    }

    /// The declared parameter kinds, in order
    pub fn params(&self) -> &'static [ParamKind] {
        match self {
            FunctionName::Length => &[ParamKind::Value],
            FunctionName::Count => &[ParamKind::Nodes],
            FunctionName::Value => &[ParamKind::Nodes],
            FunctionName::Match => &[ParamKind::Value, ParamKind::Value],
            FunctionName::Search => &[ParamKind::Value, ParamKind::Value],
        }
    }

    /// The declared return kind
    pub fn return_kind(&self) -> ReturnKind {
        match self {
            FunctionName::Length | FunctionName::Count | FunctionName::Value => ReturnKind::Value,
            FunctionName::Match | FunctionName::Search => ReturnKind::Logical,
        }
    }
}

impl std::fmt::Display for FunctionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of a function parameter, per the JSONPath function type system
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParamKind {
    /// A `ValueType` parameter: a literal, singular query, or value-returning function call
    Value,
    /// A `NodesType` parameter: any query, of any cardinality
    Nodes,
    /// A `LogicalType` parameter: any filter expression
    ///
    /// No function in the fixed table above declares a parameter of this kind, but it is part of
    /// the JSONPath type system and is retained here for completeness.
    Logical,
}

/// The kind of value a function call produces
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReturnKind {
    /// A `ValueType`: usable in comparisons and as a `Value`-kind argument
    Value,
    /// A `LogicalType`: usable as a bare test item, never in a comparison
    Logical,
}

/// A single, type-checked argument to a function call
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FunctionExprArg {
    /// A literal JSON value
    Literal(Literal),
    /// A singular query, satisfying a `Value`-kind parameter
    SingularQuery(SingularQuery),
    /// A query of any cardinality, satisfying a `Nodes`-kind parameter
    FilterQuery(Query),
    /// A nested function call
    FunctionExpr(FunctionExpr),
}

impl std::fmt::Display for FunctionExprArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionExprArg::Literal(lit) => write!(f, "{lit}"),
            FunctionExprArg::SingularQuery(sq) => write!(f, "{sq}"),
            FunctionExprArg::FilterQuery(q) => write!(f, "{q}"),
            FunctionExprArg::FunctionExpr(func) => write!(f, "{func}"),
        }
    }
}

impl FunctionExprArg {
    fn evaluate_value<'b>(&self, current: &'b Value, root: &'b Value) -> ValueResult<'b> {
        match self {
            FunctionExprArg::Literal(lit) => lit.into(),
            FunctionExprArg::SingularQuery(sq) => match sq.eval_query(current, root) {
                Some(v) => ValueResult::Node(v),
                None => ValueResult::Nothing,
            },
            FunctionExprArg::FunctionExpr(func) => func.evaluate_value(current, root),
            // Not reachable: a `FilterQuery` arg only ever fills a `Nodes`-kind parameter.
            FunctionExprArg::FilterQuery(_) => ValueResult::Nothing,
        }
    }

    fn evaluate_nodes<'b>(&self, current: &'b Value, root: &'b Value) -> NodeList<'b> {
        match self {
            FunctionExprArg::FilterQuery(q) => q.query(current, root).into(),
            // Not reachable: only a `FilterQuery` arg fills a `Nodes`-kind parameter.
            _ => NodeList::default(),
        }
    }
}

/// A validated call to a built-in JSONPath function
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FunctionExpr {
    /// The function being called
    pub name: FunctionName,
    /// The arguments, already checked against the function's declared parameter kinds
    pub args: Vec<FunctionExprArg>,
}

impl std::fmt::Display for FunctionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{name}(", name = self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            write!(
                f,
                "{arg}{comma}",
                comma = if i == self.args.len() - 1 { "" } else { "," }
            )?;
        }
        write!(f, ")")
    }
}

impl FunctionExpr {
    /// The return kind this call produces, per its function's declaration
    pub fn return_kind(&self) -> ReturnKind {
        self.name.return_kind()
    }

    /// Evaluate a `Value`-returning function call
    ///
    /// # Panics
    ///
    /// Panics if `self.name.return_kind()` is not [`ReturnKind::Value`]; the parser never builds
    /// a `FunctionExpr` used in a value position unless this holds.
    #[cfg_attr(feature = "trace", tracing::instrument(name = "Evaluate Function Expr (Value)", level = "trace", parent = None, ret))]
    pub fn evaluate_value<'b>(&self, current: &'b Value, root: &'b Value) -> ValueResult<'b> {
        match self.name {
            FunctionName::Length => match self.args[0].evaluate_value(current, root).as_value() {
                Some(Value::String(s)) => ValueResult::Value(Value::from(s.len())),
                Some(Value::Array(a)) => ValueResult::Value(Value::from(a.len())),
                Some(Value::Object(o)) => ValueResult::Value(Value::from(o.len())),
                _ => ValueResult::Nothing,
            },
            FunctionName::Count => {
                let nodes = self.args[0].evaluate_nodes(current, root);
                ValueResult::Value(Value::from(nodes.len()))
            }
            FunctionName::Value => {
                let nodes = self.args[0].evaluate_nodes(current, root);
                match nodes.at_most_one() {
                    Ok(Some(v)) => ValueResult::Node(v),
                    _ => ValueResult::Nothing,
                }
            }
            FunctionName::Match | FunctionName::Search => {
                unreachable!("{} is a Logical-returning function", self.name)
            }
        }
    }

    /// Evaluate a `Logical`-returning function call
    ///
    /// # Panics
    ///
    /// Panics if `self.name.return_kind()` is not [`ReturnKind::Logical`]; the parser never
    /// builds a `FunctionExpr` used as a bare test item unless this holds.
    #[cfg_attr(feature = "trace", tracing::instrument(name = "Evaluate Function Expr (Logical)", level = "trace", parent = None, ret))]
    pub fn evaluate_logical(&self, current: &Value, root: &Value) -> bool {
        match self.name {
            FunctionName::Match => self.eval_regex(current, root, true),
            FunctionName::Search => self.eval_regex(current, root, false),
            FunctionName::Length | FunctionName::Count | FunctionName::Value => {
                unreachable!("{} is a Value-returning function", self.name)
            }
        }
    }

    fn eval_regex(&self, current: &Value, root: &Value, anchored: bool) -> bool {
        let subject = self.args[0].evaluate_value(current, root);
        let pattern = self.args[1].evaluate_value(current, root);
        let (Some(Value::String(s)), Some(Value::String(p))) =
            (subject.as_value(), pattern.as_value())
        else {
            return false;
        };
        let pattern = if anchored {
            format!("\\A(?:{p})\\z")
        } else {
            p.clone()
        };
        match Regex::new(&pattern) {
            Ok(re) => re.is_match(s),
            Err(_) => false,
        }
    }

    /// Validate a parsed, but not yet type-checked, function call against the fixed function
    /// table, producing a [`FunctionExpr`] whose arguments are proven to match their parameter
    /// kinds.
    pub fn validate(
        name: FunctionName,
        args: Vec<RawFunctionArg>,
    ) -> Result<Self, FunctionValidationError> {
        let params = name.params();
        if args.len() != params.len() {
            return Err(FunctionValidationError::ArityMismatch {
                name,
                expected: params.len(),
                received: args.len(),
            });
        }
        let args = args
            .into_iter()
            .zip(params)
            .enumerate()
            .map(|(position, (arg, kind))| arg.into_checked(*kind, position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, args })
    }
}

/// A function-call argument, as produced by the grammar before its kind is checked against the
/// called function's parameter list
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RawFunctionArg {
    /// A literal JSON value
    Literal(Literal),
    /// A query — `$...` or `@...` — of any cardinality
    Query(Query),
    /// A nested, already-validated function call
    FunctionExpr(FunctionExpr),
}

impl RawFunctionArg {
    fn into_checked(
        self,
        kind: ParamKind,
        position: usize,
    ) -> Result<FunctionExprArg, FunctionValidationError> {
        match (kind, self) {
            (ParamKind::Value, RawFunctionArg::Literal(lit)) => Ok(FunctionExprArg::Literal(lit)),
            (ParamKind::Value, RawFunctionArg::Query(q)) => SingularQuery::try_from(q)
                .map(FunctionExprArg::SingularQuery)
                .map_err(|_| FunctionValidationError::NonSingularValueArg { position }),
            (ParamKind::Value, RawFunctionArg::FunctionExpr(f)) => {
                if f.return_kind() == ReturnKind::Value {
                    Ok(FunctionExprArg::FunctionExpr(f))
                } else {
                    Err(FunctionValidationError::WrongReturnKind { position })
                }
            }
            (ParamKind::Nodes, RawFunctionArg::Query(q)) => Ok(FunctionExprArg::FilterQuery(q)),
            (ParamKind::Nodes, _) => Err(FunctionValidationError::ExpectedNodesArg { position }),
            (ParamKind::Logical, _) => Err(FunctionValidationError::ExpectedNodesArg { position }),
        }
    }
}

/// An error produced while validating a function call against the fixed function table
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FunctionValidationError {
    /// No function with this name is defined
    #[error("function name '{0}' is not defined")]
    Undefined(String),
    /// The number of supplied arguments does not match the function's declared arity
    #[error("function '{name}' expects {expected} argument(s), received {received}")]
    ArityMismatch {
        /// The function
        name: FunctionName,
        /// The expected number of arguments
        expected: usize,
        /// The received number of arguments
        received: usize,
    },
    /// A `Value`-kind argument was a non-singular query
    #[error("argument {position} must be a singular query, a literal, or a value-returning function call")]
    NonSingularValueArg {
        /// The zero-based argument position
        position: usize,
    },
    /// A `Nodes`-kind argument was not a query
    #[error("argument {position} must be a query")]
    ExpectedNodesArg {
        /// The zero-based argument position
        position: usize,
    },
    /// A nested function call did not have the return kind its position requires
    #[error("argument {position} must be a value-returning function call")]
    WrongReturnKind {
        /// The zero-based argument position
        position: usize,
    },
    /// A value-returning function call was used where only a logical-returning one is allowed
    #[error("function '{0}' returns a value, and cannot be used as a test expression")]
    ValueFunctionAsTest(FunctionName),
}
