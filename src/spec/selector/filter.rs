//! The filter selector, and the logical/comparison expression language it hosts
use serde_json::Value;

use crate::spec::functions::FunctionExpr;
use crate::spec::query::{Query, QueryKind, Queryable};
use crate::spec::segment::{QuerySegment, Segment};

use super::index::Index;
use super::name::Name;
use super::Selector;

/// A filter selector, `[?expr]`
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Filter(pub LogicalOrExpr);

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{expr}", expr = self.0)
    }
}

impl TestFilter for Filter {
    fn test_filter(&self, current: &Value, root: &Value) -> bool {
        self.0.test_filter(current, root)
    }
}

/// A sealed trait for the types that make up the filter expression language, allowing each to
/// be tested against a JSON value for truth.
pub(crate) trait TestFilter {
    fn test_filter(&self, current: &Value, root: &Value) -> bool;
}

/// A disjunction of [`LogicalAndExpr`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LogicalOrExpr(pub Vec<LogicalAndExpr>);

impl std::fmt::Display for LogicalOrExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            write!(f, "{expr}{or}", or = if i == self.0.len() - 1 { "" } else { " || " })?;
        }
        Ok(())
    }
}

impl TestFilter for LogicalOrExpr {
    fn test_filter(&self, current: &Value, root: &Value) -> bool {
        self.0.iter().any(|expr| expr.test_filter(current, root))
    }
}

/// A conjunction of [`BasicExpr`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LogicalAndExpr(pub Vec<BasicExpr>);

impl std::fmt::Display for LogicalAndExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            write!(f, "{expr}{and}", and = if i == self.0.len() - 1 { "" } else { " && " })?;
        }
        Ok(())
    }
}

impl TestFilter for LogicalAndExpr {
    fn test_filter(&self, current: &Value, root: &Value) -> bool {
        self.0.iter().all(|expr| expr.test_filter(current, root))
    }
}

/// The smallest unit of the filter grammar: a parenthesized expression, a negation, a
/// comparison, an existence test, or a logical-returning function call.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BasicExpr {
    /// `(expr)`
    Paren(LogicalOrExpr),
    /// `!(expr)`
    NotParen(LogicalOrExpr),
    /// `left op right`
    Relation(ComparisonExpr),
    /// A bare query, true when it selects at least one node
    Exist(ExistExpr),
    /// `!` applied to a bare query
    NotExist(ExistExpr),
    /// A bare, logical-returning function call
    FuncExpr(FunctionExpr),
    /// `!` applied to a logical-returning function call
    NotFuncExpr(FunctionExpr),
}

impl std::fmt::Display for BasicExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasicExpr::Paren(expr) => write!(f, "({expr})"),
            BasicExpr::NotParen(expr) => write!(f, "!({expr})"),
            BasicExpr::Relation(expr) => write!(f, "{expr}"),
            BasicExpr::Exist(expr) => write!(f, "{expr}"),
            BasicExpr::NotExist(expr) => write!(f, "!{expr}"),
            BasicExpr::FuncExpr(func) => write!(f, "{func}"),
            BasicExpr::NotFuncExpr(func) => write!(f, "!{func}"),
        }
    }
}

impl TestFilter for BasicExpr {
    fn test_filter(&self, current: &Value, root: &Value) -> bool {
        match self {
            BasicExpr::Paren(expr) => expr.test_filter(current, root),
            BasicExpr::NotParen(expr) => !expr.test_filter(current, root),
            BasicExpr::Relation(expr) => expr.test_filter(current, root),
            BasicExpr::Exist(expr) => expr.test_filter(current, root),
            BasicExpr::NotExist(expr) => !expr.test_filter(current, root),
            BasicExpr::FuncExpr(func) => func.evaluate_logical(current, root),
            BasicExpr::NotFuncExpr(func) => !func.evaluate_logical(current, root),
        }
    }
}

#[cfg(test)]
impl BasicExpr {
    pub(crate) fn as_relation(&self) -> Option<&ComparisonExpr> {
        match self {
            BasicExpr::Relation(cx) => Some(cx),
            _ => None,
        }
    }
}

/// A bare query used as an existence test inside a filter expression
///
/// Tests true when the wrapped query selects at least one node.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExistExpr(pub Query);

impl std::fmt::Display for ExistExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{query}", query = self.0)
    }
}

impl TestFilter for ExistExpr {
    fn test_filter(&self, current: &Value, root: &Value) -> bool {
        !self.0.query(current, root).is_empty()
    }
}

/// A comparison between two [`Comparable`] operands
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ComparisonExpr {
    /// The left-hand operand
    pub left: Comparable,
    /// The comparison operator
    pub op: ComparisonOperator,
    /// The right-hand operand
    pub right: Comparable,
}

impl std::fmt::Display for ComparisonExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{left} {op} {right}", left = self.left, op = self.op, right = self.right)
    }
}

impl TestFilter for ComparisonExpr {
    fn test_filter(&self, current: &Value, root: &Value) -> bool {
        let left = self.left.as_value(current, root);
        let right = self.right.as_value(current, root);
        match self.op {
            ComparisonOperator::EqualTo => check_equal_to(&left, &right),
            ComparisonOperator::NotEqualTo => !check_equal_to(&left, &right),
            ComparisonOperator::LessThan => check_less_than(&left, &right),
            ComparisonOperator::GreaterThan => check_less_than(&right, &left),
            ComparisonOperator::LessThanEqualTo => {
                !matches!(left, ValueResult::Nothing)
                    && !matches!(right, ValueResult::Nothing)
                    && (check_less_than(&left, &right) || check_equal_to(&left, &right))
            }
            ComparisonOperator::GreaterThanEqualTo => {
                !matches!(left, ValueResult::Nothing)
                    && !matches!(right, ValueResult::Nothing)
                    && (check_less_than(&right, &left) || check_equal_to(&left, &right))
            }
        }
    }
}

/// A comparison operator
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComparisonOperator {
    /// `==`
    EqualTo,
    /// `!=`
    NotEqualTo,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessThanEqualTo,
    /// `>=`
    GreaterThanEqualTo,
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComparisonOperator::EqualTo => "==",
            ComparisonOperator::NotEqualTo => "!=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThanEqualTo => "<=",
            ComparisonOperator::GreaterThanEqualTo => ">=",
        };
        write!(f, "{s}")
    }
}

/// One side of a [`ComparisonExpr`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Comparable {
    /// A literal JSON value
    Literal(Literal),
    /// A singular query
    SingularQuery(SingularQuery),
    /// A value-returning function call
    FunctionExpr(FunctionExpr),
}

impl std::fmt::Display for Comparable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparable::Literal(lit) => write!(f, "{lit}"),
            Comparable::SingularQuery(sq) => write!(f, "{sq}"),
            Comparable::FunctionExpr(func) => write!(f, "{func}"),
        }
    }
}

#[cfg(test)]
impl Comparable {
    pub(crate) fn as_singular_path(&self) -> Option<&SingularQuery> {
        match self {
            Comparable::SingularQuery(sq) => Some(sq),
            _ => None,
        }
    }
}

impl Comparable {
    fn as_value<'b>(&self, current: &'b Value, root: &'b Value) -> ValueResult<'b> {
        match self {
            Comparable::Literal(lit) => lit.into(),
            Comparable::SingularQuery(sq) => match sq.eval_query(current, root) {
                Some(v) => ValueResult::Node(v),
                None => ValueResult::Nothing,
            },
            Comparable::FunctionExpr(func) => func.evaluate_value(current, root),
        }
    }
}

/// A literal JSON value appearing directly in a filter expression
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    /// A number literal
    Number(serde_json::Number),
    /// A string literal
    String(String),
    /// A boolean literal
    Bool(bool),
    /// The `null` literal
    Null,
}

// `Number` does not derive `Eq`, but JSON numbers compare bitwise-reliably enough for our
// purposes here: this is only used to compare parsed ASTs in tests.
impl Eq for Literal {}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => write!(f, "null"),
        }
    }
}

impl<'a> From<&Literal> for ValueResult<'a> {
    fn from(lit: &Literal) -> Self {
        let v = match lit {
            Literal::Number(n) => Value::Number(n.clone()),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Null => Value::Null,
        };
        ValueResult::Value(v)
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Literal::Number(n),
            Value::String(s) => Literal::String(s),
            Value::Bool(b) => Literal::Bool(b),
            Value::Null => Literal::Null,
            // Array and object literals do not appear in the filter grammar.
            _ => Literal::Null,
        }
    }
}

/// The result of evaluating a value-producing expression: a constructed JSON value, a borrowed
/// node from the document, or `Nothing` when the expression produced no result at all.
///
/// This is the `ValueType` of the JSONPath type system (RFC 9535 §2.4.1): comparisons and
/// `Value`-kind function parameters operate on it.
#[derive(Debug, Clone)]
pub enum ValueResult<'a> {
    /// An owned JSON value, typically produced by a function call
    Value(Value),
    /// A node borrowed from the document being queried
    Node(&'a Value),
    /// No value: the singular query had no match, or the function call produced nothing
    Nothing,
}

impl<'a> ValueResult<'a> {
    /// Borrow the contained value, regardless of whether it is owned or borrowed
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ValueResult::Value(v) => Some(v),
            ValueResult::Node(v) => Some(v),
            ValueResult::Nothing => None,
        }
    }
}

fn value_same_type(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    )
}

fn check_same_type(left: &ValueResult, right: &ValueResult) -> bool {
    match (left.as_value(), right.as_value()) {
        (Some(l), Some(r)) => value_same_type(l, r),
        _ => false,
    }
}

fn number_equal_to(l: &serde_json::Number, r: &serde_json::Number) -> bool {
    if let (Some(l), Some(r)) = (l.as_f64(), r.as_f64()) {
        l == r
    } else {
        l == r
    }
}

fn value_equal_to(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => number_equal_to(l, r),
        (l, r) => l == r,
    }
}

/// Compare two [`ValueResult`]s for equality, per the filter expression `==`/`!=` semantics:
/// `Nothing == Nothing` is true, and `Nothing` never equals anything else.
fn check_equal_to(left: &ValueResult, right: &ValueResult) -> bool {
    match (left, right) {
        (ValueResult::Nothing, ValueResult::Nothing) => true,
        (ValueResult::Nothing, _) | (_, ValueResult::Nothing) => false,
        _ => match (left.as_value(), right.as_value()) {
            (Some(l), Some(r)) => value_equal_to(l, r),
            _ => false,
        },
    }
}

fn value_less_than(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l < r,
            _ => false,
        },
        (Value::String(l), Value::String(r)) => l < r,
        _ => false,
    }
}

/// Compare two [`ValueResult`]s for ordering, per the filter expression `<`/`>`/`<=`/`>=`
/// semantics: operands must be the same type (both numbers or both strings); anything else,
/// including `Nothing` on either side, is false.
fn check_less_than(left: &ValueResult, right: &ValueResult) -> bool {
    if !check_same_type(left, right) {
        return false;
    }
    match (left.as_value(), right.as_value()) {
        (Some(l), Some(r)) => value_less_than(l, r),
        _ => false,
    }
}

/// A query statically proven, at parse time, to select at most one node
///
/// Built via [`TryFrom<Query>`], which fails with [`NonSingularQueryError`] unless every segment
/// of the query is a child segment with exactly one name or index selector.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SingularQuery {
    /// Whether the query is rooted at `$` or `@`
    pub kind: SingularQueryKind,
    /// The chain of name/index segments to follow
    pub segments: Vec<SingularQuerySegment>,
}

impl std::fmt::Display for SingularQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{kind}", kind = self.kind)?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl SingularQuery {
    /// Follow the segment chain from the appropriate root, returning the single matched node,
    /// if any.
    pub fn eval_query<'b>(&self, current: &'b Value, root: &'b Value) -> Option<&'b Value> {
        let mut value = match self.kind {
            SingularQueryKind::Absolute => root,
            SingularQueryKind::Relative => current,
        };
        for segment in &self.segments {
            value = match segment {
                SingularQuerySegment::Name(name) => value.as_object()?.get(name.as_str())?,
                SingularQuerySegment::Index(index) => {
                    let list = value.as_array()?;
                    let i = index.0;
                    if i < 0 {
                        let off = usize::try_from(i.checked_abs()?).ok()?;
                        list.get(list.len().checked_sub(off)?)?
                    } else {
                        list.get(usize::try_from(i).ok()?)?
                    }
                }
            };
        }
        Some(value)
    }
}

impl TryFrom<Query> for SingularQuery {
    type Error = NonSingularQueryError;

    fn try_from(query: Query) -> Result<Self, Self::Error> {
        if !query.is_singular() {
            // `is_singular` already checked every segment; re-derive a specific reason below by
            // walking the segments again so the error is informative.
            for qs in &query.segments {
                if qs.is_descendent() {
                    return Err(NonSingularQueryError::Descendant);
                }
                if !qs.segment.is_singular() {
                    return match &qs.segment {
                        Segment::Wildcard => Err(NonSingularQueryError::Wildcard),
                        Segment::LongHand(selectors) if selectors.is_empty() => {
                            Err(NonSingularQueryError::NoSelectors)
                        }
                        Segment::LongHand(_) => Err(NonSingularQueryError::TooManySelectors),
                        Segment::DotName(_) => unreachable!("dot names are always singular"),
                    };
                }
            }
            unreachable!("is_singular() returned false but no offending segment was found");
        }
        let segments = query
            .segments
            .into_iter()
            .map(SingularQuerySegment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            kind: query.kind.into(),
            segments,
        })
    }
}

impl TryFrom<QuerySegment> for SingularQuerySegment {
    type Error = NonSingularQueryError;

    fn try_from(qs: QuerySegment) -> Result<Self, Self::Error> {
        if qs.is_descendent() {
            return Err(NonSingularQueryError::Descendant);
        }
        match qs.segment {
            Segment::DotName(name) => Ok(SingularQuerySegment::Name(Name(name))),
            Segment::Wildcard => Err(NonSingularQueryError::Wildcard),
            Segment::LongHand(mut selectors) => match selectors.len() {
                0 => Err(NonSingularQueryError::NoSelectors),
                1 => SingularQuerySegment::try_from(selectors.remove(0)),
                _ => Err(NonSingularQueryError::TooManySelectors),
            },
        }
    }
}

impl TryFrom<Selector> for SingularQuerySegment {
    type Error = NonSingularQueryError;

    fn try_from(selector: Selector) -> Result<Self, Self::Error> {
        match selector {
            Selector::Name(name) => Ok(SingularQuerySegment::Name(name)),
            Selector::Index(index) => Ok(SingularQuerySegment::Index(index)),
            Selector::Wildcard => Err(NonSingularQueryError::Wildcard),
            Selector::ArraySlice(_) => Err(NonSingularQueryError::Slice),
            Selector::Filter(_) => Err(NonSingularQueryError::Filter),
        }
    }
}

/// One segment of a [`SingularQuery`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SingularQuerySegment {
    /// A name segment, e.g. `.foo` or `['foo']`
    Name(Name),
    /// An index segment, e.g. `[0]`
    Index(Index),
}

impl std::fmt::Display for SingularQuerySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingularQuerySegment::Name(name) => write!(f, "[{name}]"),
            SingularQuerySegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Whether a [`SingularQuery`] is rooted at the query root (`$`) or the filter's current node
/// (`@`)
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SingularQueryKind {
    /// Rooted at `$`
    Absolute,
    /// Rooted at `@`
    Relative,
}

impl std::fmt::Display for SingularQueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingularQueryKind::Absolute => write!(f, "$"),
            SingularQueryKind::Relative => write!(f, "@"),
        }
    }
}

impl From<QueryKind> for SingularQueryKind {
    fn from(kind: QueryKind) -> Self {
        match kind {
            QueryKind::Root => SingularQueryKind::Absolute,
            QueryKind::Current => SingularQueryKind::Relative,
        }
    }
}

/// The reason a query failed to reduce to a [`SingularQuery`]
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum NonSingularQueryError {
    /// The query contains a descendant segment
    #[error("query contains a descendant segment")]
    Descendant,
    /// A segment contains more than one selector
    #[error("segment contains more than one selector")]
    TooManySelectors,
    /// A segment contains no selectors
    #[error("segment contains no selectors")]
    NoSelectors,
    /// A segment is a wildcard
    #[error("segment is a wildcard")]
    Wildcard,
    /// A segment is a slice
    #[error("segment is a slice")]
    Slice,
    /// A segment is a filter
    #[error("segment is a filter")]
    Filter,
}
