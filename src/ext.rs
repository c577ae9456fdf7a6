use serde_json::Value;

use crate::{error::ParseError, JsonPath, NodeList};

/// Extension trait that allows for JSONPath queries directly on [`serde_json::Value`]
///
/// ## Usage
/// ```rust
/// use serde_json::json;
/// use serde_json_path::{JsonPath, JsonPathExt};
///
/// # fn main() -> Result<(), serde_json_path::ParseError> {
/// let value = json!({"foo": ["bar", "baz"]});
/// let query = JsonPath::parse("$.foo[*]")?;
/// let nodes = value.json_path(&query).all();
/// assert_eq!(nodes, vec!["bar", "baz"]);
/// # Ok(())
/// # }
/// ```
pub trait JsonPathExt {
    /// Query a [`serde_json::Value`] with a parsed [`JsonPath`]
    fn json_path(&self, path: &JsonPath) -> NodeList<'_>;
}

impl JsonPathExt for Value {
    fn json_path(&self, path: &JsonPath) -> NodeList<'_> {
        path.query(self)
    }
}

/// Parse `path` and run it against `root` in one step
///
/// This is a convenience composition of [`JsonPath::parse`] and [`JsonPath::query`] for one-shot
/// callers who do not intend to reuse the compiled query. Callers who run the same path against
/// more than one document should parse once and call [`JsonPath::query`] directly, since parsing
/// dominates the cost of a single call.
///
/// ## Usage
/// ```rust
/// use serde_json::json;
/// use serde_json_path::select;
///
/// # fn main() -> Result<(), serde_json_path::ParseError> {
/// let value = json!({"foo": ["bar", "baz"]});
/// let nodes = select(&value, "$.foo[*]")?;
/// assert_eq!(nodes.all(), vec!["bar", "baz"]);
/// # Ok(())
/// # }
/// ```
pub fn select<'a>(root: &'a Value, path: &str) -> Result<NodeList<'a>, ParseError> {
    Ok(JsonPath::parse(path)?.query(root))
}
