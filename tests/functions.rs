//! Exercises the five built-in JSONPath functions (RFC 9535 §2.4): `length`, `count`, `value`,
//! `match`, and `search`.
use serde_json::json;
use serde_json_path::JsonPath;
#[cfg(feature = "trace")]
use test_log::test;

#[test]
fn length_of_string_array_object() {
    let value = json!({
        "s": "hello",
        "a": [1, 2, 3],
        "o": {"a": 1, "b": 2},
        "n": 42,
    });
    assert_eq!(
        JsonPath::parse("$[?length(@.s) == 5]")
            .unwrap()
            .query(&value)
            .len(),
        1
    );
    assert_eq!(
        JsonPath::parse("$[?length(@.a) == 3]")
            .unwrap()
            .query(&value)
            .len(),
        1
    );
    assert_eq!(
        JsonPath::parse("$[?length(@.o) == 2]")
            .unwrap()
            .query(&value)
            .len(),
        1
    );
    // `length` of a number is `Nothing`, and `Nothing` never compares equal to a number.
    assert_eq!(
        JsonPath::parse("$[?length(@.n) == 2]")
            .unwrap()
            .query(&value)
            .len(),
        0
    );
}

#[test]
fn length_counts_utf8_bytes_not_chars() {
    let value = json!({"s": "é"});
    // "é" is 2 bytes in UTF-8 but a single code point.
    assert_eq!(
        JsonPath::parse("$[?length(@.s) == 2]")
            .unwrap()
            .query(&value)
            .len(),
        1
    );
}

#[test]
fn count_of_nodelist() {
    let value = json!([{"foo": [1]}, {"foo": [1, 2]}, {"foo": []}]);
    let path = JsonPath::parse("$[?count(@.foo.*) > 1]").unwrap();
    assert_eq!(path.query(&value).len(), 1);
}

#[test]
fn value_collapses_singleton_nodelist() {
    let value = json!([{"id": 1}, {"id": 2}]);
    // `value(@.id)` collapses the one-node result into a comparable value.
    let path = JsonPath::parse("$[?value(@.id) == 1]").unwrap();
    let nodes = path.query(&value);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes.all()[0], &value[0]);
}

#[test]
fn value_as_bare_test_is_a_compile_error() {
    // A `Value`-returning function used as a bare test item is a static type error, not an empty
    // or falsy result.
    assert!(JsonPath::parse("$.items[?value(@.id)]").is_err());
}

#[test]
fn match_is_fully_anchored() {
    let value = json!(["1974-05-10", "not a date", "1974-05-1"]);
    let path = JsonPath::parse(r#"$[?match(@, "\\d{4}-\\d{2}-\\d{2}")]"#).unwrap();
    let nodes = path.query(&value);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes.all()[0], "1974-05-10");
}

#[test]
fn search_matches_a_substring() {
    let value = json!(["prefix-1974-05-10-suffix", "no date here"]);
    let path = JsonPath::parse(r#"$[?search(@, "\\d{4}-\\d{2}-\\d{2}")]"#).unwrap();
    let nodes = path.query(&value);
    assert_eq!(nodes.len(), 1);
}

#[test]
fn match_and_search_on_non_string_are_false_not_errors() {
    let value = json!([1, "a", null, true, [1], {"k": 1}]);
    let path = JsonPath::parse(r#"$[?match(@, "a")]"#).unwrap();
    // Only the string element "a" matches; every other kind yields a false test, never a panic.
    assert_eq!(path.query(&value).len(), 1);
}

#[test]
fn malformed_regex_is_false_not_an_error() {
    let value = json!(["anything"]);
    // An unbalanced group is a malformed ECMAScript-style pattern; `match` must still run to
    // completion and simply reject every candidate.
    let path = JsonPath::parse(r#"$[?match(@, "(")]"#).unwrap();
    assert_eq!(path.query(&value).len(), 0);
}

#[test]
fn nested_function_call_as_value_argument() {
    let value = json!([{"arr": ["only"]}, {"arr": ["a", "b"]}]);
    // `value(@.arr[*])` collapses a `Nodes`-kind subquery into a `ValueType`, which `length` then
    // accepts as its own `Value`-kind argument — a `FunctionExpr` nested inside a
    // `FunctionExprArg::FunctionExpr`.
    let path = JsonPath::parse("$[?length(value(@.arr[*])) == 4]").unwrap();
    let nodes = path.query(&value);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes.all()[0], &value[0]);
}
