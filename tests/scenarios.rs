//! End-to-end scenarios against a single document, plus a handful of universal properties that
//! hold for any compiled query regardless of the document it runs against.
use serde_json::{json, Value};
use serde_json_path::{compile, select, JsonPath};
#[cfg(feature = "trace")]
use test_log::test;

fn document() -> Value {
    json!({
        "name": "Barry",
        "tags": ["a", "b", "c"],
        "numbers": [1, 2, 3, 4, 5, 6],
        "items": [
            {"id": 1, "b": "j", "colors": ["red", "green"], "author": "Bob", "date": "1974-05-10"},
            {"id": 2, "b": "k", "colors": ["blue"], "author": "Rob", "date": "1976-05-10"},
            {"id": 3, "b": {}, "colors": [], "author": "Alice", "date": "1974-07-11"},
            {"id": 4, "b": "kilo", "colors": ["orange", "red"], "author": "Bob", "date": "1975-02-01"}
        ],
        "nested": {"obj": {"b": "deep"}}
    })
}

#[test]
fn negative_index_selects_from_the_end() {
    let nodes = JsonPath::parse("$.tags[-1]").unwrap().query(&document());
    assert_eq!(nodes.all(), vec!["c"]);
}

#[test]
fn repeated_selector_in_a_bracket_duplicates_the_match() {
    let nodes = JsonPath::parse("$.tags[0,0]").unwrap().query(&document());
    assert_eq!(nodes.all(), vec!["a", "a"]);
}

#[test]
fn negative_step_slice_walks_backward() {
    let nodes = JsonPath::parse("$.numbers[4:1:-2]")
        .unwrap()
        .query(&document());
    assert_eq!(nodes.all(), vec![5, 3]);
}

#[test]
fn descendant_name_collects_every_depth() {
    let nodes = JsonPath::parse("$..b").unwrap().query(&document());
    // "j", "k", {}, "kilo", "deep" — in preorder, duplicates and mixed kinds preserved.
    assert_eq!(nodes.len(), 5);
    let strings: Vec<_> = nodes
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(strings, vec!["j", "k", "kilo", "deep"]);
    assert!(nodes.iter().any(|v| v.is_object() && v.as_object().unwrap().is_empty()));
}

#[test]
fn filter_with_length_function() {
    let value = document();
    let nodes = JsonPath::parse("$.items[?length(@.colors) >= 2]")
        .unwrap()
        .query(&value);
    let ids: Vec<_> = nodes.iter().map(|v| v["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn filter_with_match_function() {
    let value = document();
    let nodes = JsonPath::parse(r#"$.items[?match(@.date, "1974-05-..")]"#)
        .unwrap()
        .query(&value);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes.all()[0]["id"], 1);
}

#[test]
fn nothing_equals_nothing_in_a_comparison() {
    let value = json!([{"x": 1}]);
    let nodes = JsonPath::parse("$[?$.missing == $.also_missing]")
        .unwrap()
        .query(&value);
    assert_eq!(nodes.len(), 1);
}

#[test]
fn nothing_is_never_ordered_against_nothing() {
    let value = json!([{"x": 1}]);
    for op in ["<=", ">="] {
        let path_str = format!("$[?$.missing {op} $.also_missing]");
        let nodes = JsonPath::parse(&path_str).unwrap().query(&value);
        assert_eq!(nodes.len(), 0, "{path_str} should select nothing");
    }
}

#[test]
fn zero_step_slice_is_a_parse_error() {
    assert!(JsonPath::parse("$[::0]").is_err());
}

#[test]
fn filter_display_round_trips_without_doubling_the_question_mark() {
    let path = JsonPath::parse("$[?@.id > 1]").unwrap();
    let rendered = path.to_string();
    assert_eq!(rendered.matches('?').count(), 1);
    assert_eq!(JsonPath::parse(&rendered).unwrap(), path);
}

#[test]
fn value_returning_function_as_bare_test_is_rejected_at_compile_time() {
    assert!(JsonPath::parse("$.items[?value(@.id)]").is_err());
}

#[test]
fn select_is_a_one_shot_composition_of_compile_and_query() {
    let value = document();
    let nodes = select(&value, "$.tags[-1]").unwrap();
    assert_eq!(nodes.all(), vec!["c"]);
}

#[test]
fn compile_is_an_alias_for_parse() {
    let value = document();
    let nodes = compile("$.name").unwrap().query(&value);
    assert_eq!(nodes.all(), vec!["Barry"]);
}

#[test]
fn compile_is_deterministic_for_byte_equal_input() {
    let a = JsonPath::parse("$.items[?@.id > 1]");
    let b = JsonPath::parse("$.items[?@.id > 1]");
    assert_eq!(a.is_ok(), b.is_ok());
    assert_eq!(a.unwrap(), b.unwrap());
}

#[test]
fn evaluate_is_deterministic_across_calls() {
    let value = document();
    let path = JsonPath::parse("$..b").unwrap();
    let first = path.query(&value).all();
    let second = path.query(&value).all();
    assert!(first.iter().zip(second.iter()).all(|(a, b)| std::ptr::eq(*a, *b)));
}

#[test]
fn singular_query_never_yields_more_than_one_node() {
    let value = document();
    for path_str in ["$.name", "$.items[0]", "$.items[0].author", "$.nested.obj.b"] {
        let nodes = JsonPath::parse(path_str).unwrap().query(&value);
        assert!(nodes.len() <= 1, "{path_str} produced {} nodes", nodes.len());
    }
}

#[test]
fn slice_never_escapes_array_bounds() {
    let value = json!([0, 1, 2, 3, 4]);
    for path_str in [
        "$[100:200]",
        "$[-100:-200]",
        "$[::-1]",
        "$[-10:10:3]",
        "$[10:-10:-3]",
    ] {
        let nodes = JsonPath::parse(path_str).unwrap().query(&value);
        assert!(nodes.len() <= 5);
        for n in nodes.all() {
            assert!(value.as_array().unwrap().iter().any(|v| v == n));
        }
    }
}

#[test]
fn comparison_equality_is_symmetric() {
    let value = json!({"a": 1, "b": 1, "c": 2});
    let eq_ab = JsonPath::parse("$[?@.a == @.b]")
        .unwrap()
        .query(&value)
        .is_empty();
    let eq_ba = JsonPath::parse("$[?@.b == @.a]")
        .unwrap()
        .query(&value)
        .is_empty();
    assert_eq!(eq_ab, eq_ba);

    let ne_ac = JsonPath::parse("$[?@.a != @.c]")
        .unwrap()
        .query(&value)
        .is_empty();
    let ne_ca = JsonPath::parse("$[?@.c != @.a]")
        .unwrap()
        .query(&value)
        .is_empty();
    assert_eq!(ne_ac, ne_ca);
}
