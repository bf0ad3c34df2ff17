use serde_json::json;
use sortkit::table::Direction;
use sortkit::utils::{create_getter, sort_strings, sum, trim_symbols};

// ============================================================================
// Numbers and strings
// ============================================================================

#[test]
fn test_sum_with_optional_operand() {
    assert_eq!(sum(1, Some(2)), 3);
    assert_eq!(sum(1, None), 1);
    assert_eq!(sum(-4, Some(4)), 0);
}

#[test]
fn test_sort_strings_both_directions() {
    let values = ["banana", "apple", "Apple", "cherry"];

    assert_eq!(
        sort_strings(&values, Direction::Asc),
        vec!["Apple", "apple", "banana", "cherry"]
    );
    assert_eq!(
        sort_strings(&values, Direction::Desc),
        vec!["cherry", "banana", "apple", "Apple"]
    );
}

#[test]
fn test_sort_strings_cyrillic() {
    let values = ["ёлка", "Ель", "ежевика", "абрикос"];

    assert_eq!(
        sort_strings(&values, Direction::Asc),
        vec!["абрикос", "ежевика", "Ель", "ёлка"]
    );
}

#[test]
fn test_sort_strings_keeps_input() {
    let values = vec![String::from("b"), String::from("a")];

    let sorted = sort_strings(&values, Direction::Asc);

    assert_eq!(sorted, vec!["a", "b"]);
    assert_eq!(values, vec!["b", "a"]);
}

// ============================================================================
// Getters
// ============================================================================

#[test]
fn test_getter_follows_nested_path() {
    let get = create_getter("product.details.price");

    assert_eq!(
        get(&json!({ "product": { "details": { "price": 42 } } })),
        Some(&json!(42))
    );
}

#[test]
fn test_getter_missing_segment_is_none() {
    let get = create_getter("a.b.c");

    assert_eq!(get(&json!({})), None);
    assert_eq!(get(&json!({ "a": { "b": 1 } })), None);
    assert_eq!(get(&json!({ "a": null })), None);
}

#[test]
fn test_getter_is_reusable() {
    let get = create_getter("name");
    let first = json!({ "name": "first" });
    let second = json!({ "name": "second" });

    assert_eq!(get(&first), Some(&json!("first")));
    assert_eq!(get(&second), Some(&json!("second")));
}

// ============================================================================
// Trimming
// ============================================================================

#[test]
fn test_trim_symbols_limits_runs() {
    assert_eq!(trim_symbols("xxxaaaaab", Some(1)), "xab");
    assert_eq!(trim_symbols("xxxaaaaab", Some(3)), "xxxaaab");
    assert_eq!(trim_symbols("aaa bbb", Some(2)), "aa bb");
}

#[test]
fn test_trim_symbols_edge_sizes() {
    assert_eq!(trim_symbols("xxx", Some(0)), "");
    assert_eq!(trim_symbols("xxx", None), "xxx");
    assert_eq!(trim_symbols("", Some(2)), "");
}
