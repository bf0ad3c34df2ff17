//! Small helpers shared by the widgets.

use serde_json::Value;

use crate::collation;
use crate::table::Direction;

/// `a + b`, or `a` alone.
pub fn sum(a: i64, b: Option<i64>) -> i64 {
    a + b.unwrap_or(0)
}

/// Sort strings with the table collation: case-insensitive first, upper
/// case before lower case on ties.
pub fn sort_strings<S: AsRef<str>>(values: &[S], direction: Direction) -> Vec<String> {
    let mut sorted: Vec<String> = values.iter().map(|s| s.as_ref().to_string()).collect();
    sorted.sort_by(|a, b| direction.apply(collation::compare(a, b)));
    sorted
}

/// A getter for a dot-separated path into a JSON value.
///
/// ```
/// use serde_json::json;
/// use sortkit::utils::create_getter;
///
/// let get_price = create_getter("product.details.price");
/// let product = json!({ "product": { "details": { "price": 10 } } });
/// assert_eq!(get_price(&product), Some(&json!(10)));
/// assert_eq!(get_price(&json!({ "product": {} })), None);
/// ```
pub fn create_getter(path: &str) -> impl Fn(&Value) -> Option<&Value> + use<> {
    let segments: Vec<String> = path.split('.').map(str::to_string).collect();
    getter(move |value| {
        segments
            .iter()
            .try_fold(value, |current, key| current.as_object()?.get(key))
    })
}

fn getter<F>(f: F) -> F
where
    F: for<'a> Fn(&'a Value) -> Option<&'a Value>,
{
    f
}

/// Cut runs of the same character down to `size`.
///
/// `Some(0)` yields an empty string; `None` returns the input unchanged.
pub fn trim_symbols(s: &str, size: Option<usize>) -> String {
    let Some(size) = size else {
        return s.to_string();
    };

    let mut result = String::with_capacity(s.len());
    let mut previous = None;
    let mut run = 0;
    for c in s.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run <= size {
            result.push(c);
        }
    }
    result
}
