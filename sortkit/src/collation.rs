//! Locale-aware string ordering.
//!
//! Strings are compared letter by letter ignoring case first. Only when two
//! strings are equal at that level does case decide, with upper case before
//! lower case (`"Apple" < "apple" < "banana"`). Latin and Cyrillic are both
//! covered; Cyrillic `ё` collates right after `е` as in Russian.

use std::cmp::Ordering;

/// Compare two strings with the collation described in the module docs.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_keys(a)
        .cmp(primary_keys(b))
        .then_with(|| compare_case(a, b))
}

fn primary_keys(s: &str) -> impl Iterator<Item = u64> + '_ {
    s.chars().flat_map(char::to_lowercase).map(primary_weight)
}

/// Weight of a lower-cased character. Code points are spread out so that
/// letters with a tailored position can slot in between two neighbours.
fn primary_weight(c: char) -> u64 {
    match c {
        'ё' => (u64::from('е') << 1) | 1,
        _ => u64::from(c) << 1,
    }
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_uppercase(), cb.is_uppercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}
