//! Deterministic tie-breaking for "closest candidate" selection.

use std::cmp::Ordering;

/// One slot of a sort key tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Number(i64),
    Text(String),
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Number(value)
    }
}

impl From<u32> for SortKey {
    fn from(value: u32) -> Self {
        SortKey::Number(i64::from(value))
    }
}

impl From<usize> for SortKey {
    fn from(value: usize) -> Self {
        SortKey::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

/// Compare two key tuples slot by slot.
///
/// Numbers compare numerically and text compares ordinally; a slot holding
/// one of each is treated as equal. When every shared slot is equal the
/// longer tuple sorts first.
pub fn compare_sort_keys(a: &[SortKey], b: &[SortKey]) -> Ordering {
    for (av, bv) in a.iter().zip(b) {
        let ord = match (av, bv) {
            (SortKey::Number(x), SortKey::Number(y)) => x.cmp(y),
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
            _ => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    b.len().cmp(&a.len())
}

/// Build a comparator from a key-extraction function, for use with
/// `sort_by`.
pub fn sort_key_comparator<T, F>(key_fn: F) -> impl Fn(&T, &T) -> Ordering
where
    F: Fn(&T) -> Vec<SortKey>,
{
    move |a, b| compare_sort_keys(&key_fn(a), &key_fn(b))
}
