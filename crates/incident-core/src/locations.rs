//! Set operations over ordered location lists.
//!
//! Locations travel as `Vec<String>` because display order matters, but the
//! correlator treats them as sets. Matching is exact string equality.

use std::collections::HashSet;

/// Returns true if every element of `a` appears in `b`.
///
/// Order and duplicates are ignored. An empty `a` is a subset of anything.
pub fn is_subset<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let lookup: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    a.iter().all(|loc| lookup.contains(loc.as_ref()))
}

/// Returns true if either list contains the other.
pub fn contains_either<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    is_subset(a, b) || is_subset(b, a)
}

/// `existing` followed by every element of `incoming` it does not already
/// hold, in `incoming` order. Each new element is appended once.
pub fn union_preserving_order<A, B>(existing: &[A], incoming: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut merged: Vec<String> = existing.iter().map(|s| s.as_ref().to_string()).collect();
    let mut seen: HashSet<String> = merged.iter().cloned().collect();

    for loc in incoming {
        let loc = loc.as_ref();
        if seen.insert(loc.to_string()) {
            merged.push(loc.to_string());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_subset_basic() {
        assert!(is_subset(&["a", "b"], &["b", "c", "a"]));
        assert!(!is_subset(&["a", "d"], &["a", "b"]));
    }

    #[test]
    fn test_subset_ignores_duplicates() {
        assert!(is_subset(&["a", "a", "a"], &["a"]));
        assert!(is_subset(&["a"], &["a", "a"]));
    }

    #[test]
    fn test_empty_is_subset_of_anything() {
        let empty: [&str; 0] = [];
        assert!(is_subset(&empty, &["x"]));
        assert!(is_subset(&empty, &empty));
        assert!(!is_subset(&["x"], &empty));
    }

    #[test]
    fn test_mutual_subset_means_same_set() {
        let cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (vec!["a", "b"], vec!["b", "a"]),
            (vec!["a", "b", "b"], vec!["a", "a", "b"]),
            (vec!["a"], vec!["a", "b"]),
            (vec!["a", "c"], vec!["a", "b"]),
            (vec![], vec![]),
        ];

        for (a, b) in &cases {
            let mutual = is_subset(a, b) && is_subset(b, a);
            assert_eq!(mutual, set(a) == set(b), "a={:?} b={:?}", a, b);
        }
    }

    #[test]
    fn test_contains_either() {
        assert!(contains_either(&["Tel Aviv"], &["Tel Aviv", "Holon"]));
        assert!(contains_either(&["Tel Aviv", "Holon"], &["Holon"]));
        assert!(!contains_either(&["Tel Aviv", "Haifa"], &["Tel Aviv", "Holon"]));
    }

    #[test]
    fn test_union_appends_new_in_incoming_order() {
        let merged = union_preserving_order(&["b", "a"], &["c", "a", "d", "c"]);
        assert_eq!(merged, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_union_with_empty_incoming() {
        let empty: [&str; 0] = [];
        let merged = union_preserving_order(&["x", "y"], &empty);
        assert_eq!(merged, vec!["x", "y"]);
    }

    #[test]
    fn test_union_into_empty_dedupes() {
        let empty: [&str; 0] = [];
        let merged = union_preserving_order(&empty, &["x", "x", "y"]);
        assert_eq!(merged, vec!["x", "y"]);
    }
}
