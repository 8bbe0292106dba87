//! Deterministic Top-N ordering of aggregate maps.
//!
//! Sort key is descending score; ties break by key ascending. The tie-break
//! is deliberate: the map iterates in key order and the sort is stable, so
//! equal scores keep their lexicographic order on every backend.

use std::collections::BTreeMap;

/// Returns the `n` highest-scoring entries of `map`, descending by score,
/// ties by key ascending. An empty map yields an empty vec; `n` larger than
/// the map yields every entry exactly once.
pub fn top_n<V>(map: &BTreeMap<String, V>, n: usize) -> Vec<(String, V)>
where
    V: PartialOrd + Copy,
{
    let mut entries: Vec<(String, V)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

/// Like [`top_n`] but returns keys only, for callers that need just names.
pub fn top_n_keys<V>(map: &BTreeMap<String, V>, n: usize) -> Vec<String>
where
    V: PartialOrd + Copy,
{
    top_n(map, n).into_iter().map(|(key, _)| key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_orders_by_score_descending() {
        let scores = map(&[("Action", 0.5), ("Drama", 3.0), ("Horror", 1.0)]);
        let ranked = top_n(&scores, 3);

        assert_eq!(ranked[0].0, "Drama");
        assert_eq!(ranked[1].0, "Horror");
        assert_eq!(ranked[2].0, "Action");
    }

    #[test]
    fn test_truncates_to_n() {
        // At most n entries, at most the number of distinct keys
        let scores = map(&[("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 4.0)]);
        assert_eq!(top_n(&scores, 2).len(), 2);
        assert_eq!(top_n(&scores, 4).len(), 4);
        assert_eq!(top_n(&scores, 10).len(), 4);
        assert_eq!(top_n(&scores, 0).len(), 0);
    }

    #[test]
    fn test_all_keys_exactly_once_when_n_is_large() {
        let scores = map(&[("A", 1.0), ("B", 2.0), ("C", 2.0)]);
        let mut keys = top_n_keys(&scores, 100);
        keys.sort();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_map_yields_empty_sequence() {
        let scores: BTreeMap<String, f64> = BTreeMap::new();
        assert!(top_n(&scores, 3).is_empty());
    }

    #[test]
    fn test_ties_break_by_key_ascending() {
        let scores = map(&[("Thriller", 2.0), ("Action", 2.0), ("Drama", 2.0)]);
        let ranked = top_n_keys(&scores, 3);
        assert_eq!(ranked, vec!["Action", "Drama", "Thriller"]);
    }

    #[test]
    fn test_weighted_scores_top_one() {
        // Drama 3.0, Action 0.5 -> top 1 is Drama
        let scores = map(&[("Drama", 3.0), ("Action", 0.5)]);
        assert_eq!(top_n_keys(&scores, 1), vec!["Drama"]);
    }

    #[test]
    fn test_works_for_integer_counts() {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        counts.insert("fun".to_string(), 7);
        counts.insert("scary".to_string(), 2);

        let ranked = top_n(&counts, 8);
        assert_eq!(ranked[0], ("fun".to_string(), 7));
        assert_eq!(ranked[1], ("scary".to_string(), 2));
    }
}
