// src/crawl/rank.rs
// =============================================================================
// Picks the top N words out of the aggregated counts.
//
// Ordering is total so the output never depends on hash map iteration order:
// 1. higher count first
// 2. longer word first
// 3. alphabetical
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns at most `limit` (word, count) pairs in rank order.
pub fn rank(counts: &HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| compare(a, b));

    entries
        .into_iter()
        .take(limit)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

fn compare(a: &(&String, &usize), b: &(&String, &usize)) -> Ordering {
    b.1.cmp(a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_ties_broken_by_length_then_alphabet() {
        let ranked = rank(&counts(&[("a", 3), ("bb", 3), ("ccc", 3)]), 2);
        assert_eq!(
            ranked,
            vec![("ccc".to_string(), 3), ("bb".to_string(), 3)]
        );
    }

    #[test]
    fn test_count_beats_length() {
        let ranked = rank(&counts(&[("tiny", 1), ("a", 9), ("elephant", 4)]), 10);
        let words: Vec<_> = ranked.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["a", "elephant", "tiny"]);
    }

    #[test]
    fn test_same_count_and_length_is_alphabetical() {
        let ranked = rank(&counts(&[("dog", 2), ("cat", 2), ("emu", 2)]), 3);
        let words: Vec<_> = ranked.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["cat", "dog", "emu"]);
    }

    #[test]
    fn test_limit_larger_than_input() {
        let ranked = rank(&counts(&[("only", 1)]), 5);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_zero_limit() {
        assert!(rank(&counts(&[("word", 7)]), 0).is_empty());
    }
}
