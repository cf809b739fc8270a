// overlap.rs - Multiset-overlap scores computed without a full matrix

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use super::ngram::{gram_counts, multi_gram_counts, skip_gram_counts, Symbol};

/// The overlap-based measures, all built on the same multiset
/// intersection primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapKind {
    /// Sorensen-Dice over bigrams.
    Dice,
    /// Jaccard over bigrams.
    JaccardBigram,
    /// Jaccard over the combined 1..=3-gram multisets of the padded
    /// sequences.
    JaccardMultiGram,
    /// Dice over skip-grams (symbol paired with the one two ahead).
    SkipGramDice,
    /// Dice over trigrams.
    TrigramOverlap,
    /// Dice with position-weighted overlap credit.
    PositionalDice,
    /// Longest shared leading-position run.
    CommonPrefix,
    /// Element-wise equality: 0 when equal, 1 otherwise.
    Identity,
}

/// Shared overlap primitive: sum over shared keys of the smaller count.
fn multiset_overlap<K: Eq + Hash>(a: &HashMap<K, usize>, b: &HashMap<K, usize>) -> usize {
    a.iter()
        .filter_map(|(key, count_a)| b.get(key).map(|count_b| *count_a.min(count_b)))
        .sum()
}

/// Dice-style raw/normalized output from an overlap count and the
/// combined gram budget.
fn dice_output(overlap: f64, total: f64, normalized: bool) -> f64 {
    if normalized {
        1.0 - 2.0 * overlap / total
    } else {
        total - 2.0 * overlap
    }
}

/// Sorensen-Dice over raw bigrams. Vacuous when neither side has a
/// bigram: returns a literal 0, not an error.
pub fn dice<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let la = a.len() as isize - 1;
    let lb = b.len() as isize - 1;
    if la <= 0 && lb <= 0 {
        return 0.0;
    }
    let overlap = multiset_overlap(&gram_counts(a, 2), &gram_counts(b, 2)) as f64;
    let total = (la.max(0) + lb.max(0)) as f64;
    dice_output(overlap, total, normalized)
}

/// Jaccard over raw bigrams: the union size is the denominator.
pub fn jaccard_bigram<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let la = a.len() as isize - 1;
    let lb = b.len() as isize - 1;
    if la <= 0 && lb <= 0 {
        return 0.0;
    }
    let overlap = multiset_overlap(&gram_counts(a, 2), &gram_counts(b, 2)) as f64;
    let total = (la.max(0) + lb.max(0)) as f64 - overlap;
    if normalized {
        1.0 - overlap / total
    } else {
        total - overlap
    }
}

/// Jaccard over the combined 1..=3-gram multisets of the padded
/// sequences. The union is taken over the multiset sizes themselves, so
/// the result stays non-negative and normalizes into [0,1].
pub fn jaccard_multigram<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let la = a.len() as isize - 1;
    let lb = b.len() as isize - 1;
    if la <= 0 && lb <= 0 {
        return 0.0;
    }
    let counts_a = multi_gram_counts(a, 3);
    let counts_b = multi_gram_counts(b, 3);
    let size_a: usize = counts_a.values().sum();
    let size_b: usize = counts_b.values().sum();
    let overlap = multiset_overlap(&counts_a, &counts_b) as f64;
    let total = (size_a + size_b) as f64 - overlap;
    if total == 0.0 {
        return 0.0;
    }
    if normalized {
        1.0 - overlap / total
    } else {
        total - overlap
    }
}

/// Dice over skip-grams. Vacuous when either side has none.
pub fn skip_gram_dice<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let la = a.len() as isize - 2;
    let lb = b.len() as isize - 2;
    if la < 1 || lb < 1 {
        return 0.0;
    }
    let overlap = multiset_overlap(&skip_gram_counts(a), &skip_gram_counts(b)) as f64;
    dice_output(overlap, (la + lb) as f64, normalized)
}

/// Dice over raw trigrams. Vacuous when either side has none.
pub fn trigram_overlap<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let la = a.len() as isize - 2;
    let lb = b.len() as isize - 2;
    if la < 1 || lb < 1 {
        return 0.0;
    }
    let overlap = multiset_overlap(&gram_counts(a, 3), &gram_counts(b, 3)) as f64;
    dice_output(overlap, (la + lb) as f64, normalized)
}

/// Position-weighted Dice: every pair of occurrences of a shared bigram
/// contributes 1/(1+(i-j)^2). Repeated bigrams can push the weighted
/// overlap past the gram budget, so the output is clamped to the
/// distance bounds.
pub fn positional_dice<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let la = a.len() as isize - 1;
    let lb = b.len() as isize - 1;
    if la <= 0 && lb <= 0 {
        return 0.0;
    }

    let mut positions_a: HashMap<&[S], Vec<usize>> = HashMap::new();
    for (i, window) in a.windows(2).enumerate() {
        positions_a.entry(window).or_default().push(i);
    }
    let mut positions_b: HashMap<&[S], Vec<usize>> = HashMap::new();
    for (j, window) in b.windows(2).enumerate() {
        positions_b.entry(window).or_default().push(j);
    }

    let mut overlap = 0.0;
    for (gram, pos_a) in &positions_a {
        if let Some(pos_b) = positions_b.get(gram) {
            for &i in pos_a {
                for &j in pos_b {
                    let offset = i as f64 - j as f64;
                    overlap += 1.0 / (1.0 + offset * offset);
                }
            }
        }
    }

    let total = (la.max(0) + lb.max(0)) as f64;
    if normalized {
        (1.0 - 2.0 * overlap / total).clamp(0.0, 1.0)
    } else {
        (total - 2.0 * overlap).max(0.0)
    }
}

/// Longest shared leading-position run.
pub fn common_prefix<S: Symbol>(a: &[S], b: &[S], normalized: bool) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    let run = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
    if normalized {
        1.0 - run as f64 / longest as f64
    } else {
        (longest - run) as f64
    }
}

/// Element-wise identity: raw and normalized coincide.
pub fn identity<S: Symbol>(a: &[S], b: &[S]) -> f64 {
    if a == b {
        0.0
    } else {
        1.0
    }
}

/// Dispatch an overlap measure by kind.
pub fn overlap_score<S: Symbol>(a: &[S], b: &[S], kind: OverlapKind, normalized: bool) -> f64 {
    match kind {
        OverlapKind::Dice => dice(a, b, normalized),
        OverlapKind::JaccardBigram => jaccard_bigram(a, b, normalized),
        OverlapKind::JaccardMultiGram => jaccard_multigram(a, b, normalized),
        OverlapKind::SkipGramDice => skip_gram_dice(a, b, normalized),
        OverlapKind::TrigramOverlap => trigram_overlap(a, b, normalized),
        OverlapKind::PositionalDice => positional_dice(a, b, normalized),
        OverlapKind::CommonPrefix => common_prefix(a, b, normalized),
        OverlapKind::Identity => identity(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_dice_hand_computed() {
        // Shared bigram "ht": overlap 1, total (5-1)+(5-1) = 8.
        let raw = dice(&chars("night"), &chars("nacht"), false);
        assert_eq!(raw, 6.0);
        let norm = dice(&chars("night"), &chars("nacht"), true);
        assert_eq!(norm, 0.75);
    }

    #[test]
    fn test_dice_vacuous_comparison() {
        // Single symbols have zero bigrams: defined as 0, not an error.
        assert_eq!(dice(&chars("a"), &chars("b"), false), 0.0);
        assert_eq!(dice(&chars(""), &chars(""), true), 0.0);
    }

    #[test]
    fn test_dice_one_sided() {
        // One side vacuous still compares against the other's budget.
        assert_eq!(dice(&chars("a"), &chars("abc"), false), 2.0);
        assert_eq!(dice(&chars("a"), &chars("abc"), true), 1.0);
    }

    #[test]
    fn test_jaccard_bigram() {
        // overlap 1, union 4+4-1 = 7.
        assert_eq!(jaccard_bigram(&chars("night"), &chars("nacht"), false), 6.0);
        let norm = jaccard_bigram(&chars("night"), &chars("nacht"), true);
        assert!((norm - (1.0 - 1.0 / 7.0)).abs() < 1e-12);
        assert_eq!(jaccard_bigram(&chars("ab"), &chars("ab"), false), 0.0);
    }

    #[test]
    fn test_jaccard_multigram() {
        assert_eq!(jaccard_multigram(&chars("ab"), &chars("ab"), false), 0.0);
        assert_eq!(jaccard_multigram(&chars("ab"), &chars("ab"), true), 0.0);

        let raw = jaccard_multigram(&chars("night"), &chars("nacht"), false);
        assert!(raw > 0.0);
        let norm = jaccard_multigram(&chars("night"), &chars("nacht"), true);
        assert!(norm > 0.0 && norm <= 1.0);

        // Vacuous when neither side has a bigram.
        assert_eq!(jaccard_multigram(&chars("a"), &chars("b"), false), 0.0);
    }

    #[test]
    fn test_skip_gram_dice() {
        // Skip-grams of "abcd": (a,c),(b,d); of "abed": (a,e),(b,d).
        assert_eq!(skip_gram_dice(&chars("abcd"), &chars("abed"), false), 2.0);
        assert_eq!(skip_gram_dice(&chars("abcd"), &chars("abed"), true), 0.5);
        assert_eq!(skip_gram_dice(&chars("ab"), &chars("abcd"), false), 0.0);
    }

    #[test]
    fn test_trigram_overlap() {
        // No shared trigrams between "night" and "nacht".
        assert_eq!(trigram_overlap(&chars("night"), &chars("nacht"), false), 6.0);
        assert_eq!(trigram_overlap(&chars("night"), &chars("nacht"), true), 1.0);
        // Either side too short is vacuous, not maximal.
        assert_eq!(trigram_overlap(&chars("ab"), &chars("night"), false), 0.0);
    }

    #[test]
    fn test_positional_dice_bounds() {
        assert_eq!(positional_dice(&chars("ab"), &chars("ab"), false), 0.0);
        // Repeated bigrams would overshoot the budget; clamped at zero.
        assert_eq!(positional_dice(&chars("aaa"), &chars("aaa"), false), 0.0);
        let norm = positional_dice(&chars("night"), &chars("nacht"), true);
        assert!((0.0..=1.0).contains(&norm));
    }

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix(&chars("abc"), &chars("abd"), false), 1.0);
        let norm = common_prefix(&chars("abc"), &chars("abd"), true);
        assert!((norm - 1.0 / 3.0).abs() < 1e-12);
        // The run stops at the first mismatch even if later positions agree.
        assert_eq!(common_prefix(&chars("axc"), &chars("ayc"), false), 2.0);
        assert_eq!(common_prefix(&chars(""), &chars(""), false), 0.0);
    }

    #[test]
    fn test_identity() {
        assert_eq!(identity(&chars("abc"), &chars("abc")), 0.0);
        assert_eq!(identity(&chars("abc"), &chars("abd")), 1.0);
        let empty: Vec<char> = Vec::new();
        assert_eq!(identity(&empty, &empty), 0.0);
    }
}
