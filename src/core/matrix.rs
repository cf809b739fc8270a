// matrix.rs - Generic dynamic-programming scoring table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ngram::{extract, NGram, Symbol, Token};

/// Local comparison rule applied to a pair of alignment units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalCompare {
    /// Units either match exactly or not at all.
    ExactEquality,
    /// Fractional penalty/credit from the multiset difference or
    /// intersection of the two grams' symbols.
    SymmetricDifference,
    /// Fractional penalty/credit from position-wise symbol agreement.
    Positional,
    /// Exact equality plus a unit-cost shortcut for adjacent swaps.
    MetathesisAware,
}

/// Cell-update policy for the interior of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    /// Levenshtein family: boundary is the cumulative insert/delete cost,
    /// interior minimizes edit cost.
    MinimizeEditCost,
    /// LCS family: boundary is zero, interior maximizes accumulated match
    /// credit.
    MaximizeCommonSubsequence,
}

/// A (|A|+1) x (|B|+1) scoring table stored row-major; row and column 0
/// represent the empty-prefix boundary.
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl ScoreMatrix {
    /// Boundary initialized to the cumulative index: cell(i,0) = i,
    /// cell(0,j) = j.
    fn with_cost_boundary(rows: usize, cols: usize) -> Self {
        let mut m = Self::zeroed(rows, cols);
        for i in 0..rows {
            m.set(i, 0, i as f64);
        }
        for j in 0..cols {
            m.set(0, j, j as f64);
        }
        m
    }

    /// Boundary initialized to zero, the identity of the max recurrence.
    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.cells[i * self.cols + j] = value;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bottom-right cell, the minimal cost / maximal score over the full
    /// sequences.
    pub fn final_score(&self) -> f64 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Size of the multiset symmetric difference between two grams.
fn multiset_sym_diff<S: Symbol>(a: &NGram<S>, b: &NGram<S>) -> usize {
    let mut balance: HashMap<&Token<S>, isize> = HashMap::new();
    for token in a {
        *balance.entry(token).or_insert(0) += 1;
    }
    for token in b {
        *balance.entry(token).or_insert(0) -= 1;
    }
    balance.values().map(|c| c.unsigned_abs()).sum()
}

/// Size of the multiset intersection between two grams.
fn multiset_intersection<S: Symbol>(a: &NGram<S>, b: &NGram<S>) -> usize {
    let mut remaining: HashMap<&Token<S>, usize> = HashMap::new();
    for token in a {
        *remaining.entry(token).or_insert(0) += 1;
    }
    let mut shared = 0;
    for token in b {
        if let Some(count) = remaining.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }
    shared
}

/// Count of positions where the two grams carry the same token.
fn positional_matches<S: Symbol>(a: &NGram<S>, b: &NGram<S>) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x == y).count()
}

/// Substitution penalty for the cost recurrence: 0 on an exact match,
/// otherwise the rule's fractional mismatch in (0, 1].
fn mismatch_penalty<S: Symbol>(local: LocalCompare, a: &NGram<S>, b: &NGram<S>) -> f64 {
    if a == b {
        return 0.0;
    }
    match local {
        LocalCompare::ExactEquality | LocalCompare::MetathesisAware => 1.0,
        LocalCompare::SymmetricDifference => {
            multiset_sym_diff(a, b) as f64 / (2 * a.len()) as f64
        }
        LocalCompare::Positional => {
            (a.len() - positional_matches(a, b)) as f64 / a.len() as f64
        }
    }
}

/// Match credit for the score recurrence, in [0, 1].
fn match_credit<S: Symbol>(local: LocalCompare, a: &NGram<S>, b: &NGram<S>) -> f64 {
    match local {
        LocalCompare::ExactEquality | LocalCompare::MetathesisAware => {
            if a == b {
                1.0
            } else {
                0.0
            }
        }
        LocalCompare::SymmetricDifference => {
            multiset_intersection(a, b) as f64 / a.len() as f64
        }
        LocalCompare::Positional => positional_matches(a, b) as f64 / a.len() as f64,
    }
}

/// Fill the full table for two unit sequences under the given local
/// comparison and recurrence policy.
pub fn build<S: Symbol>(
    units_a: &[NGram<S>],
    units_b: &[NGram<S>],
    local: LocalCompare,
    recurrence: Recurrence,
) -> ScoreMatrix {
    let (la, lb) = (units_a.len(), units_b.len());
    let mut m = match recurrence {
        Recurrence::MinimizeEditCost => ScoreMatrix::with_cost_boundary(la + 1, lb + 1),
        Recurrence::MaximizeCommonSubsequence => ScoreMatrix::zeroed(la + 1, lb + 1),
    };

    for i in 1..=la {
        for j in 1..=lb {
            let cell = match recurrence {
                Recurrence::MinimizeEditCost => {
                    let substitution =
                        m.get(i - 1, j - 1) + mismatch_penalty(local, &units_a[i - 1], &units_b[j - 1]);
                    let mut best = (m.get(i, j - 1) + 1.0)
                        .min(m.get(i - 1, j) + 1.0)
                        .min(substitution);
                    // Adjacent-swap shortcut at unit cost (restricted
                    // Damerau edit distance).
                    if local == LocalCompare::MetathesisAware
                        && i > 1
                        && j > 1
                        && units_a[i - 1] == units_b[j - 2]
                        && units_a[i - 2] == units_b[j - 1]
                    {
                        best = best.min(m.get(i - 2, j - 2) + 1.0);
                    }
                    best
                }
                Recurrence::MaximizeCommonSubsequence => match local {
                    LocalCompare::ExactEquality | LocalCompare::MetathesisAware => {
                        if units_a[i - 1] == units_b[j - 1] {
                            m.get(i - 1, j - 1) + 1.0
                        } else {
                            m.get(i, j - 1).max(m.get(i - 1, j))
                        }
                    }
                    _ => {
                        let credit = match_credit(local, &units_a[i - 1], &units_b[j - 1]);
                        m.get(i, j - 1)
                            .max(m.get(i - 1, j))
                            .max(m.get(i - 1, j - 1) + credit)
                    }
                },
            };
            m.set(i, j, cell);
        }
    }
    m
}

/// Full matrix-based comparison: extract n-gram views, fill the table and
/// apply the shared output contract.
///
/// Raw mode returns a distance for both recurrences: the bottom-right
/// cell for cost minimization, `max(|A|,|B|) - cell` for score
/// maximization. Normalized mode divides by `max(|A|,|B|)` (unit counts),
/// with 0 defined for the empty-vs-empty comparison.
pub fn alignment_score<S: Symbol>(
    a: &[S],
    b: &[S],
    n: usize,
    local: LocalCompare,
    recurrence: Recurrence,
    normalized: bool,
) -> f64 {
    let units_a = extract(a, n);
    let units_b = extract(b, n);
    let matrix = build(&units_a, &units_b, local, recurrence);

    let longest = units_a.len().max(units_b.len()) as f64;
    let raw = match recurrence {
        Recurrence::MinimizeEditCost => matrix.final_score(),
        Recurrence::MaximizeCommonSubsequence => longest - matrix.final_score(),
    };
    if normalized {
        if longest == 0.0 {
            0.0
        } else {
            raw / longest
        }
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn score(
        a: &str,
        b: &str,
        n: usize,
        local: LocalCompare,
        recurrence: Recurrence,
        normalized: bool,
    ) -> f64 {
        alignment_score(&chars(a), &chars(b), n, local, recurrence, normalized)
    }

    #[test]
    fn test_classic_levenshtein() {
        let d = score(
            "kitten",
            "sitting",
            1,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
            false,
        );
        assert_eq!(d, 3.0);
    }

    #[test]
    fn test_cost_boundary_initialization() {
        let units_a = extract(&chars("ab"), 1);
        let units_b = extract(&chars("xyz"), 1);
        let m = build(
            &units_a,
            &units_b,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
        );
        for i in 0..m.rows() {
            assert_eq!(m.get(i, 0), i as f64);
        }
        for j in 0..m.cols() {
            assert_eq!(m.get(0, j), j as f64);
        }
    }

    #[test]
    fn test_transposition_shortcut() {
        let plain = score(
            "ab",
            "ba",
            1,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
            false,
        );
        let swapped = score(
            "ab",
            "ba",
            1,
            LocalCompare::MetathesisAware,
            Recurrence::MinimizeEditCost,
            false,
        );
        assert_eq!(plain, 2.0);
        assert_eq!(swapped, 1.0);
    }

    #[test]
    fn test_lcs_distance() {
        let d = score(
            "abcd",
            "acbd",
            1,
            LocalCompare::ExactEquality,
            Recurrence::MaximizeCommonSubsequence,
            false,
        );
        assert_eq!(d, 1.0); // LCS "abd" (or "acd") of length 3

        let identical = score(
            "abc",
            "abc",
            1,
            LocalCompare::ExactEquality,
            Recurrence::MaximizeCommonSubsequence,
            false,
        );
        assert_eq!(identical, 0.0);
    }

    #[test]
    fn test_binary_bigram_distance() {
        // No shared bigrams at all: pure insert/delete over 2 vs 2 units.
        let d = score(
            "a",
            "b",
            2,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
            false,
        );
        assert_eq!(d, 2.0);

        let identical = score(
            "ab",
            "ab",
            2,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
            false,
        );
        assert_eq!(identical, 0.0);
    }

    #[test]
    fn test_weighted_bigram_distance() {
        // "ab" vs "ac": the middle bigrams share one symbol, the trailing
        // bigrams share the pad; fractional penalties sum to 1.0.
        let d = score(
            "ab",
            "ac",
            2,
            LocalCompare::SymmetricDifference,
            Recurrence::MinimizeEditCost,
            false,
        );
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_positional_bigram_distance() {
        let d = score(
            "ab",
            "ac",
            2,
            LocalCompare::Positional,
            Recurrence::MinimizeEditCost,
            false,
        );
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_weighted_bigram_similarity() {
        let d = score(
            "ab",
            "ac",
            2,
            LocalCompare::SymmetricDifference,
            Recurrence::MaximizeCommonSubsequence,
            false,
        );
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_local_rules_are_symmetric() {
        let x: NGram<char> = vec![Token::Symbol('a'), Token::Symbol('a')];
        let y: NGram<char> = vec![Token::Symbol('a'), Token::Symbol('b')];
        assert_eq!(
            mismatch_penalty(LocalCompare::SymmetricDifference, &x, &y),
            mismatch_penalty(LocalCompare::SymmetricDifference, &y, &x),
        );
        assert_eq!(
            match_credit(LocalCompare::SymmetricDifference, &x, &y),
            match_credit(LocalCompare::SymmetricDifference, &y, &x),
        );
        assert_eq!(multiset_sym_diff(&x, &y), 2);
        assert_eq!(multiset_intersection(&x, &y), 1);
    }

    #[test]
    fn test_normalization_contract() {
        let raw = score(
            "kitten",
            "sitting",
            1,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
            false,
        );
        let norm = score(
            "kitten",
            "sitting",
            1,
            LocalCompare::ExactEquality,
            Recurrence::MinimizeEditCost,
            true,
        );
        assert_eq!(norm, raw / 7.0);

        // Both inputs empty: defined as zero distance, even normalized.
        let empty: Vec<char> = Vec::new();
        for recurrence in [
            Recurrence::MinimizeEditCost,
            Recurrence::MaximizeCommonSubsequence,
        ] {
            for n in 1..=3usize {
                let d = alignment_score(
                    &empty,
                    &empty,
                    n,
                    LocalCompare::ExactEquality,
                    recurrence,
                    true,
                );
                assert_eq!(d, 0.0);
            }
        }
    }
}
