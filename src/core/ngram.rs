// ngram.rs - N-gram extraction with boundary padding and multiset counts

use std::collections::HashMap;
use std::hash::Hash;

/// Marker trait for the atomic tokens a sequence is made of.
///
/// Nothing beyond equality, hashing and ordering is assumed, so `char`,
/// `u8`, `&str`, `String` and small tuples all qualify through the
/// blanket impl.
pub trait Symbol: Clone + Eq + Hash + Ord + Send + Sync {}

impl<T: Clone + Eq + Hash + Ord + Send + Sync> Symbol for T {}

/// A single position inside a padded sequence: either the reserved pad
/// marker or an actual symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token<S> {
    Pad,
    Symbol(S),
}

/// An ordered window of exactly n tokens.
pub type NGram<S> = Vec<Token<S>>;

/// Pad `seq` with n-1 pad tokens on each side and emit every contiguous
/// window of width n, left to right.
///
/// Output length is `len(seq) + n - 1` for n >= 1; for n = 1 this
/// degenerates to the original sequence. Empty input never panics: the
/// window count is guarded with `max(0, padded_len - n + 1)`.
pub fn extract<S: Symbol>(seq: &[S], n: usize) -> Vec<NGram<S>> {
    if n == 0 {
        return Vec::new();
    }
    let pad = n - 1;
    let mut padded: Vec<Token<S>> = Vec::with_capacity(seq.len() + 2 * pad);
    padded.extend(std::iter::repeat_with(|| Token::Pad).take(pad));
    padded.extend(seq.iter().cloned().map(Token::Symbol));
    padded.extend(std::iter::repeat_with(|| Token::Pad).take(pad));

    let count = (padded.len() + 1).saturating_sub(n);
    (0..count).map(|i| padded[i..i + n].to_vec()).collect()
}

/// Multiset of unpadded n-gram windows, keyed by the window itself.
///
/// The overlap metrics count raw windows without boundary padding, so a
/// sequence shorter than n simply has no grams.
pub fn gram_counts<S: Symbol>(seq: &[S], n: usize) -> HashMap<Vec<S>, usize> {
    let mut counts = HashMap::new();
    if n == 0 || seq.len() < n {
        return counts;
    }
    for window in seq.windows(n) {
        *counts.entry(window.to_vec()).or_insert(0) += 1;
    }
    counts
}

/// Multiset of skip-grams: each symbol paired with the one two positions
/// ahead rather than its neighbour.
pub fn skip_gram_counts<S: Symbol>(seq: &[S]) -> HashMap<(S, S), usize> {
    let mut counts = HashMap::new();
    if seq.len() < 3 {
        return counts;
    }
    for i in 0..seq.len() - 2 {
        *counts
            .entry((seq[i].clone(), seq[i + 2].clone()))
            .or_insert(0) += 1;
    }
    counts
}

/// Combined multiset of all 1..=n gram slices over the padded sequence,
/// for the multi-width Jaccard metric.
///
/// Every start position except the last contributes one slice per width;
/// slices clamp at the padded end, so near-boundary widths collapse onto
/// shorter slices. Both sides are padded identically, which keeps the
/// overlap of a sequence with itself equal to its own multiset size.
pub fn multi_gram_counts<S: Symbol>(seq: &[S], n: usize) -> HashMap<NGram<S>, usize> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    let pad = n - 1;
    let mut padded: Vec<Token<S>> = Vec::with_capacity(seq.len() + 2 * pad);
    padded.extend(std::iter::repeat_with(|| Token::Pad).take(pad));
    padded.extend(seq.iter().cloned().map(Token::Symbol));
    padded.extend(std::iter::repeat_with(|| Token::Pad).take(pad));

    if padded.is_empty() {
        return counts;
    }
    for i in 0..padded.len() - 1 {
        for k in 1..=n {
            let end = (i + k).min(padded.len());
            *counts.entry(padded[i..end].to_vec()).or_insert(0) += 1;
        }
    }
    counts
}
