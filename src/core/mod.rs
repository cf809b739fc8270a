// mod.rs - Core comparison engine module

pub mod matrix;
pub mod ngram;
pub mod overlap;
pub mod pairwise;

// Re-export main types for convenience
pub use matrix::{alignment_score, build, LocalCompare, Recurrence, ScoreMatrix};
pub use ngram::{extract, gram_counts, multi_gram_counts, skip_gram_counts};
pub use ngram::{NGram, Symbol, Token};
pub use overlap::{overlap_score, OverlapKind};
pub use pairwise::compute_distance_matrix;
