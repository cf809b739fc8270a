// lib.rs - ngdist library root

//! # ngdist - Pairwise n-gram distance and similarity engine
//!
//! This library implements a family of distance/similarity measures
//! between two ordered sequences of discrete symbols (phonetic segments,
//! characters, or tokens): dynamic-programming alignment with several
//! recurrence variants, n-gram extraction with boundary padding, and
//! multiset-overlap statistics, all sharing one normalization contract.
//!
//! ## Features
//!
//! - **One generic matrix builder**: the binary/weighted/positional x
//!   bigram/trigram x distance/similarity variants are configuration
//!   data, not separate algorithms
//! - **Plugin registry**: built-in metric table plus custom
//!   registrations through the same validation gate
//! - **Stateless and parallel-safe**: every call allocates its own
//!   matrix/multisets; all-pairs matrices parallelize with rayon
//! - **Raw and normalized modes**: raw scores are distances (0 =
//!   identical), normalized scores map into [0,1]
//!
//! ## Basic Usage
//!
//! ```rust
//! use ngdist::prelude::*;
//!
//! let registry = MetricRegistry::new();
//! let kitten: Vec<char> = "kitten".chars().collect();
//! let sitting: Vec<char> = "sitting".chars().collect();
//!
//! let raw = registry.compute("exact-levenshtein", &kitten, &sitting, false)?;
//! assert_eq!(raw, 3.0);
//!
//! let normalized = registry.compute("dice", &kitten, &sitting, true)?;
//! assert!((0.0..=1.0).contains(&normalized));
//! # Ok::<(), ngdist::EngineError>(())
//! ```

// Re-export all main modules
pub mod core;
pub mod error;
pub mod metrics;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::core::{compute_distance_matrix, extract};
    pub use crate::core::{LocalCompare, NGram, OverlapKind, Recurrence, Symbol, Token};
    pub use crate::error::EngineError;
    pub use crate::metrics::{compute_with_spec, MetricRegistry, MetricSpec};
}

// Re-export main types at the root level for convenience
pub use crate::core::{compute_distance_matrix, LocalCompare, OverlapKind, Recurrence, Symbol};
pub use crate::error::EngineError;
pub use crate::metrics::{MetricRegistry, MetricSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
