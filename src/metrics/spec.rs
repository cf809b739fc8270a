// spec.rs - Immutable metric configuration records

use serde::{Deserialize, Serialize};

use crate::core::matrix::{LocalCompare, Recurrence};
use crate::core::overlap::OverlapKind;

/// Configuration of a single metric: either a matrix-based comparison
/// over n-gram views or a multiset-overlap measure.
///
/// Owned by the registry for the process lifetime and never mutated
/// after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricSpec {
    /// Dynamic-programming alignment over n-gram views of the inputs.
    Alignment {
        /// N-gram width; the registry accepts 1..=3.
        n: usize,
        local: LocalCompare,
        recurrence: Recurrence,
    },
    /// Multiset-overlap measure, no matrix involved.
    Overlap(OverlapKind),
}

impl MetricSpec {
    pub fn description(&self) -> &'static str {
        match self {
            MetricSpec::Alignment {
                recurrence: Recurrence::MinimizeEditCost,
                ..
            } => "edit-cost minimization over n-gram units",
            MetricSpec::Alignment {
                recurrence: Recurrence::MaximizeCommonSubsequence,
                ..
            } => "common-subsequence maximization over n-gram units",
            MetricSpec::Overlap(_) => "multiset n-gram overlap",
        }
    }
}
