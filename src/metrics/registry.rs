// registry.rs - Metric registry and the single compute entry point

use std::collections::HashMap;

use tracing::debug;

use crate::core::matrix::{alignment_score, LocalCompare, Recurrence};
use crate::core::ngram::Symbol;
use crate::core::overlap::{overlap_score, OverlapKind};
use crate::error::EngineError;
use crate::metrics::spec::MetricSpec;

/// Registry mapping metric identifiers to their configurations.
///
/// Plain data behind `&self`: one registry can be shared across parallel
/// workers with no coordination.
pub struct MetricRegistry {
    metrics: HashMap<String, MetricSpec>,
}

impl MetricRegistry {
    /// Build a registry with the full built-in metric table.
    pub fn new() -> Self {
        use LocalCompare::*;
        use OverlapKind::*;
        use Recurrence::*;

        let mut registry = Self {
            metrics: HashMap::new(),
        };

        let alignment = |n, local, recurrence| MetricSpec::Alignment {
            n,
            local,
            recurrence,
        };

        let built_ins = [
            ("exact-levenshtein", alignment(1, ExactEquality, MinimizeEditCost)),
            ("levenshtein-with-transposition", alignment(1, MetathesisAware, MinimizeEditCost)),
            ("binary-bigram-distance", alignment(2, ExactEquality, MinimizeEditCost)),
            ("binary-trigram-distance", alignment(3, ExactEquality, MinimizeEditCost)),
            ("weighted-bigram-distance", alignment(2, SymmetricDifference, MinimizeEditCost)),
            ("weighted-trigram-distance", alignment(3, SymmetricDifference, MinimizeEditCost)),
            ("positional-bigram-distance", alignment(2, Positional, MinimizeEditCost)),
            ("positional-trigram-distance", alignment(3, Positional, MinimizeEditCost)),
            ("longest-common-subsequence", alignment(1, ExactEquality, MaximizeCommonSubsequence)),
            ("binary-bigram-similarity", alignment(2, ExactEquality, MaximizeCommonSubsequence)),
            ("binary-trigram-similarity", alignment(3, ExactEquality, MaximizeCommonSubsequence)),
            ("weighted-bigram-similarity", alignment(2, SymmetricDifference, MaximizeCommonSubsequence)),
            ("weighted-trigram-similarity", alignment(3, SymmetricDifference, MaximizeCommonSubsequence)),
            ("positional-bigram-similarity", alignment(2, Positional, MaximizeCommonSubsequence)),
            ("positional-trigram-similarity", alignment(3, Positional, MaximizeCommonSubsequence)),
            ("dice", MetricSpec::Overlap(Dice)),
            ("jaccard-bigram", MetricSpec::Overlap(JaccardBigram)),
            ("jaccard-ngram-1to3", MetricSpec::Overlap(JaccardMultiGram)),
            ("skip-gram-dice", MetricSpec::Overlap(SkipGramDice)),
            ("trigram-overlap", MetricSpec::Overlap(TrigramOverlap)),
            ("positional-dice", MetricSpec::Overlap(PositionalDice)),
            ("longest-common-prefix", MetricSpec::Overlap(CommonPrefix)),
            ("identity", MetricSpec::Overlap(Identity)),
        ];

        for (name, spec) in built_ins {
            // Built-in widths are all in range, so registration cannot fail.
            let _ = registry.register(name, spec);
        }
        registry
    }

    /// Register a metric under a name, validating its configuration.
    pub fn register(&mut self, name: &str, spec: MetricSpec) -> Result<(), EngineError> {
        if let MetricSpec::Alignment { n, .. } = spec {
            if !(1..=3).contains(&n) {
                return Err(EngineError::InvalidArgument(format!(
                    "n-gram width must be in 1..=3, got {}",
                    n
                )));
            }
        }
        self.metrics.insert(name.to_string(), spec);
        Ok(())
    }

    /// Check if a metric exists.
    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// Get a metric's configuration by name.
    pub fn get_spec(&self, name: &str) -> Option<&MetricSpec> {
        self.metrics.get(name)
    }

    /// All registered metric names.
    pub fn metric_names(&self) -> Vec<&str> {
        self.metrics.keys().map(|s| s.as_str()).collect()
    }

    /// Compare two sequences under a named metric.
    ///
    /// All metrics return a distance in raw mode (0 = identical) and a
    /// value in [0,1] in normalized mode. Fails only on an unknown
    /// metric name; length degeneracy resolves to boundary values.
    pub fn compute<S: Symbol>(
        &self,
        metric: &str,
        a: &[S],
        b: &[S],
        normalized: bool,
    ) -> Result<f64, EngineError> {
        let spec = self
            .get_spec(metric)
            .ok_or_else(|| EngineError::UnknownMetric(metric.to_string()))?;
        debug!(
            metric,
            len_a = a.len(),
            len_b = b.len(),
            normalized,
            "computing pairwise score"
        );
        Ok(compute_with_spec(spec, a, b, normalized))
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two sequences under an already-resolved configuration.
/// Infallible: validation happens at registration time.
pub fn compute_with_spec<S: Symbol>(
    spec: &MetricSpec,
    a: &[S],
    b: &[S],
    normalized: bool,
) -> f64 {
    match *spec {
        MetricSpec::Alignment {
            n,
            local,
            recurrence,
        } => alignment_score(a, b, n, local, recurrence, normalized),
        MetricSpec::Overlap(kind) => overlap_score(a, b, kind, normalized),
    }
}
