// pairwise.rs - Parallel all-pairs distance matrix

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use crate::core::ngram::Symbol;
use crate::error::EngineError;
use crate::metrics::registry::{compute_with_spec, MetricRegistry};

/// Compute the full symmetric distance matrix over a corpus of
/// sequences.
///
/// Every comparison is independent, so the upper triangle decomposes
/// into N(N-1)/2 parallel `compute` calls; the diagonal is zero by the
/// identity property and the lower triangle is filled by symmetry.
pub fn compute_distance_matrix<S: Symbol>(
    registry: &MetricRegistry,
    metric: &str,
    seqs: &[Vec<S>],
    normalized: bool,
) -> Result<Vec<Vec<f64>>, EngineError> {
    // Resolve the metric once so the workers cannot fail.
    let spec = *registry
        .get_spec(metric)
        .ok_or_else(|| EngineError::UnknownMetric(metric.to_string()))?;

    let n_seqs = seqs.len();
    let mut matrix = vec![vec![0.0; n_seqs]; n_seqs];
    if n_seqs < 2 {
        return Ok(matrix);
    }

    let total_comparisons = n_seqs * (n_seqs - 1) / 2;
    let start = Instant::now();

    let pb = ProgressBar::new(total_comparisons as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    // Update the bar every 1% to keep contention low.
    let update_interval = std::cmp::max(1, total_comparisons / 100);
    let progress_counter = Arc::new(AtomicUsize::new(0));

    let upper_triangle: Vec<(usize, usize, f64)> = (0..n_seqs)
        .into_par_iter()
        .flat_map(|i| {
            let progress = progress_counter.clone();
            let pb = pb.clone();
            (i + 1..n_seqs).into_par_iter().map(move |j| {
                let distance = compute_with_spec(&spec, &seqs[i], &seqs[j], normalized);

                let count = progress.fetch_add(1, Ordering::Relaxed) + 1;
                if count % update_interval == 0 {
                    pb.set_position(count as u64);
                }

                (i, j, distance)
            })
        })
        .collect();

    pb.finish_and_clear();

    for (i, j, distance) in upper_triangle {
        matrix[i][j] = distance;
        matrix[j][i] = distance;
    }

    info!(
        metric,
        sequences = n_seqs,
        comparisons = total_comparisons,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "distance matrix computed"
    );

    Ok(matrix)
}
