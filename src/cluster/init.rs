//! Center initialization and empty-cluster handling shared by both k-means
//! implementations.
//!
//! Keeping these in one place is what lets the naive and vectorized variants
//! start from identical centers (and consume the RNG identically) when given
//! the same seed.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};
use rand::prelude::*;
use tracing::warn;

/// How initial centers are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Init {
    /// `k` distinct rows sampled uniformly without replacement.
    #[default]
    Random,
    /// k-means++: first center uniform, the rest sampled proportional to D(x)².
    PlusPlus,
}

/// What the update step does with a cluster that received no points.
///
/// The mean of zero points is undefined; instead of producing NaN centers one
/// of these explicit fallbacks is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCluster {
    /// Keep the cluster's previous center unchanged.
    #[default]
    KeepPrevious,
    /// Replace the center with a uniformly drawn data row.
    Reseed,
}

/// `N >= k >= 1`, or [`Error::InvalidClusterCount`].
pub(crate) fn check_cluster_count(k: usize, n_items: usize) -> Result<()> {
    if k == 0 || k > n_items {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items,
        });
    }
    Ok(())
}

/// RNG for the seed-based entry points.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Pick `k` initial centers from the rows of `data`.
///
/// Callers must have validated `1 <= k <= data.nrows()`.
pub(crate) fn initial_centers<R: Rng>(
    data: ArrayView2<'_, f64>,
    k: usize,
    init: Init,
    rng: &mut R,
) -> Array2<f64> {
    match init {
        Init::Random => {
            let idxs = rand::seq::index::sample(rng, data.nrows(), k).into_vec();
            data.select(Axis(0), &idxs)
        }
        Init::PlusPlus => plus_plus(data, k, rng),
    }
}

fn plus_plus<R: Rng>(data: ArrayView2<'_, f64>, k: usize, rng: &mut R) -> Array2<f64> {
    let n = data.nrows();
    let mut centers = Array2::zeros((k, data.ncols()));

    let first = rng.random_range(0..n);
    centers.row_mut(0).assign(&data.row(first));

    // Squared distance from each point to its nearest chosen center.
    let mut nearest: Vec<f64> = data
        .rows()
        .into_iter()
        .map(|p| squared(p, centers.row(0)))
        .collect();

    for c in 1..k {
        let total: f64 = nearest.iter().sum();
        let selected = if total > 0.0 {
            pick_weighted(&nearest, rng.random::<f64>() * total)
        } else {
            rng.random_range(0..n)
        };

        centers.row_mut(c).assign(&data.row(selected));
        for (j, best) in nearest.iter_mut().enumerate() {
            *best = best.min(squared(data.row(j), centers.row(c)));
        }
    }

    centers
}

/// First index whose running weight sum reaches `threshold`, skipping
/// zero-weight entries. If rounding leaves the sum short, the last positive
/// weight is taken. Needs at least one positive weight.
fn pick_weighted(weights: &[f64], threshold: f64) -> usize {
    let mut cumsum = 0.0;
    let mut last_positive = 0;
    for (j, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            cumsum += w;
            last_positive = j;
            if cumsum >= threshold {
                return j;
            }
        }
    }
    last_positive
}

#[inline]
fn squared(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Apply the empty-cluster policy to center `cluster`.
pub(crate) fn fill_empty_cluster<R: Rng>(
    mut slot: ArrayViewMut1<'_, f64>,
    previous: ArrayView1<'_, f64>,
    data: ArrayView2<'_, f64>,
    cluster: usize,
    policy: EmptyCluster,
    rng: &mut R,
) {
    warn!(cluster, ?policy, "cluster received no points");
    match policy {
        EmptyCluster::KeepPrevious => slot.assign(&previous),
        EmptyCluster::Reseed => {
            let idx = rng.random_range(0..data.nrows());
            slot.assign(&data.row(idx));
        }
    }
}
