//! K-means clustering, reference form.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centers (k distinct rows, or k-means++)
//! 2. **Assign**: each point → nearest center
//! 3. **Update**: each center → mean of its assigned points
//! 4. Stop when the update leaves every center bit-for-bit unchanged,
//!    or after `max_iter` rounds
//!
//! This version spells out every point/center pair with explicit loops. It is
//! the yardstick [`KmeansFast`](super::KmeansFast) is checked against: with the
//! same seed both start from the same centers and break ties the same way
//! (strict `<`, lowest center index wins).
//!
//! Running out of iterations is not an error; the last assignment is returned.

use super::init::{check_cluster_count, fill_empty_cluster, initial_centers, rng_from_seed};
use super::init::{EmptyCluster, Init};
use super::traits::Clustering;
use crate::distance::{argmin, euclidean, pairwise_distances};
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use tracing::{debug, trace};

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Cluster label per row, in `[0, k)`.
    pub labels: Vec<usize>,
    /// `k × D` centers after the last update step. When `converged` these are
    /// exactly the centers `labels` were assigned against.
    pub centroids: Array2<f64>,
    /// Assignment/update rounds performed.
    pub n_iter: usize,
    /// Whether the fixed point was reached before `max_iter`.
    pub converged: bool,
}

impl KmeansFit {
    /// Assign each row of `data` to its nearest centroid (lowest index on ties).
    pub fn predict(&self, data: ArrayView2<'_, f64>) -> Result<Vec<usize>> {
        if data.ncols() != self.centroids.ncols() {
            return Err(Error::DimensionMismatch {
                expected: self.centroids.ncols(),
                found: data.ncols(),
            });
        }
        let dist = pairwise_distances(data, self.centroids.view())?;
        Ok(dist.rows().into_iter().map(argmin).collect())
    }
}

/// K-means with explicit per-point, per-center loops.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Center initialization.
    init: Init,
    /// Empty-cluster fallback.
    empty_cluster: EmptyCluster,
    /// Random seed.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            init: Init::Random,
            empty_cluster: EmptyCluster::KeepPrevious,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the initialization strategy.
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Set the empty-cluster policy.
    pub fn with_empty_cluster(mut self, policy: EmptyCluster) -> Self {
        self.empty_cluster = policy;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit using the configured seed (or OS entropy when unset).
    pub fn fit(&self, data: ArrayView2<'_, f64>) -> Result<KmeansFit> {
        let mut rng = rng_from_seed(self.seed);
        self.fit_with_rng(data, &mut rng)
    }

    /// Fit drawing all randomness from `rng`.
    pub fn fit_with_rng<R: Rng>(&self, data: ArrayView2<'_, f64>, rng: &mut R) -> Result<KmeansFit> {
        let (n, d) = data.dim();
        check_cluster_count(self.k, n)?;
        debug!(n, d, k = self.k, max_iter = self.max_iter, "kmeans start");

        let mut centers = initial_centers(data, self.k, self.init, rng);
        let mut labels = vec![0usize; n];
        let mut n_iter = 0;
        let mut converged = false;

        for iter in 0..self.max_iter {
            n_iter = iter + 1;

            // Assignment step
            for (i, label) in labels.iter_mut().enumerate() {
                let point = data.row(i);
                let mut best_cluster = 0;
                let mut best_dist = f64::INFINITY;

                for c in 0..self.k {
                    let dist = euclidean(point, centers.row(c));
                    if dist < best_dist {
                        best_dist = dist;
                        best_cluster = c;
                    }
                }
                *label = best_cluster;
            }

            // Update step
            let mut new_centers = Array2::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];

            for (i, &c) in labels.iter().enumerate() {
                for j in 0..d {
                    new_centers[[c, j]] += data[[i, j]];
                }
                counts[c] += 1;
            }

            for (c, &count) in counts.iter().enumerate() {
                if count > 0 {
                    for j in 0..d {
                        new_centers[[c, j]] /= count as f64;
                    }
                } else {
                    fill_empty_cluster(
                        new_centers.row_mut(c),
                        centers.row(c),
                        data,
                        c,
                        self.empty_cluster,
                        rng,
                    );
                }
            }

            trace!(iter, "kmeans round");

            if new_centers == centers {
                converged = true;
                break;
            }
            centers = new_centers;
        }

        debug!(n_iter, converged, "kmeans done");
        Ok(KmeansFit {
            labels,
            centroids: centers,
            n_iter,
            converged,
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: ArrayView2<'_, f64>) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
