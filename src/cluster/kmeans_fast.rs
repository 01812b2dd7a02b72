//! K-means with batched distance, argmin and mean operations.
//!
//! Same contract as [`Kmeans`](super::Kmeans): same initialization, same
//! strict-`<` tie-break, same exact fixed-point stop. Only the mechanics
//! differ:
//!
//! - **Assign**: one `N × k` matrix from
//!   [`pairwise_distances`](crate::distance::pairwise_distances), then a
//!   row-wise argmin.
//! - **Update**: rows are bucketed by label once, and each center is the
//!   `mean_axis` of its gathered rows.
//!
//! Floating-point summation order may differ from the naive loops, so centers
//! are not guaranteed bit-identical. Assignments on well-separated data are.
//!
//! With the `parallel` feature the distance matrix and the argmin are computed
//! with rayon; results do not change.

use super::init::{check_cluster_count, fill_empty_cluster, initial_centers, rng_from_seed};
use super::init::{EmptyCluster, Init};
use super::kmeans::KmeansFit;
use super::traits::Clustering;
use crate::distance::{argmin, pairwise_distances};
use crate::error::Result;
use ndarray::{Array2, ArrayView2, Axis};
use rand::Rng;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Vectorized K-means.
#[derive(Debug, Clone)]
pub struct KmeansFast {
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

impl KmeansFast {
    /// Create a new vectorized K-means clusterer.
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

    /// Set random seed.
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
        debug!(n, d, k = self.k, max_iter = self.max_iter, "kmeans_fast start");

        let mut centers = initial_centers(data, self.k, self.init, rng);
        let mut labels = vec![0usize; n];
        let mut n_iter = 0;
        let mut converged = false;

        for iter in 0..self.max_iter {
            n_iter = iter + 1;

            let dist = pairwise_distances(data, centers.view())?;
            assign_nearest(dist.view(), &mut labels);

            let new_centers = self.update(data, &labels, centers.view(), rng);

            trace!(iter, "kmeans_fast round");

            if new_centers == centers {
                converged = true;
                break;
            }
            centers = new_centers;
        }

        debug!(n_iter, converged, "kmeans_fast done");
        Ok(KmeansFit {
            labels,
            centroids: centers,
            n_iter,
            converged,
        })
    }

    /// Per-cluster means in one bucketing pass plus one reduction per cluster.
    fn update<R: Rng>(
        &self,
        data: ArrayView2<'_, f64>,
        labels: &[usize],
        previous: ArrayView2<'_, f64>,
        rng: &mut R,
    ) -> Array2<f64> {
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); self.k];
        for (i, &c) in labels.iter().enumerate() {
            members[c].push(i);
        }

        let mut new_centers = Array2::zeros((self.k, data.ncols()));
        for (c, idxs) in members.iter().enumerate() {
            match data.select(Axis(0), idxs).mean_axis(Axis(0)) {
                Some(mean) => new_centers.row_mut(c).assign(&mean),
                None => fill_empty_cluster(
                    new_centers.row_mut(c),
                    previous.row(c),
                    data,
                    c,
                    self.empty_cluster,
                    rng,
                ),
            }
        }
        new_centers
    }
}

/// Row-wise argmin of an `N × k` distance matrix into `labels`.
fn assign_nearest(dist: ArrayView2<'_, f64>, labels: &mut [usize]) {
    #[cfg(feature = "parallel")]
    labels
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, label)| *label = argmin(dist.row(i)));

    #[cfg(not(feature = "parallel"))]
    for (label, row) in labels.iter_mut().zip(dist.rows()) {
        *label = argmin(row);
    }
}

impl Clustering for KmeansFast {
    fn fit_predict(&self, data: ArrayView2<'_, f64>) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
