//! Hierarchical (agglomerative) clustering with centroid linkage.
//!
//! Bottom-up: every point starts as its own cluster, then the two clusters
//! whose centroids are closest are merged until `n_clusters` remain.
//!
//! # Bookkeeping
//!
//! Cluster labels are kept **contiguous**: cluster `c` is row `c` of the
//! centroid list and of the distance table. Merging `lower < higher`:
//!
//! 1. Points labeled `higher` are relabeled `lower`.
//! 2. The centroid of `lower` becomes the mean of all its points.
//! 3. Row/column `higher` is removed, and every label above `higher`
//!    shifts down by one so labels keep matching row indices.
//! 4. Only row/column `lower` of the distance table is recomputed.
//!
//! # Tie-breaking
//!
//! The closest pair is found by scanning the upper triangle row-major with a
//! strict `<`: the first minimal `(i, j)`, `i < j`, wins. This is the same
//! pair a row-major scan of the full symmetric matrix would find first.
//!
//! # Cost
//!
//! The distance table is a dense `m × m` matrix, so memory is O(N²) and every
//! merge scans O(m²) entries. Keep N in the low thousands.

use super::init::check_cluster_count;
use super::traits::Clustering;
use crate::distance::euclidean;
use crate::error::Result;
use ndarray::{Array1, ArrayView2};
use tracing::{debug, trace};

/// One merge step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Surviving label.
    pub lower: usize,
    /// Label that was folded into `lower` (and then removed).
    pub higher: usize,
    /// Centroid distance between the two clusters at merge time.
    pub distance: f64,
    /// Active cluster count after this merge.
    pub n_clusters: usize,
}

/// Result of an agglomerative run.
#[derive(Debug, Clone, PartialEq)]
pub struct AgglomerativeFit {
    /// Cluster label per row, in `[0, n_clusters)`.
    pub labels: Vec<usize>,
    /// Merges in the order they happened.
    pub merges: Vec<Merge>,
}

/// Agglomerative clustering down to a fixed number of clusters.
#[derive(Debug, Clone)]
pub struct HierarchicalClustering {
    /// Number of clusters to produce.
    n_clusters: usize,
}

impl HierarchicalClustering {
    /// Create a new hierarchical clusterer.
    pub fn new(n_clusters: usize) -> Self {
        Self { n_clusters }
    }

    /// Run the merges and return labels plus merge history.
    pub fn fit(&self, data: ArrayView2<'_, f64>) -> Result<AgglomerativeFit> {
        let (n, d) = data.dim();
        check_cluster_count(self.n_clusters, n)?;
        debug!(n, d, k = self.n_clusters, "agglomerative start");

        let mut labels: Vec<usize> = (0..n).collect();
        let mut centers: Vec<Array1<f64>> = data.rows().into_iter().map(|r| r.to_owned()).collect();
        let mut table = DistanceTable::from_points(data);
        let mut active = n;
        let mut merges = Vec::with_capacity(n - self.n_clusters);

        while active > self.n_clusters {
            let (lower, higher, distance) = table.closest_pair();

            let mut sum = Array1::<f64>::zeros(d);
            let mut size = 0usize;
            for (i, label) in labels.iter_mut().enumerate() {
                if *label == higher {
                    *label = lower;
                } else if *label > higher {
                    *label -= 1;
                }
                if *label == lower {
                    sum += &data.row(i);
                    size += 1;
                }
            }

            centers[lower] = sum / size as f64;
            centers.remove(higher);
            table.remove(higher);
            table.refresh(lower, &centers);

            active -= 1;
            trace!(lower, higher, distance, active, "merge");
            merges.push(Merge {
                lower,
                higher,
                distance,
                n_clusters: active,
            });
        }

        debug_assert_eq!(centers.len(), active);
        debug!(merges = merges.len(), "agglomerative done");
        Ok(AgglomerativeFit { labels, merges })
    }
}

impl Clustering for HierarchicalClustering {
    fn fit_predict(&self, data: ArrayView2<'_, f64>) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

/// Dense symmetric centroid-distance matrix with an infinite diagonal.
///
/// Rows live in a `Vec<Vec<f64>>` so a cluster's row and column can be
/// dropped in place when it is merged away.
#[derive(Debug)]
struct DistanceTable {
    rows: Vec<Vec<f64>>,
}

impl DistanceTable {
    fn from_points(data: ArrayView2<'_, f64>) -> Self {
        let m = data.nrows();
        let mut rows = vec![vec![f64::INFINITY; m]; m];
        for i in 0..m {
            let row_i = data.row(i);
            for j in (i + 1)..m {
                let dist = euclidean(row_i, data.row(j));
                rows[i][j] = dist;
                rows[j][i] = dist;
            }
        }
        Self { rows }
    }

    /// `(i, j, d)` with `i < j` and minimal `d`; first found in row-major
    /// upper-triangle order. Needs at least two rows.
    fn closest_pair(&self) -> (usize, usize, f64) {
        let mut best = (0, 1, self.rows[0][1]);
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &dist) in row.iter().enumerate().skip(i + 1) {
                if dist < best.2 {
                    best = (i, j, dist);
                }
            }
        }
        best
    }

    fn remove(&mut self, idx: usize) {
        self.rows.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
    }

    fn refresh(&mut self, idx: usize, centers: &[Array1<f64>]) {
        for j in 0..centers.len() {
            let dist = if j == idx {
                f64::INFINITY
            } else {
                euclidean(centers[idx].view(), centers[j].view())
            };
            self.rows[idx][j] = dist;
            self.rows[j][idx] = dist;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{condensed_distances, pairwise_distances};
    use ndarray::{array, Array2};

    #[test]
    fn test_hierarchical_basic() {
        let data = array![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0], [10.1, 10.1]];

        let labels = HierarchicalClustering::new(2).fit_predict(data.view()).unwrap();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_merge_history_counts_down() {
        let data = array![[0.0], [1.0], [3.0], [7.0], [15.0]];
        let fit = HierarchicalClustering::new(1).fit(data.view()).unwrap();

        assert_eq!(fit.merges.len(), 4);
        for (step, merge) in fit.merges.iter().enumerate() {
            assert_eq!(merge.n_clusters, 4 - step);
            assert!(merge.lower < merge.higher);
        }
        assert!(fit.labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_centroid_linkage_order() {
        // 0,1 merge first (d=1); centroid 0.5 is then 2.5 from 3.0.
        let data = array![[0.0], [1.0], [3.0], [7.0]];
        let fit = HierarchicalClustering::new(2).fit(data.view()).unwrap();

        assert_eq!(fit.merges[0].lower, 0);
        assert_eq!(fit.merges[0].higher, 1);
        assert!((fit.merges[0].distance - 1.0).abs() < 1e-12);
        // Labels are now [0, 0, 1, 2]; the next merge joins 0 and 1.
        assert_eq!(fit.merges[1].lower, 0);
        assert_eq!(fit.merges[1].higher, 1);
        assert!((fit.merges[1].distance - 2.5).abs() < 1e-12);
        assert_eq!(fit.labels, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_relabel_keeps_labels_contiguous() {
        // The first merge removes label 2; label 3 must shift to 2.
        let data = array![[0.0], [100.0], [100.5], [300.0]];
        let fit = HierarchicalClustering::new(3).fit(data.view()).unwrap();
        assert_eq!(fit.labels, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_tie_takes_first_pair_row_major() {
        // d(0,1) == d(1,2) == 1; (0, 1) comes first.
        let data = array![[0.0], [1.0], [2.0]];
        let fit = HierarchicalClustering::new(2).fit(data.view()).unwrap();
        assert_eq!((fit.merges[0].lower, fit.merges[0].higher), (0, 1));
        assert_eq!(fit.labels, vec![0, 0, 1]);
    }

    #[test]
    fn test_k_equals_n_is_identity() {
        let data = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let fit = HierarchicalClustering::new(3).fit(data.view()).unwrap();
        assert_eq!(fit.labels, vec![0, 1, 2]);
        assert!(fit.merges.is_empty());
    }

    #[test]
    fn test_table_matches_condensed_layout() {
        let data = array![[0.0, 0.0], [3.0, 4.0], [1.0, 1.0], [-2.0, 0.5]];
        let table = DistanceTable::from_points(data.view());
        let condensed = condensed_distances(data.view());

        let mut k = 0;
        for i in 0..4 {
            assert!(table.rows[i][i].is_infinite());
            for j in (i + 1)..4 {
                assert_eq!(table.rows[i][j], condensed[k]);
                assert_eq!(table.rows[j][i], condensed[k]);
                k += 1;
            }
        }
    }

    #[test]
    fn test_incremental_table_matches_recompute() {
        let data = array![[0.0, 0.0], [0.5, 0.2], [4.0, 4.0], [4.2, 3.9], [9.0, 1.0], [8.5, 1.5]];
        let mut centers: Vec<Array1<f64>> = data.rows().into_iter().map(|r| r.to_owned()).collect();
        let mut table = DistanceTable::from_points(data.view());

        // Merge 0 and 1 by hand.
        centers[0] = (&centers[0] + &centers[1]) / 2.0;
        centers.remove(1);
        table.remove(1);
        table.refresh(0, &centers);

        let flat: Vec<f64> = centers.iter().flat_map(|c| c.iter().copied()).collect();
        let stacked = Array2::from_shape_vec((centers.len(), 2), flat).unwrap();
        let full = pairwise_distances(stacked.view(), stacked.view()).unwrap();
        for i in 0..centers.len() {
            assert!(table.rows[i][i].is_infinite());
            for j in 0..centers.len() {
                if i != j {
                    assert!((table.rows[i][j] - full[[i, j]]).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_k_larger_than_n_error() {
        let data = array![[0.0], [1.0]];
        assert!(HierarchicalClustering::new(3).fit(data.view()).is_err());
        assert!(HierarchicalClustering::new(0).fit(data.view()).is_err());
    }
}
