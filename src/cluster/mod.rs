//! Clustering algorithms that partition N feature vectors into k groups.
//!
//! All three take an `N × D` matrix (`ArrayView2<f64>`), require
//! `1 <= k <= N`, and return one label per row in `[0, k)`.
//!
//! ## Algorithms
//!
//! ### K-means ([`Kmeans`], [`KmeansFast`])
//!
//! Assign each point to the nearest center, move each center to the mean of
//! its points, repeat until the centers stop moving (exact equality) or the
//! iteration cap is hit.
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! [`Kmeans`] is the loop-per-pair reference; [`KmeansFast`] batches the
//! distance matrix and the means. Given the same seed they start from the
//! same centers and produce the same assignments on well-separated data.
//!
//! Randomness comes only from center initialization ([`Init`]) and, if
//! enabled, [`EmptyCluster::Reseed`]. Pass a seed or your own RNG through
//! `fit_with_rng` for reproducible runs.
//!
//! ### Agglomerative ([`HierarchicalClustering`])
//!
//! Start with every point as its own cluster and merge the two closest
//! centroids until k remain. Deterministic, but O(N²) memory: keep N in the
//! low thousands.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::array;
//! use segclust::cluster::{Clustering, HierarchicalClustering, Kmeans, KmeansFast};
//!
//! let data = array![
//!     [0.0, 0.0],
//!     [0.1, 0.1],
//!     [10.0, 10.0],
//!     [10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(7).fit_predict(data.view()).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let fast = KmeansFast::new(2).with_seed(7).fit_predict(data.view()).unwrap();
//! assert_eq!(labels, fast);
//!
//! let labels = HierarchicalClustering::new(2).fit_predict(data.view()).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

mod hierarchical;
mod init;
mod kmeans;
mod kmeans_fast;
mod traits;

pub use hierarchical::{AgglomerativeFit, HierarchicalClustering, Merge};
pub use init::{EmptyCluster, Init};
pub use kmeans::{Kmeans, KmeansFit};
pub use kmeans_fast::KmeansFast;
pub use traits::Clustering;
