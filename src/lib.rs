//! # segclust
//!
//! Cluster per-pixel feature vectors into regions, then score a region map
//! against a ground-truth foreground mask.
//!
//! - [`cluster`]: k-means (naive and vectorized) and agglomerative clustering
//! - [`distance`]: Euclidean pairwise / condensed distances
//! - [`features`]: color and color+position pixel features
//! - [`metrics`]: pixel accuracy and best-segment evaluation
//!
//! ```rust
//! use ndarray::{array, Array3};
//! use segclust::{color_features, evaluate_segmentation, labels_to_segments};
//! use segclust::{Clustering, KmeansFast};
//!
//! // 2 × 2 RGB image: dark left column, bright right column.
//! let img = Array3::from_shape_fn((2, 2, 3), |(_, x, _)| x as f64);
//! let features = color_features(img.view());
//!
//! let labels = KmeansFast::new(2).with_seed(1).fit_predict(features.view()).unwrap();
//! let segments = labels_to_segments(&labels, 2, 2).unwrap();
//!
//! let truth = array![[false, true], [false, true]];
//! assert_eq!(evaluate_segmentation(truth.view(), segments.view()).unwrap(), 1.0);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod distance;
/// Error types used across `segclust`.
pub mod error;
pub mod features;
pub mod metrics;

pub use cluster::{
    AgglomerativeFit, Clustering, EmptyCluster, HierarchicalClustering, Init, Kmeans, KmeansFast,
    KmeansFit, Merge,
};
pub use distance::{condensed_distances, pairwise_distances, squareform};
pub use error::{Error, Result};
pub use features::{
    color_features, color_position_features, image_as_float, labels_to_segments, matrix_from_rows,
};
pub use metrics::{evaluate_segmentation, pixel_accuracy};
