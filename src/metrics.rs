//! Segmentation evaluation against a ground-truth foreground mask.
//!
//! A segmentation with k segments is scored by treating each segment in turn
//! as the foreground hypothesis and keeping the best pixel accuracy.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use segclust::metrics::evaluate_segmentation;
//!
//! let truth = array![[true, true], [false, false]];
//! let segments = array![[2, 2], [0, 1]];
//!
//! // Segment 2 matches the foreground exactly.
//! assert_eq!(evaluate_segmentation(truth.view(), segments.view()).unwrap(), 1.0);
//! ```

use crate::error::{Error, Result};
use ndarray::{ArrayView2, Zip};

/// Fraction of pixels where `truth` and `mask` agree.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] when the shapes differ, [`Error::EmptyInput`] for
/// zero-pixel masks.
pub fn pixel_accuracy(truth: ArrayView2<'_, bool>, mask: ArrayView2<'_, bool>) -> Result<f64> {
    if truth.dim() != mask.dim() {
        return Err(Error::shape_mismatch(truth.shape(), mask.shape()));
    }
    if truth.is_empty() {
        return Err(Error::EmptyInput);
    }

    let agree = Zip::from(&truth)
        .and(&mask)
        .fold(0usize, |acc, &t, &m| acc + usize::from(t == m));
    Ok(agree as f64 / truth.len() as f64)
}

/// Best [`pixel_accuracy`] over the masks `segments == label` for every label
/// in `0..=max(segments)`.
///
/// Labels are assumed dense; a label in that range with no pixels is scored
/// as an all-background mask.
///
/// # Errors
///
/// Same as [`pixel_accuracy`], plus [`Error::InvalidParameter`] when the
/// largest label is not below the pixel count (labels cannot be dense).
pub fn evaluate_segmentation(
    truth: ArrayView2<'_, bool>,
    segments: ArrayView2<'_, usize>,
) -> Result<f64> {
    if truth.dim() != segments.dim() {
        return Err(Error::shape_mismatch(truth.shape(), segments.shape()));
    }
    let max_label = segments.iter().copied().max().ok_or(Error::EmptyInput)?;
    if max_label >= segments.len() {
        return Err(label_out_of_range());
    }
    let n_segments = max_label.checked_add(1).ok_or_else(label_out_of_range)?;

    let mut best = 0.0f64;
    for label in 0..n_segments {
        let mask = segments.mapv(|s| s == label);
        best = best.max(pixel_accuracy(truth, mask.view())?);
    }
    Ok(best)
}

fn label_out_of_range() -> Error {
    Error::InvalidParameter {
        name: "segments",
        message: "label out of range",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pixel_accuracy_identical() {
        let mask = array![[true, false, true], [false, false, true]];
        assert_eq!(pixel_accuracy(mask.view(), mask.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_pixel_accuracy_inverted() {
        let mask = array![[true, false], [false, true]];
        let inverted = mask.mapv(|v| !v);
        assert_eq!(pixel_accuracy(mask.view(), inverted.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_pixel_accuracy_partial() {
        let truth = array![[true, true], [false, false]];
        let mask = array![[true, false], [false, false]];
        assert!((pixel_accuracy(truth.view(), mask.view()).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_accuracy_shape_mismatch() {
        let a = array![[true, false]];
        let b = array![[true], [false]];
        assert!(matches!(
            pixel_accuracy(a.view(), b.view()),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_evaluate_picks_best_segment() {
        let truth = array![[true, true, false], [false, false, false]];
        // Segment 1 covers the foreground plus one extra pixel: 5/6.
        let segments = array![[1, 1, 1], [0, 0, 0]];
        let score = evaluate_segmentation(truth.view(), segments.view()).unwrap();
        assert!((score - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_missing_label_counts_as_background() {
        // Label 1 never appears; its empty mask still scores 2/3.
        let truth = array![[true, false, false]];
        let segments = array![[0, 2, 2]];
        let score = evaluate_segmentation(truth.view(), segments.view()).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_evaluate_shape_mismatch() {
        let truth = array![[true, false]];
        let segments = array![[0], [1]];
        assert!(evaluate_segmentation(truth.view(), segments.view()).is_err());
    }

    #[test]
    fn test_evaluate_rejects_max_label() {
        let truth = array![[true, false]];
        let segments = array![[0, usize::MAX]];
        assert_eq!(
            evaluate_segmentation(truth.view(), segments.view()),
            Err(label_out_of_range())
        );
    }

    #[test]
    fn test_evaluate_rejects_sparse_label() {
        // Two pixels cannot carry a dense label 1_000_000_000.
        let truth = array![[true, false]];
        let segments = array![[0, 1_000_000_000]];
        assert!(matches!(
            evaluate_segmentation(truth.view(), segments.view()),
            Err(Error::InvalidParameter { name: "segments", .. })
        ));

        // The largest dense label on two pixels is still accepted.
        let segments = array![[1, 0]];
        assert_eq!(evaluate_segmentation(truth.view(), segments.view()).unwrap(), 1.0);
    }
}
