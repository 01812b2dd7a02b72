//! Per-pixel feature construction and label reshaping.
//!
//! Images are `H × W × C` arrays; features are `(H·W) × D` matrices with one
//! row per pixel in row-major pixel order (`row * W + col`). The clusterers
//! never normalize; [`color_position_features`] does it here.

use crate::error::{Error, Result};
use ndarray::{Array2, Array3, ArrayView3, Axis};

/// Scale an 8-bit image to `[0, 1]`.
pub fn image_as_float(img: ArrayView3<'_, u8>) -> Array3<f64> {
    img.mapv(|v| f64::from(v) / 255.0)
}

/// One row per pixel holding its `C` channel values.
pub fn color_features(img: ArrayView3<'_, f64>) -> Array2<f64> {
    let (h, w, c) = img.dim();
    Array2::from_shape_fn((h * w, c), |(p, ch)| img[[p / w, p % w, ch]])
}

/// One row per pixel: `[c_0, ..., c_{C-1}, row, col]`, every column
/// standardized to zero mean and unit (population) standard deviation.
///
/// A constant column (a single-row image, a flat channel) is only centered.
pub fn color_position_features(img: ArrayView3<'_, f64>) -> Array2<f64> {
    let (h, w, c) = img.dim();
    let mut features = Array2::from_shape_fn((h * w, c + 2), |(p, col)| {
        let (y, x) = (p / w, p % w);
        if col < c {
            img[[y, x, col]]
        } else if col == c {
            y as f64
        } else {
            x as f64
        }
    });

    if features.nrows() == 0 {
        return features;
    }

    for mut column in features.axis_iter_mut(Axis(1)) {
        let mean = column.mean().unwrap_or(0.0);
        column.mapv_inplace(|v| v - mean);
        let std = column.std(0.0);
        if std > 0.0 {
            column.mapv_inplace(|v| v / std);
        }
    }
    features
}

/// Stack equal-length rows into a feature matrix.
///
/// # Errors
///
/// [`Error::EmptyInput`] for no rows, [`Error::DimensionMismatch`] for ragged rows.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let first = rows.first().ok_or(Error::EmptyInput)?;
    let d = first.len();

    let mut flat: Vec<f64> = Vec::with_capacity(rows.len() * d);
    for row in rows {
        if row.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: row.len(),
            });
        }
        flat.extend_from_slice(row);
    }

    let len = flat.len();
    Array2::from_shape_vec((rows.len(), d), flat)
        .map_err(|_| Error::shape_mismatch(&[rows.len(), d], &[len]))
}

/// Reshape a per-pixel assignment vector into an `H × W` segment image.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] when `labels.len() != height * width`.
pub fn labels_to_segments(labels: &[usize], height: usize, width: usize) -> Result<Array2<usize>> {
    Array2::from_shape_vec((height, width), labels.to_vec())
        .map_err(|_| Error::shape_mismatch(&[height * width], &[labels.len()]))
}
