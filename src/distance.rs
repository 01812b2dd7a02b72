//! Euclidean distance utilities.
//!
//! Two shapes of the same computation:
//!
//! - [`pairwise_distances`]: every row of `A` against every row of `B`
//!   (an `N_A × N_B` matrix). The vectorized k-means uses it for all
//!   point-to-center distances in one pass.
//! - [`condensed_distances`]: every pair within one set, stored as the upper
//!   triangle in row-major order. [`squareform`] expands it back to the full
//!   symmetric matrix.
//!
//! Only the Euclidean metric is provided.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis, Zip};

/// Euclidean distance between two vectors of equal length.
#[inline]
pub fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Distances between every row of `a` and every row of `b`.
///
/// Entry `(i, j)` of the result is `||a[i] - b[j]||`.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] when `a` and `b` have different column counts.
///
/// ```rust
/// use ndarray::array;
/// use segclust::distance::pairwise_distances;
///
/// let a = array![[0.0, 0.0], [3.0, 4.0]];
/// let b = array![[0.0, 0.0]];
/// let d = pairwise_distances(a.view(), b.view()).unwrap();
/// assert_eq!(d.dim(), (2, 1));
/// assert!((d[[1, 0]] - 5.0).abs() < 1e-12);
/// ```
pub fn pairwise_distances(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    if a.ncols() != b.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.ncols(),
            found: b.ncols(),
        });
    }

    let mut out = Array2::zeros((a.nrows(), b.nrows()));

    #[cfg(feature = "parallel")]
    Zip::from(out.rows_mut())
        .and(a.rows())
        .par_for_each(|out_row, a_row| fill_row(out_row, a_row, b));

    #[cfg(not(feature = "parallel"))]
    Zip::from(out.rows_mut())
        .and(a.rows())
        .for_each(|out_row, a_row| fill_row(out_row, a_row, b));

    Ok(out)
}

/// One row of the distance matrix: `x` broadcast against all rows of `b`.
fn fill_row(mut out: ArrayViewMut1<'_, f64>, x: ArrayView1<'_, f64>, b: ArrayView2<'_, f64>) {
    let diff = &b - &x.insert_axis(Axis(0));
    let squared = (&diff * &diff).sum_axis(Axis(1));
    out.assign(&squared.mapv_into(f64::sqrt));
}

/// Condensed pairwise distances within `x`.
///
/// For `m` rows the result has `m * (m - 1) / 2` entries laid out as
/// `[d(0,1), d(0,2), ..., d(0,m-1), d(1,2), ..., d(m-2,m-1)]`.
pub fn condensed_distances(x: ArrayView2<'_, f64>) -> Vec<f64> {
    let m = x.nrows();
    let mut condensed = Vec::with_capacity(m * m.saturating_sub(1) / 2);
    for i in 0..m.saturating_sub(1) {
        let row_i = x.row(i);
        for j in (i + 1)..m {
            condensed.push(euclidean(row_i, x.row(j)));
        }
    }
    condensed
}

/// Expand a condensed distance vector into the full `m × m` symmetric matrix
/// (zero diagonal).
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `condensed.len() != m * (m - 1) / 2`.
pub fn squareform(condensed: &[f64], m: usize) -> Result<Array2<f64>> {
    if condensed.len() != m * m.saturating_sub(1) / 2 {
        return Err(Error::InvalidParameter {
            name: "condensed",
            message: "length must be m * (m - 1) / 2",
        });
    }

    let mut square = Array2::zeros((m, m));
    let mut k = 0;
    for i in 0..m {
        for j in (i + 1)..m {
            square[[i, j]] = condensed[k];
            square[[j, i]] = condensed[k];
            k += 1;
        }
    }
    Ok(square)
}

/// Index of the smallest entry; the lowest index wins ties (strict `<`).
///
/// Returns 0 for an empty row or a row with no comparable entry.
#[inline]
pub(crate) fn argmin(row: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, &d) in row.iter().enumerate() {
        if d < best_dist {
            best_dist = d;
            best = j;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pairwise_matches_euclidean() {
        let a = array![[0.0, 0.0], [1.0, 1.0], [-2.0, 5.0]];
        let b = array![[1.0, 0.0], [4.0, 4.0]];
        let d = pairwise_distances(a.view(), b.view()).unwrap();

        assert_eq!(d.dim(), (3, 2));
        for i in 0..3 {
            for j in 0..2 {
                let expected = euclidean(a.row(i), b.row(j));
                assert!((d[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_pairwise_dimension_mismatch() {
        let a = array![[0.0, 0.0]];
        let b = array![[0.0, 0.0, 0.0]];
        let err = pairwise_distances(a.view(), b.view()).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_condensed_order() {
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let c = condensed_distances(x.view());
        assert_eq!(c.len(), 3);
        assert!((c[0] - 1.0).abs() < 1e-12); // d(0,1)
        assert!((c[1] - 1.0).abs() < 1e-12); // d(0,2)
        assert!((c[2] - 2f64.sqrt()).abs() < 1e-12); // d(1,2)
    }

    #[test]
    fn test_condensed_single_row_is_empty() {
        let x = array![[3.0, 1.0]];
        assert!(condensed_distances(x.view()).is_empty());
    }

    #[test]
    fn test_squareform_symmetric() {
        let x = array![[0.0], [2.0], [7.0], [11.0]];
        let sq = squareform(&condensed_distances(x.view()), 4).unwrap();
        let full = pairwise_distances(x.view(), x.view()).unwrap();
        for i in 0..4 {
            assert_eq!(sq[[i, i]], 0.0);
            for j in 0..4 {
                assert_eq!(sq[[i, j]], sq[[j, i]]);
                assert!((sq[[i, j]] - full[[i, j]]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_squareform_bad_length() {
        assert!(squareform(&[1.0, 2.0], 3).is_err());
    }

    #[test]
    fn test_argmin_ties_pick_lowest_index() {
        let row = array![3.0, 1.0, 1.0, 2.0];
        assert_eq!(argmin(row.view()), 1);
    }
}
