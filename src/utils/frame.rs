use crate::math::{Matrix, Real, Vector};

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// Builds a right-handed orthonormal frame whose first column is `dir`.
///
/// `dir` must be normalized. The second column lies in the `xy` plane unless `dir` is
/// parallel to `z`, in which case it is the `x` axis.
pub fn orthonormal_frame(dir: &Vector<Real>) -> Matrix<Real> {
    let len2 = dir.x * dir.x + dir.y * dir.y;
    let side = if len2 == 0.0 {
        Vector::x()
    } else {
        let inv_len = 1.0 / len2.sqrt();
        Vector::new(-dir.y * inv_len, dir.x * inv_len, 0.0)
    };

    Matrix::from_columns(&[*dir, side, dir.cross(&side)])
}

/// Builds a right-handed orthonormal frame whose first column is `dir` and whose second
/// column is `hint` made orthogonal to `dir`.
///
/// `dir` must be normalized and `hint` must not be parallel to it.
pub fn orthonormal_frame_with_hint(dir: &Vector<Real>, hint: &Vector<Real>) -> Matrix<Real> {
    let side = (hint - dir * hint.dot(dir)).normalize();
    Matrix::from_columns(&[*dir, side, dir.cross(&side)])
}

/// The index of the column of `axis` that is the closest to being orthogonal to `dir`.
///
/// Columns are compared by the absolute value of their dot product with `dir`, so flipping
/// the sign of a column never changes the result. Ties keep the lowest index.
pub fn least_aligned_column(axis: &Matrix<Real>, dir: &Vector<Real>) -> usize {
    let mut best = 0;
    let mut best_dot = Real::MAX;

    for i in 0..3 {
        let dot = axis.column(i).dot(dir).abs();
        if dot < best_dot {
            best = i;
            best_dot = dot;
        }
    }

    best
}
