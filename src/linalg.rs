//! 2D rotations in the camera plane.

use crate::types::Matrix;

/// Matrix rotating vectors anticlockwise by `angle` radians.
pub fn rotation_matrix_2d(angle: f64) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::new(c, -s,
                s,  c)
}

/// Rotate `covariance` by `angle` radians: `C' = R C Rᵗ`.
///
/// The product is symmetrized to remove rounding asymmetry between the
/// off-diagonal elements.
pub fn rotate_covariance(covariance: &Matrix, angle: f64) -> Matrix {
    let rotation = rotation_matrix_2d(angle);
    let rotated = rotation * covariance * rotation.transpose();
    (rotated + rotated.transpose()) * 0.5
}
