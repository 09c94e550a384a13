/// Unnormalized Gaussian kernel: `1` at `mean`, falling off with standard
/// deviation `sigma`.
#[inline]
pub fn gauss(x: f64, mean: f64, sigma: f64) -> f64 {
    let dx = x - mean;
    (-dx * dx / (2.0 * sigma * sigma)).exp()
}

/// Peak value of a bivariate normal density whose covariance has determinant
/// `determinant`.
#[inline]
pub fn bivariate_peak(determinant: f64) -> f64 {
    1.0 / (crate::types::TWOPI * determinant.sqrt())
}
