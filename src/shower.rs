//! Elliptical 2D Gaussian model of a shower image.

use log::debug;
use units::{radian_, Angle};

use crate::density::Density;
use crate::error::{invalid, Error, Result};
use crate::gauss::bivariate_peak;
use crate::linalg::rotate_covariance;
use crate::types::{Densityf64, Matrix, Point, Variancef64};

/// Bivariate normal density describing the light of a shower in the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowerModel {
    centroid: Point,
    covariance: Matrix,
    precision: Matrix,
    peak: Densityf64,
}

impl ShowerModel {

    /// Shower centred on `centroid`, whose major axis has variance `length` and
    /// makes angle `psi` (radians) with the x-axis, and whose minor axis has
    /// variance `width`.
    pub fn new(centroid: Point, width: Variancef64, length: Variancef64, psi: f64) -> Result<Self> {
        check_variance("width" , width )?;
        check_variance("length", length)?;
        if !psi.is_finite() { return Err(invalid("psi", format!("angle must be finite, got {psi}"))) }
        let aligned = Matrix::new(length, 0.0,
                                  0.0   , width);
        Self::from_covariance(centroid, rotate_covariance(&aligned, psi))
    }

    /// Shower with an arbitrary (symmetric, positive-definite) covariance.
    pub fn from_covariance(centroid: Point, covariance: Matrix) -> Result<Self> {
        if !(centroid.x.is_finite() && centroid.y.is_finite()) {
            return Err(invalid("centroid", format!("coordinates must be finite, got {centroid}")))
        }
        if !covariance.iter().all(|c| c.is_finite()) {
            return Err(invalid("covariance", format!("entries must be finite, got {:?}", covariance.as_slice())))
        }
        if covariance.m12 != covariance.m21 {
            return Err(invalid("covariance", "matrix must be symmetric"))
        }
        check_positive_definite(&covariance)?;
        let precision = covariance.try_inverse()
            .ok_or_else(|| Error::NumericalDegeneracy("covariance cannot be inverted".into()))?;
        let peak = bivariate_peak(covariance.determinant());
        debug!("shower model at ({}, {}) with covariance {:?}, peak density {peak}",
               centroid.x, centroid.y, covariance.as_slice());
        Ok(Self { centroid, covariance, precision, peak })
    }

    pub fn centroid  (&self) -> Point  { self.centroid }
    pub fn covariance(&self) -> Matrix { self.covariance }

    /// Density at the centroid: the highest value the model takes
    pub fn peak_density(&self) -> Densityf64 { self.peak }

    pub fn pdf(&self, point: &Point) -> Densityf64 {
        self.peak * (-0.5 * self.mahalanobis_squared(point)).exp()
    }

    pub fn logpdf(&self, point: &Point) -> f64 {
        self.peak.ln() - 0.5 * self.mahalanobis_squared(point)
    }

    fn mahalanobis_squared(&self, point: &Point) -> f64 {
        let d = point - self.centroid;
        d.dot(&(self.precision * d))
    }
}

impl Density for ShowerModel {
    fn density_at(&self, point: &Point) -> Densityf64 { self.pdf(point) }
}

/// Build a shower model from a centroid given as a slice of coordinates, and
/// a rotation angle with units.
pub fn generate_2d_shower_model(
    centroid: &[f64],
    width   : Variancef64,
    length  : Variancef64,
    psi     : Angle,
) -> Result<ShowerModel> {
    let &[x, y] = centroid else {
        return Err(invalid("centroid", format!("expected 2 coordinates, got {}", centroid.len())))
    };
    ShowerModel::new(Point::new(x, y), width, length, radian_(psi))
}

fn check_variance(name: &'static str, variance: Variancef64) -> Result<()> {
    if variance.is_finite() && variance >= 0.0 { Ok(()) }
    else { Err(invalid(name, format!("variance must be finite and non-negative, got {variance}"))) }
}

// Eigenvalues whose magnitude is below this fraction of the largest one are
// treated as zero.
const RELATIVE_EIGENVALUE_TOLERANCE: f64 = 1e6 * f64::EPSILON;

fn check_positive_definite(covariance: &Matrix) -> Result<()> {
    let eigenvalues = covariance.symmetric_eigenvalues();
    let (small, large) = (eigenvalues.min(), eigenvalues.max());
    let tolerance = RELATIVE_EIGENVALUE_TOLERANCE * eigenvalues.amax();
    if small < -tolerance {
        return Err(Error::NumericalDegeneracy(format!(
            "covariance is not positive semi-definite: eigenvalues {small} and {large}")))
    }
    if small <= tolerance {
        return Err(Error::NumericalDegeneracy(format!(
            "covariance is singular: eigenvalues {small} and {large}")))
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TWOPI;
    use float_eq::assert_float_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};
    use units::deg;

    fn shower(width: f64, length: f64, psi: f64) -> ShowerModel {
        ShowerModel::new(Point::new(0.2, -0.1), width, length, psi).unwrap()
    }

    #[test]
    fn unrotated_covariance_is_exactly_diagonal() {
        let model = shower(0.02, 0.1, 0.0);
        assert_eq!(model.covariance(), Matrix::new(0.1, 0.0, 0.0, 0.02));
    }

    #[test]
    fn quarter_turn_puts_major_axis_along_y() {
        let c = shower(0.02, 0.1, FRAC_PI_2).covariance();
        assert_float_eq!([c.m11, c.m12, c.m22], [0.02, 0.0, 0.1], abs_all <= 1e-15);
    }

    #[test]
    fn major_axis_points_along_psi() {
        let psi = 35_f64.to_radians();
        let model = shower(0.01, 0.1, psi);
        let c = model.centroid();
        let along  = Point::new(c.x + 0.1 * psi.cos(), c.y + 0.1 * psi.sin());
        let across = Point::new(c.x - 0.1 * psi.sin(), c.y + 0.1 * psi.cos());
        assert!(model.pdf(&along) > model.pdf(&across));
    }

    #[rstest(/**/ width, length, psi,
             case(0.01 , 0.01  , 0.0),
             case(0.02 , 0.1   , 0.7),
             case(0.001, 0.5   , -2.0),
             case(1.0  , 1.0e-3, 10.0),
    )]
    fn density_at_centroid_is_gaussian_peak(width: f64, length: f64, psi: f64) {
        let model = shower(width, length, psi);
        let expected = 1.0 / (TWOPI * (width * length).sqrt());
        assert_float_eq!(model.pdf(&model.centroid()), expected, r2nd <= 1e-12);
        assert_float_eq!(model.peak_density()        , expected, r2nd <= 1e-12);
    }

    #[test]
    fn circular_gaussian_peaks_at_centroid() {
        let model = generate_2d_shower_model(&[0.0, 0.0], 0.01, 0.01, deg(0.0)).unwrap();
        let peak = model.pdf(&Point::new(0.0, 0.0));
        assert!(peak > model.pdf(&Point::new(1.0, 1.0)));
        for (x, y) in [(0.01, 0.0), (0.0, -0.05), (0.1, 0.1), (-0.3, 0.2)] {
            assert!(peak > model.pdf(&Point::new(x, y)));
        }
    }

    #[test]
    fn normalized_over_the_plane() {
        let model = shower(0.002, 0.01, 0.4);
        let c = model.centroid();
        let (n, half_width) = (400, 0.6);
        let step = 2.0 * half_width / n as f64;
        let total: f64 = itertools::iproduct!(0..n, 0..n)
            .map(|(i, j)| Point::new(c.x - half_width + (i as f64 + 0.5) * step,
                                     c.y - half_width + (j as f64 + 0.5) * step))
            .map(|p| model.pdf(&p) * step * step)
            .sum();
        assert_float_eq!(total, 1.0, abs <= 1e-3);
    }

    #[test]
    fn logpdf_is_log_of_pdf() {
        let model = shower(0.02, 0.1, 1.0);
        for p in [Point::new(0.0, 0.0), Point::new(0.3, 0.1), Point::new(-0.2, 0.4)] {
            assert_float_eq!(model.logpdf(&p), model.pdf(&p).ln(), abs <= 1e-12);
        }
    }

    #[test]
    fn psi_accepts_angles_with_units() {
        let a = generate_2d_shower_model(&[0.2, 0.0], 0.01, 0.1, deg(35.0)).unwrap();
        let b = ShowerModel::new(Point::new(0.2, 0.0), 0.01, 0.1, 35.0 * PI / 180.0).unwrap();
        let (ca, cb) = (a.covariance(), b.covariance());
        assert_eq!(a.centroid(), b.centroid());
        assert_float_eq!([ca.m11, ca.m12, ca.m22], [cb.m11, cb.m12, cb.m22], r2nd_all <= 1e-14);
    }

    #[rstest(/**/ centroid,
             case(&[]),
             case(&[0.1]),
             case(&[0.1, 0.2, 0.3]),
    )]
    fn centroid_must_be_two_dimensional(centroid: &[f64]) {
        let result = generate_2d_shower_model(centroid, 0.01, 0.1, deg(0.0));
        assert!(matches!(result, Err(Error::InvalidParameter { name: "centroid", .. })));
    }

    #[rstest(/**/ width   , length  , name,
             case(-0.01    , 0.1     , "width"),
             case(0.01     , -1e-9   , "length"),
             case(f64::NAN , 0.1     , "width"),
             case(0.01     , f64::INFINITY, "length"),
    )]
    fn negative_or_non_finite_variances_are_rejected(width: f64, length: f64, name: &str) {
        match ShowerModel::new(Point::new(0.0, 0.0), width, length, 0.3) {
            Err(Error::InvalidParameter { name: n, .. }) => assert_eq!(n, name),
            other => panic!("expected InvalidParameter for {name}, got {other:?}"),
        }
    }

    #[rstest(/**/ width, length,
             case(0.0  , 0.1),
             case(0.01 , 0.0),
             case(0.0  , 0.0),
    )]
    fn zero_variance_is_degenerate(width: f64, length: f64) {
        let result = ShowerModel::new(Point::new(0.0, 0.0), width, length, 0.3);
        assert!(matches!(result, Err(Error::NumericalDegeneracy(_))));
    }

    #[test]
    fn indefinite_covariance_is_degenerate() {
        let result = ShowerModel::from_covariance(Point::new(0.0, 0.0), Matrix::new(1.0, 2.0, 2.0, 1.0));
        assert!(matches!(result, Err(Error::NumericalDegeneracy(_))));
    }

    #[rstest(/**/ covariance,
             case(Matrix::new(f64::INFINITY, 0.0, 0.0, 1.0)),
             case(Matrix::new(1.0, 0.0, 0.0, f64::NEG_INFINITY)),
             case(Matrix::new(1.0, f64::NAN, f64::NAN, 1.0)),
    )]
    fn non_finite_covariance_is_rejected(covariance: Matrix) {
        let result = ShowerModel::from_covariance(Point::new(0.0, 0.0), covariance);
        assert!(matches!(result, Err(Error::InvalidParameter { name: "covariance", .. })));
    }

    #[test]
    fn asymmetric_covariance_is_rejected() {
        let result = ShowerModel::from_covariance(Point::new(0.0, 0.0), Matrix::new(1.0, 0.1, 0.2, 1.0));
        assert!(matches!(result, Err(Error::InvalidParameter { name: "covariance", .. })));
    }

    use proptest::prelude::*;

    proptest! {
        // Ellipses are symmetric under rotation by half a turn
        #[test]
        fn half_turn_leaves_density_unchanged(
            width  in 0.001 .. 0.1_f64,
            length in 0.001 .. 0.1_f64,
            psi    in -PI .. PI,
            x      in -0.5 .. 0.5_f64,
            y      in -0.5 .. 0.5_f64,
        ) {
            let a = shower(width, length, psi);
            let b = shower(width, length, psi + PI);
            let p = Point::new(x, y);
            assert_float_eq!(a.pdf(&p), b.pdf(&p), r2nd <= 1e-9);
        }

        #[test]
        fn point_symmetric_about_centroid(
            width  in 0.001 .. 0.1_f64,
            length in 0.001 .. 0.1_f64,
            psi    in -PI .. PI,
            dx     in -0.3 .. 0.3_f64,
            dy     in -0.3 .. 0.3_f64,
        ) {
            let model = shower(width, length, psi);
            let c = model.centroid();
            let plus  = model.pdf(&Point::new(c.x + dx, c.y + dy));
            let minus = model.pdf(&Point::new(c.x - dx, c.y - dy));
            assert_float_eq!(plus, minus, r2nd <= 1e-9);
            assert!(plus <= model.peak_density());
        }
    }
}
