use ndarray::{Array1, Array2, ArrayD, ArrayViewD, Dimension, IxDyn};
use thiserror::Error;
use units::{m_, Length};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("pixel x and y coordinate arrays differ in shape: {x:?} vs {y:?}")]
    ShapeMismatch { x: Vec<usize>, y: Vec<usize> },

    #[error("camera has no pixels")]
    NoPixels,

    #[error("pixel coordinates must be finite")]
    NonFinite,
}

/// Positions of the pixels of a camera, in camera-plane coordinates (metres).
///
/// The coordinate arrays may have any shape (a flat list of pixels, a 2D
/// grid, ...): the shape is preserved by everything which is computed per
/// pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraGeometry {
    pix_x: ArrayD<f64>,
    pix_y: ArrayD<f64>,
}

impl CameraGeometry {

    pub fn new(pix_x: ArrayD<f64>, pix_y: ArrayD<f64>) -> Result<Self, GeometryError> {
        if pix_x.shape() != pix_y.shape() {
            return Err(GeometryError::ShapeMismatch {
                x: pix_x.shape().to_vec(),
                y: pix_y.shape().to_vec(),
            })
        }
        if pix_x.is_empty() { return Err(GeometryError::NoPixels) }
        if pix_x.iter().chain(pix_y.iter()).any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFinite)
        }
        Ok(Self { pix_x, pix_y })
    }

    /// A rectangular camera of `npix_x` ✕ `npix_y` pixels, evenly spaced so
    /// that the outermost pixel centres lie on the bounds of `range_x` and
    /// `range_y`.
    ///
    /// The coordinate arrays have shape `[npix_y, npix_x]`: rows run along y.
    pub fn rectangular(
        (npix_x, npix_y): (usize, usize),
        (x_min, x_max): (Length, Length),
        (y_min, y_max): (Length, Length),
    ) -> Result<Self, GeometryError> {
        let x = Array1::linspace(m_(x_min), m_(x_max), npix_x);
        let y = Array1::linspace(m_(y_min), m_(y_max), npix_y);
        let xx = Array2::from_shape_fn((npix_y, npix_x), |(_, i)| x[i]);
        let yy = Array2::from_shape_fn((npix_y, npix_x), |(j, _)| y[j]);
        Self::new(xx.into_dyn(), yy.into_dyn())
    }

    pub fn pix_x(&self) -> ArrayViewD<f64> { self.pix_x.view() }
    pub fn pix_y(&self) -> ArrayViewD<f64> { self.pix_y.view() }

    /// Shape of the pixel arrays
    pub fn shape(&self) -> &[usize] { self.pix_x.shape() }

    pub fn n_pixels(&self) -> usize { self.pix_x.len() }

    /// Pixel positions as a single array whose shape is the pixel shape with
    /// a trailing axis of length 2 holding `x` and `y`.
    pub fn positions(&self) -> ArrayD<f64> {
        let n = self.pix_x.ndim();
        let mut shape = self.shape().to_vec();
        shape.push(2);
        ArrayD::from_shape_fn(IxDyn(&shape), |index| {
            let (pixel, coordinate) = index.slice().split_at(n);
            if coordinate[0] == 0 { self.pix_x[pixel] }
            else                  { self.pix_y[pixel] }
        })
    }
}
