//! Radial Gaussian model of a muon ring.

use log::debug;
use ndarray::{ArrayD, ArrayViewD};

use crate::density::Density;
use crate::error::{invalid, Result};
use crate::gauss::gauss;
use crate::types::{Coordf64, Intensityf64, Point};

/// Ring of light of radius `radius` and thickness (standard deviation)
/// `width` around `centre`.
///
/// Unlike `ShowerModel` this is not a normalized density: the intensity is
/// `1` on the ring itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuonRingModel {
    radius: Coordf64,
    width: Coordf64,
    centre: Point,
}

impl MuonRingModel {

    pub fn new(radius: Coordf64, width: Coordf64, centre: Point) -> Result<Self> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(invalid("radius", format!("must be finite and non-negative, got {radius}")))
        }
        if width == 0.0 {
            return Err(invalid("width", "ring width must be non-zero"))
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(invalid("width", format!("must be finite and positive, got {width}")))
        }
        if !(centre.x.is_finite() && centre.y.is_finite()) {
            return Err(invalid("centre", format!("coordinates must be finite, got {centre}")))
        }
        debug!("muon ring of radius {radius} and width {width} at ({}, {})", centre.x, centre.y);
        Ok(Self { radius, width, centre })
    }

    pub fn radius(&self) -> Coordf64 { self.radius }
    pub fn width (&self) -> Coordf64 { self.width  }
    pub fn centre(&self) -> Point    { self.centre }

    pub fn intensity(&self, point: &Point) -> Intensityf64 {
        let r = (point - self.centre).norm();
        gauss(r, self.radius, self.width)
    }
}

impl Density for MuonRingModel {
    fn density_at(&self, point: &Point) -> f64 { self.intensity(point) }
}

/// Ring intensity at every point of `xy`, whose trailing axis holds the `x`
/// and `y` coordinates. The result has the shape of the remaining axes.
pub fn generate_muon_model(
    xy      : ArrayViewD<f64>,
    radius  : Coordf64,
    width   : Coordf64,
    centre_x: Coordf64,
    centre_y: Coordf64,
) -> Result<ArrayD<Intensityf64>> {
    MuonRingModel::new(radius, width, Point::new(centre_x, centre_y))?
        .evaluate(xy)
}
