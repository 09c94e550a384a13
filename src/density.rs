//! The capability shared by all toy models: evaluation at camera-plane points.
//!
//! The rasterizer only ever sees a `Density`, so shower models, muon rings,
//! the `Model` enum which selects between them at run time, and plain
//! closures can all be turned into images.

use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::error::{invalid, Result};
use crate::muon::MuonRingModel;
use crate::shower::ShowerModel;
use crate::types::{Densityf64, Point};

pub trait Density {
    fn density_at(&self, point: &Point) -> Densityf64;

    /// Evaluate at every position in `positions`, whose trailing axis holds
    /// the `x` and `y` coordinates. The result has the shape of the remaining
    /// axes.
    fn evaluate(&self, positions: ArrayViewD<f64>) -> Result<ArrayD<Densityf64>> {
        let coordinate_axis = coordinate_axis(&positions)?;
        Ok(positions.map_axis(coordinate_axis, |xy| self.density_at(&Point::new(xy[0], xy[1]))))
    }
}

impl<F> Density for F
where
    F: Fn(&Point) -> Densityf64,
{
    fn density_at(&self, point: &Point) -> Densityf64 { self(point) }
}

/// Locate the axis holding `(x, y)` pairs, rejecting arrays without one.
pub(crate) fn coordinate_axis(positions: &ArrayViewD<f64>) -> Result<Axis> {
    match positions.shape().last() {
        Some(2) => Ok(Axis(positions.ndim() - 1)),
        Some(n) => Err(invalid("pixel_positions",
                               format!("trailing axis must hold 2 coordinates, found {n}"))),
        None    => Err(invalid("pixel_positions",
                               "a scalar was given instead of an array of (x, y) pairs")),
    }
}

/// A toy model chosen at run time, e.g. from a configuration file
#[derive(Clone, Debug, PartialEq)]
pub enum Model {
    Shower(ShowerModel),
    Muon(MuonRingModel),
}

impl Density for Model {
    fn density_at(&self, point: &Point) -> Densityf64 {
        match self {
            Model::Shower(shower) => shower.density_at(point),
            Model::Muon  (ring)   =>   ring.density_at(point),
        }
    }
}

impl From<ShowerModel> for Model {
    fn from(shower: ShowerModel) -> Self { Model::Shower(shower) }
}

impl From<MuonRingModel> for Model {
    fn from(ring: MuonRingModel) -> Self { Model::Muon(ring) }
}
