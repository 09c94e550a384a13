pub use units::todo::{Coordf64, Densityf64, Intensityf64, Variancef64};
pub use geometry::{Point, Vector};

/// 2 ✕ 2 matrices: rotations and covariances in the camera plane
pub type Matrix = nalgebra::Matrix2<f64>;

/// Photo-electron counts
pub type Count = u64;

pub const TWOPI: f64 = std::f64::consts::TAU;
