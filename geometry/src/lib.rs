//! Camera-plane geometry: pixel positions in camera coordinates.

mod camera;

pub use camera::{CameraGeometry, GeometryError};

/// A point in the camera plane, in the units of the camera geometry.
pub type Point  = nalgebra::Point2<f64>;
pub type Vector = nalgebra::Vector2<f64>;
