//! Physical quantities used throughout the workspace, implemented with `uom`.

pub use uom;

pub mod todo;
mod angle;

pub use angle::{parse_angle, ParseAngleError};

pub type Length = uom::si::f64::Length;
pub type Angle  = uom::si::f64::Angle;
pub type Ratio  = uom::si::f64::Ratio;

use uom::si::{length::{meter, centimeter, millimeter},
              angle ::{degree, radian},
              ratio ::ratio};

// Making values from float literals is very long-winded in `uom`, so provide
// some pithily-named convenience constructors ...
pub fn m  (x: f64) -> Length { Length::new::     <meter>(x) }
pub fn cm (x: f64) -> Length { Length::new::<centimeter>(x) }
pub fn mm (x: f64) -> Length { Length::new::<millimeter>(x) }
pub fn deg(x: f64) -> Angle  {  Angle::new::    <degree>(x) }
pub fn rad(x: f64) -> Angle  {  Angle::new::    <radian>(x) }

// ... and extractors which fix the unit of the returned float.
pub fn m_     (x: Length) -> f64 { x.get::<meter >() }
pub fn radian_(x: Angle ) -> f64 { x.get::<radian>() }
pub fn degree_(x: Angle ) -> f64 { x.get::<degree>() }
pub fn ratio_ (x: Ratio ) -> f64 { x.get::<ratio >() }
