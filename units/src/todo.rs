/// Quantities which are simply type aliases for `f64` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// The toy models work in camera-plane coordinates whose unit is whatever the
/// camera geometry provides (metres or degrees), so the numerical core uses
/// plain `f64`s, but we still want some clues in the source as to what they
/// represent.

/// Camera-plane coordinate
pub type Coordf64     = f64;
/// Square of a camera-plane coordinate: used for shower width and length
pub type Variancef64  = f64;
/// Model density per unit camera-plane area
pub type Densityf64   = f64;
/// Photo-electrons
pub type Intensityf64 = f64;
