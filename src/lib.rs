//! Toy-model images for Cherenkov-telescope cameras.
//!
//! A shower is modelled as an elliptical 2D Gaussian (`ShowerModel`) and a
//! muon as a Gaussian ring (`MuonRingModel`). Either can be rasterized onto
//! the pixels of a `CameraGeometry`, giving a pedestal-subtracted image with
//! Poisson-distributed signal and night-sky-background noise:
//!
//! ```
//! use rand::SeedableRng;
//! use toymodel::{CameraGeometry, RasterParams, generate_2d_shower_model, make_toymodel_shower_image};
//! use units::{deg, m};
//!
//! let geom = CameraGeometry::rectangular((20, 20), (m(-0.5), m(0.5)), (m(-0.5), m(0.5)))?;
//! let model = generate_2d_shower_model(&[0.25, 0.0], 0.02, 0.1, deg(40.0))?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let out = make_toymodel_shower_image(&geom, &model, RasterParams::default(), &mut rng)?;
//! assert_eq!(out.image.shape(), &[20, 20]);
//! # Ok::<(), toymodel::Error>(())
//! ```

mod exports;
pub use exports::*;

pub mod error;
pub mod types;
pub mod linalg;
pub mod gauss;
pub mod density;
pub mod shower;
pub mod muon;
pub mod image;
pub mod config;
pub mod utils;
