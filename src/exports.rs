pub use crate::error::{Error, Result};
pub use crate::density::{Density, Model};
pub use crate::shower::{generate_2d_shower_model, ShowerModel};
pub use crate::muon::{generate_muon_model, MuonRingModel};
pub use crate::image::{make_toymodel_shower_image, rasterize, RasterParams, RasterizedImage};

pub use geometry::CameraGeometry;
pub use crate::types::{Point, Vector};
