//! Configuration file parser for toy-model image generation

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

use geometry::CameraGeometry;
use units::{m, m_, parse_angle, rad, radian_, Angle, Length};

use crate::density::Model;
use crate::error::{invalid, Error, Result};
use crate::image::RasterParams;
use crate::muon::MuonRingModel;
use crate::shower::ShowerModel;
use crate::types::{Intensityf64, Point, Variancef64};

// TOML has no notion of units, so quantities such as `"30 cm"` are written as
// strings and handed to `uom`'s parser.
fn deserialize_uom<'d, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    String::deserialize(deserializer)?
        .parse::<T>()
        .map_err(de::Error::custom)
}

fn deserialize_uom_2d<'d, D, T>(deserializer: D) -> std::result::Result<(T, T), D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let (x, y) = <(String, String)>::deserialize(deserializer)?;
    tr_tup_res((x.parse(), y.parse())).map_err(de::Error::custom)
}

/// Angles may be given as bare numbers (radians) or as strings with units
/// understood by `units::parse_angle`, such as `"35d"`.
fn deserialize_angle<'d, D>(deserializer: D) -> std::result::Result<Angle, D::Error>
where
    D: Deserializer<'d>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AngleSpec { Radians(f64), Text(String) }

    match AngleSpec::deserialize(deserializer)? {
        AngleSpec::Radians(x) => Ok(rad(x)),
        AngleSpec::Text   (s) => parse_angle(&s).map_err(de::Error::custom),
    }
}

/// Transpose 2-tuple of `Result`
///
/// `Ok` if both elements `Ok`; otherwise the first `Err`.
fn tr_tup_res<O, E>((x, y): (std::result::Result<O, E>, std::result::Result<O, E>)) -> std::result::Result<(O, O), E> {
    Ok((x?, y?))
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Seed for the random number generator. Fresh entropy is used if absent.
    pub seed: Option<u64>,

    #[serde(default)]
    pub camera: Camera,

    pub shower: Option<Shower>,

    pub muon: Option<Muon>,

    #[serde(default)]
    pub noise: Noise,
}

/// Rectangular camera
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Camera {

    /// Number of pixels along x and y
    #[serde(default = "default_npix")]
    pub npix: (usize, usize),

    #[serde(default = "default_range")]
    #[serde(deserialize_with = "deserialize_uom_2d")]
    pub range_x: (Length, Length),

    #[serde(default = "default_range")]
    #[serde(deserialize_with = "deserialize_uom_2d")]
    pub range_y: (Length, Length),
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Shower {
    #[serde(deserialize_with = "deserialize_uom_2d")]
    pub centroid: (Length, Length),

    /// Variance along the minor axis, in m²
    pub width: Variancef64,

    /// Variance along the major axis, in m²
    pub length: Variancef64,

    #[serde(default = "default_psi")]
    #[serde(deserialize_with = "deserialize_angle")]
    pub psi: Angle,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Muon {
    #[serde(deserialize_with = "deserialize_uom")]
    pub radius: Length,

    #[serde(deserialize_with = "deserialize_uom")]
    pub width: Length,

    #[serde(default = "default_centre")]
    #[serde(deserialize_with = "deserialize_uom_2d")]
    pub centre: (Length, Length),
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Noise {
    #[serde(default = "default_intensity")]
    pub intensity: Intensityf64,

    #[serde(default = "default_nsb_level_pe")]
    pub nsb_level_pe: Intensityf64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { npix: default_npix(), range_x: default_range(), range_y: default_range() }
    }
}

impl Default for Noise {
    fn default() -> Self {
        let RasterParams { intensity, nsb_level_pe } = RasterParams::default();
        Self { intensity, nsb_level_pe }
    }
}

fn default_npix()          -> (usize, usize)   { (40, 40) }
fn default_range()         -> (Length, Length) { (m(-0.5), m(0.5)) }
fn default_centre()        -> (Length, Length) { (m(0.0), m(0.0)) }
fn default_psi()           -> Angle            { rad(0.0) }
fn default_intensity()     -> Intensityf64     { RasterParams::default().intensity }
fn default_nsb_level_pe()  -> Intensityf64     { RasterParams::default().nsb_level_pe }

impl Config {

    /// Ensure that exactly one model is described
    pub fn validate(&self) -> Result<()> {
        self.model_section().map(drop)
    }

    fn model_section(&self) -> Result<ModelSection<'_>> {
        match (&self.shower, &self.muon) {
            (Some(shower), None) => Ok(ModelSection::Shower(shower)),
            (None, Some(muon)  ) => Ok(ModelSection::Muon  (muon)),
            (Some(_), Some(_)  ) => Err(invalid("model", "specify only one of [shower] and [muon]")),
            (None   , None     ) => Err(invalid("model", "one of [shower] or [muon] is required")),
        }
    }

    pub fn camera_geometry(&self) -> Result<CameraGeometry> {
        let Camera { npix, range_x, range_y } = self.camera;
        Ok(CameraGeometry::rectangular(npix, range_x, range_y)?)
    }

    pub fn model(&self) -> Result<Model> {
        match self.model_section()? {
            ModelSection::Shower(shower) => shower.model().map(Model::from),
            ModelSection::Muon  (muon)   =>   muon.model().map(Model::from),
        }
    }

    pub fn raster_params(&self) -> RasterParams {
        RasterParams::new(self.noise.intensity, self.noise.nsb_level_pe)
    }
}

enum ModelSection<'c> {
    Shower(&'c Shower),
    Muon  (&'c Muon),
}

impl Shower {
    pub fn model(&self) -> Result<ShowerModel> {
        let (x, y) = self.centroid;
        ShowerModel::new(Point::new(m_(x), m_(y)), self.width, self.length, radian_(self.psi))
    }
}

impl Muon {
    pub fn model(&self) -> Result<MuonRingModel> {
        let (x, y) = self.centre;
        MuonRingModel::new(m_(self.radius), m_(self.width), Point::new(m_(x), m_(y)))
    }
}

/// Read, parse and validate a TOML configuration file
pub fn read_config_file(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let config: Config = toml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}
