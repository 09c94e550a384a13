use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The caller supplied a parameter outside its physical domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A covariance matrix which cannot describe a 2D Gaussian density
    #[error("numerically degenerate covariance: {0}")]
    NumericalDegeneracy(String),

    #[error("couldn't read config file `{}`: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Geometry(#[from] geometry::GeometryError),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidParameter { name, reason: reason.into() }
}
