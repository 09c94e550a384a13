//! Rasterization of toy models onto camera pixels, with Poisson signal and
//! night-sky-background noise.
//!
//! The expected number of photo-electrons in each pixel is the model density
//! at the pixel position times the overall `intensity`, *truncated* towards
//! zero. Both signal and noise are then drawn from Poisson distributions, and
//! the image is pedestal-subtracted using the mean of the noise which was
//! actually drawn (not the nominal NSB level).

use itertools::Itertools;
use log::{debug, trace};
use ndarray::{ArrayD, ArrayViewD, Zip};
use rand::Rng;
use rand_distr::{Distribution, Poisson};

use geometry::CameraGeometry;

use crate::density::Density;
use crate::error::{invalid, Result};
use crate::types::{Count, Densityf64, Intensityf64};

/// Largest Poisson mean, in photo-electrons per pixel, that signal or noise
/// may have.
pub const MAX_MEAN_PE: f64 = i32::MAX as f64;

/// Photo-electron scales used when rasterizing a model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterParams {

    /// Factor converting model density into expected photo-electrons
    pub intensity: Intensityf64,

    /// Mean night-sky-background photo-electrons per pixel
    pub nsb_level_pe: Intensityf64,
}

impl Default for RasterParams {
    fn default() -> Self { Self { intensity: 50.0, nsb_level_pe: 50.0 } }
}

impl RasterParams {
    pub fn new(intensity: Intensityf64, nsb_level_pe: Intensityf64) -> Self {
        Self { intensity, nsb_level_pe }
    }

    pub fn validate(&self) -> Result<()> {
        let Self { intensity, nsb_level_pe } = *self;
        if !(intensity.is_finite() && intensity > 0.0) {
            return Err(invalid("intensity", format!("must be finite and positive, got {intensity}")))
        }
        if !(nsb_level_pe.is_finite() && nsb_level_pe >= 0.0) {
            return Err(invalid("nsb_level_pe", format!("must be finite and non-negative, got {nsb_level_pe}")))
        }
        if nsb_level_pe > MAX_MEAN_PE {
            return Err(invalid("nsb_level_pe", format!("must not exceed {MAX_MEAN_PE} p.e., got {nsb_level_pe}")))
        }
        Ok(())
    }
}

/// A simulated, pedestal-subtracted camera image together with the signal and
/// noise counts from which it was made. All three arrays have the shape of the
/// pixel geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizedImage {
    /// `signal + noise - pedestal`
    pub image: ArrayD<f64>,
    pub signal: ArrayD<Count>,
    pub noise: ArrayD<Count>,
    /// Mean of `noise`
    pub pedestal: f64,
}

impl RasterizedImage {
    pub fn shape(&self) -> &[usize] { self.image.shape() }

    pub fn len(&self) -> usize { self.image.len() }

    pub fn is_empty(&self) -> bool { self.image.is_empty() }

    pub fn total_signal(&self) -> Count {
        self.signal.iter().fold(0, |total: Count, &s| total.saturating_add(s))
    }

    pub fn image_mean(&self) -> f64 { self.image.mean().unwrap_or(0.0) }

    pub fn signal_mean(&self) -> f64 { mean_count(&self.signal) }

    /// Smallest and largest pixel values of the image
    pub fn image_range(&self) -> Option<(f64, f64)> {
        self.image.iter().copied().minmax_by(f64::total_cmp).into_option()
    }
}

/// Expected photo-electrons per pixel: `density · intensity`, truncated
/// towards zero. Fails if any pixel would expect more than [`MAX_MEAN_PE`].
pub fn expected_counts(densities: &ArrayD<Densityf64>, intensity: Intensityf64) -> Result<ArrayD<Count>> {
    if let Some(bad) = densities.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
        return Err(invalid("density", format!("model density must be finite and non-negative, got {bad}")))
    }
    if let Some(bad) = densities.iter().map(|d| (d * intensity).trunc()).find(|&e| e > MAX_MEAN_PE) {
        return Err(invalid("intensity", format!("{bad} expected p.e. in a pixel exceeds the limit of {MAX_MEAN_PE}")))
    }
    Ok(densities.mapv(|d| (d * intensity).trunc() as Count))
}

/// Generate an image of `density` at `pixel_positions`, whose trailing axis
/// holds the `x` and `y` coordinate of each pixel.
///
/// Every call draws fresh signal and noise from `rng`: seed it to make the
/// output reproducible.
pub fn rasterize<D, R>(
    pixel_positions: ArrayViewD<f64>,
    density        : &D,
    params         : RasterParams,
    rng            : &mut R,
) -> Result<RasterizedImage>
where
    D: Density + ?Sized,
    R: Rng + ?Sized,
{
    params.validate()?;
    let densities = density.evaluate(pixel_positions)?;
    if densities.is_empty() { return Err(invalid("pixel_positions", "no pixels")) }

    let expected = expected_counts(&densities, params.intensity)?;
    trace!("expected photo-electrons per pixel: {expected}");

    let mut signal = ArrayD::<Count>::zeros(expected.raw_dim());
    for (s, &n) in signal.iter_mut().zip(expected.iter()) {
        *s = sample_poisson(n as f64, &mut *rng)?;
    }

    let noise = if params.nsb_level_pe == 0.0 {
        ArrayD::<Count>::zeros(signal.raw_dim())
    } else {
        let nsb = Poisson::new(params.nsb_level_pe)
            .map_err(|e| invalid("nsb_level_pe", e.to_string()))?;
        ArrayD::from_shape_simple_fn(signal.raw_dim(), || {
            let n: f64 = nsb.sample(&mut *rng);
            n as Count
        })
    };

    let pedestal = mean_count(&noise);
    let image = Zip::from(&signal)
        .and(&noise)
        .map_collect(|&s, &n| s as f64 + n as f64 - pedestal);

    debug!("rasterized {} pixels: total signal {} p.e., pedestal {pedestal:.3} p.e.",
           image.len(), signal.iter().map(|&s| s as f64).sum::<f64>());
    Ok(RasterizedImage { image, signal, noise, pedestal })
}

/// Generate an image of `density` in the pixels of `geometry`.
pub fn make_toymodel_shower_image<D, R>(
    geometry: &CameraGeometry,
    density : &D,
    params  : RasterParams,
    rng     : &mut R,
) -> Result<RasterizedImage>
where
    D: Density + ?Sized,
    R: Rng + ?Sized,
{
    rasterize(geometry.positions().view(), density, params, rng)
}

// `Poisson` requires a strictly positive mean
fn sample_poisson<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> Result<Count> {
    if mean == 0.0 { return Ok(0) }
    let poisson = Poisson::new(mean)
        .map_err(|e| invalid("density", format!("cannot sample Poisson({mean}): {e}")))?;
    let n: f64 = poisson.sample(rng);
    Ok(n as Count)
}

fn mean_count(counts: &ArrayD<Count>) -> f64 {
    if counts.is_empty() { return 0.0 }
    counts.iter().map(|&n| n as f64).sum::<f64>() / counts.len() as f64
}
