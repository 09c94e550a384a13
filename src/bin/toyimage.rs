// ----------------------------------- CLI -----------------------------------

/// Command line interface for `toyimage` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    name = "toyimage",
    about = "Generate toy-model Cherenkov camera images and report their statistics",
)]
pub struct Cli {
    /// TOML configuration file. Overrides all other options.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Number of pixels along x and y of the rectangular camera
    #[clap(short = 'p', long, value_parser = parse_pair::<usize>, default_value = "40,40")]
    pub npix: (usize, usize),

    /// Half-width of the camera, in camera-plane units
    #[clap(long, default_value = "0.5 m")]
    pub half_width: Length,

    /// Factor converting model density into photo-electrons
    #[clap(short, long, default_value = "50")]
    pub intensity: f64,

    /// Night-sky background level in photo-electrons per pixel
    #[clap(short = 'b', long, default_value = "1000")]
    pub nsb: f64,

    /// Seed for the random number generator
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Number of images to generate
    #[clap(short = 'n', long, default_value = "1")]
    pub count: usize,

    #[clap(subcommand)]
    pub model: Option<ModelCli>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum ModelCli {

    /// Elliptical Gaussian shower image
    Shower {
        /// Shower centroid `x,y`
        #[clap(long, value_parser = parse_pair::<f64>, default_value = "0.2,0.0", allow_hyphen_values = true)]
        centroid: (f64, f64),

        /// Variance along the minor axis
        #[clap(short, long, default_value = "0.01")]
        width: f64,

        /// Variance along the major axis
        #[clap(short, long, default_value = "0.1")]
        length: f64,

        /// Orientation of the major axis, e.g. `35d` or `0.6rad`
        #[clap(long, value_parser = parse_angle, default_value = "35d", allow_hyphen_values = true)]
        psi: Angle,
    },

    /// Gaussian muon ring
    Muon {
        /// Ring radius
        #[clap(short, long, default_value = "0.3")]
        radius: f64,

        /// Ring thickness (standard deviation)
        #[clap(short, long, default_value = "0.05")]
        width: f64,

        /// Ring centre `x,y`
        #[clap(long, value_parser = parse_pair::<f64>, default_value = "0.0,0.0", allow_hyphen_values = true)]
        centre: (f64, f64),
    },
}

impl ModelCli {
    fn build(&self) -> toymodel::Result<Model> {
        match self {
            &ModelCli::Shower { centroid: (x, y), width, length, psi } =>
                generate_2d_shower_model(&[x, y], width, length, psi).map(Model::from),
            &ModelCli::Muon { radius, width, centre: (x, y) } =>
                MuonRingModel::new(radius, width, Point::new(x, y)).map(Model::from),
        }
    }
}

impl Default for ModelCli {
    fn default() -> Self {
        ModelCli::Shower { centroid: (0.2, 0.0), width: 0.01, length: 0.1, psi: deg(35.0) }
    }
}

// --------------------------------------------------------------------------------

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use toymodel::{
    CameraGeometry, Model, MuonRingModel, Point, RasterParams, RasterizedImage,
    generate_2d_shower_model, make_toymodel_shower_image,
    config::read_config_file,
    utils::{group_digits, parse_pair, timing::Progress},
};
use units::{deg, parse_angle, Angle, Length};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();
    let mut progress = Progress::new();

    // --- Camera, model and noise levels: from config file or command line -----------
    let (geometry, model, params, seed) = match &args.config {
        Some(path) => {
            progress.start(&format!("Reading {}", path.display()));
            let config = read_config_file(path)?;
            progress.done();
            (config.camera_geometry()?, config.model()?, config.raster_params(), config.seed)
        }
        None => {
            let h = args.half_width;
            let geometry = CameraGeometry::rectangular(args.npix, (-h, h), (-h, h))?;
            let model = args.model.clone().unwrap_or_default().build()?;
            (geometry, model, RasterParams::new(args.intensity, args.nsb), args.seed)
        }
    };
    info!("{model:?} on {:?} camera, {params:?}", geometry.shape());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    // --- Generate images ------------------------------------------------------------
    let bar = if args.count > 1 { ProgressBar::new(args.count as u64) } else { ProgressBar::hidden() };
    bar.set_style(ProgressStyle::default_bar()
                  .template("[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta_precise})")?);
    progress.startln(&format!("Generating {} image(s) of {} pixels",
                              group_digits(args.count), group_digits(geometry.n_pixels())));
    let images = (0..args.count)
        .map(|_| make_toymodel_shower_image(&geometry, &model, params, &mut rng))
        .inspect(|_| bar.inc(1))
        .collect::<Result<Vec<_>, _>>()?;
    bar.finish_and_clear();
    progress.done();

    // --- Report ---------------------------------------------------------------------
    for (n, image) in images.iter().enumerate().take(MAX_REPORTED) {
        report(n, image);
    }
    if images.len() > MAX_REPORTED {
        println!("... {} more", group_digits(images.len() - MAX_REPORTED));
    }
    let mean_signal = images.iter().map(|i| i.total_signal() as f64).sum::<f64>() / images.len().max(1) as f64;
    println!("Mean total signal: {mean_signal:.1} p.e.");
    Ok(())
}

const MAX_REPORTED: usize = 10;

fn report(n: usize, image: &RasterizedImage) {
    let (low, high) = image.image_range().unwrap_or((0.0, 0.0));
    let shape = image.shape().iter().join("x");
    println!("image {n:>3}: {shape} pixels, signal {:>9} p.e., pedestal {:8.2} p.e., range [{low:.1}, {high:.1}]",
             group_digits(image.total_signal()), image.pedestal);
}
