use float_eq::assert_float_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

use toymodel::{
    CameraGeometry, Density, Error, Model, Point, RasterParams,
    generate_2d_shower_model, generate_muon_model, make_toymodel_shower_image, rasterize,
};
use units::{deg, m, parse_angle};

fn lst_like_camera() -> CameraGeometry {
    CameraGeometry::rectangular((40, 40), (m(-0.5), m(0.5)), (m(-0.5), m(0.5))).unwrap()
}

// The canonical demonstration: a 35° shower on a bright night sky
#[test]
fn shower_on_bright_sky() -> Result<(), Error> {
    let geom = lst_like_camera();
    let psi = parse_angle("35d").unwrap();
    let model = generate_2d_shower_model(&[0.2, 0.0], 0.01, 0.1, psi)?;
    let mut rng = Isaac64Rng::seed_from_u64(2016);
    let out = make_toymodel_shower_image(&geom, &model, RasterParams::new(50.0, 1000.0), &mut rng)?;

    assert_eq!(out.image.shape(), geom.shape());
    assert_float_eq!(out.pedestal, 1000.0, abs <= 5.0);
    assert_float_eq!(out.image_mean(), out.signal_mean(), abs <= 1e-9);
    Ok(())
}

#[test]
fn flat_pixel_list_keeps_its_shape() -> Result<(), Error> {
    let geom = lst_like_camera();
    let flat = CameraGeometry::new(geom.pix_x().iter().copied().collect::<ndarray::Array1<_>>().into_dyn(),
                                   geom.pix_y().iter().copied().collect::<ndarray::Array1<_>>().into_dyn())?;
    let model = generate_2d_shower_model(&[0.0, 0.0], 0.01, 0.01, deg(0.0))?;
    let out = make_toymodel_shower_image(&flat, &model, RasterParams::default(), &mut Isaac64Rng::seed_from_u64(1))?;
    assert_eq!(out.shape(), &[1600]);
    Ok(())
}

#[test]
fn model_enum_dispatches_to_both_variants() -> Result<(), Error> {
    let geom = lst_like_camera();
    let positions = geom.positions();

    let shower: Model = generate_2d_shower_model(&[0.1, 0.1], 0.005, 0.02, deg(10.0))?.into();
    let ring = generate_muon_model(positions.view(), 0.3, 0.05, 0.0, 0.0)?;
    let ring_model: Model = toymodel::MuonRingModel::new(0.3, 0.05, Point::new(0.0, 0.0))?.into();

    assert_eq!(ring_model.evaluate(positions.view())?, ring);
    assert_eq!(shower.evaluate(positions.view())?.shape(), &[40, 40]);
    Ok(())
}

#[test]
fn zero_intensity_is_rejected() {
    let geom = lst_like_camera();
    let model = generate_2d_shower_model(&[0.0, 0.0], 0.01, 0.01, deg(0.0)).unwrap();
    let result = make_toymodel_shower_image(&geom, &model, RasterParams::new(0.0, 50.0), &mut Isaac64Rng::seed_from_u64(3));
    assert!(matches!(result, Err(Error::InvalidParameter { name: "intensity", .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pedestal_subtracted_image_preserves_signal_mean(
        seed      in any::<u64>(),
        intensity in 1.0 .. 500.0_f64,
        nsb       in 0.0 .. 200.0_f64,
        x         in -0.3 .. 0.3_f64,
        psi       in -3.2 .. 3.2_f64,
    ) {
        let geom = CameraGeometry::rectangular((16, 12), (m(-0.5), m(0.5)), (m(-0.4), m(0.4))).unwrap();
        let model = toymodel::ShowerModel::new(Point::new(x, 0.0), 0.005, 0.05, psi).unwrap();
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        let positions = geom.positions();
        let out = rasterize(positions.view(), &model, RasterParams::new(intensity, nsb), &mut rng).unwrap();
        prop_assert_eq!(out.shape(), &[12, 16]);
        prop_assert_eq!(out.noise.shape(), &[12, 16]);
        assert_float_eq!(out.image_mean(), out.signal_mean(), abs <= 1e-9);
        if nsb == 0.0 {
            prop_assert!(out.noise.iter().all(|&n| n == 0));
        }
    }
}
