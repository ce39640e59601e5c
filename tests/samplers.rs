//! End-to-end checks of the sampler lifecycle across all three models.

use drumhead::samplers::{BesselSettings, FdtdSettings, PoissonSettings};
use drumhead::{
    AudioSampler, BesselModel, BitDepth, FdtdModel, PoissonModel,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_modal_models_follow_the_lifecycle() {
    let mut bessel = BesselModel::with_rng(
        0.02,
        48_000,
        BesselSettings::default(),
        StdRng::seed_from_u64(21),
    )
    .unwrap();
    let mut poisson = PoissonModel::with_rng(
        0.02,
        48_000,
        PoissonSettings::default(),
        StdRng::seed_from_u64(22),
    )
    .unwrap();

    assert!(bessel.labels().is_empty());
    assert!(poisson.labels().is_empty());

    for i in 0..12 {
        bessel.update_properties(Some(i));
        bessel.generate_waveform();
        let labels = bessel.labels();
        assert_eq!(labels["drum_size"].len(), 1);
        assert_eq!(labels["strike_location"].len(), 2);
        assert!(bessel.core().waveform.iter().all(|s| s.abs() <= 1.0));

        poisson.update_properties(Some(i));
        poisson.generate_waveform();
        let labels = poisson.labels();
        assert_eq!(labels["aspect_ratio"].len(), 1);
        assert_eq!(labels["drum_size"].len(), 1);
        assert_eq!(labels["strike_location"].len(), 2);
        assert!(poisson.core().waveform.iter().all(|s| s.abs() <= 1.0));
    }
}

#[test]
fn test_exported_audio_is_readable() {
    let mut model = PoissonModel::with_rng(
        0.02,
        44_100,
        PoissonSettings::default(),
        StdRng::seed_from_u64(23),
    )
    .unwrap();
    model.update_properties(None);
    model.generate_waveform();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.wav");
    model.export(&path, BitDepth::B16).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.len() as usize, model.core().length);
}

#[test]
fn test_fdtd_is_stable_across_physical_parameters() {
    let limit = 1.0 / 2f64.sqrt();
    for drum_size in [0.1, 0.3, 0.5] {
        for material_density in [0.25, 0.0625] {
            for tension in [2000.0, 3000.0] {
                let settings = FdtdSettings {
                    drum_size,
                    material_density,
                    tension,
                    ..FdtdSettings::default()
                };
                let mut model =
                    FdtdModel::with_rng(0.005, 48_000, settings, StdRng::seed_from_u64(24))
                        .unwrap();
                assert!(model.courant_number() <= limit + 1e-12);

                model.update_properties(None);
                model.generate_waveform();
                let waveform = &model.core().waveform;
                assert!(waveform.iter().all(|s| s.is_finite()));
                assert!(waveform.iter().all(|s| s.abs() <= 1.0 + 1e-9));
                assert!(waveform.iter().any(|s| s.abs() > 0.0));
            }
        }
    }
}

#[test]
fn test_lossless_membranes_do_not_decay() {
    let bessel = BesselModel::with_rng(
        0.01,
        48_000,
        BesselSettings {
            decay_time: f64::INFINITY,
            ..BesselSettings::default()
        },
        StdRng::seed_from_u64(25),
    )
    .unwrap();
    assert_eq!(bessel.decay(), 0.0);

    let poisson = PoissonModel::with_rng(
        0.01,
        48_000,
        PoissonSettings {
            decay_time: f64::INFINITY,
            ..PoissonSettings::default()
        },
        StdRng::seed_from_u64(26),
    )
    .unwrap();
    assert_eq!(poisson.decay(), 0.0);

    let fdtd = FdtdModel::with_rng(
        0.005,
        48_000,
        FdtdSettings {
            decay_time: f64::INFINITY,
            ..FdtdSettings::default()
        },
        StdRng::seed_from_u64(27),
    )
    .unwrap();
    assert_eq!(fdtd.stencil_coefficients().2, 1.0);
}

#[test]
fn test_drum_resampling_cadence_is_shared() {
    let mut model = FdtdModel::with_rng(
        0.005,
        48_000,
        FdtdSettings::default(),
        StdRng::seed_from_u64(28),
    )
    .unwrap();
    model.update_properties(Some(0));
    let vertices = model.labels()["vertices"].clone();
    for i in 1..5 {
        model.update_properties(Some(i));
        assert_eq!(model.labels()["vertices"], vertices);
    }
    model.update_properties(Some(5));
    assert_ne!(model.labels()["vertices"], vertices);
}
