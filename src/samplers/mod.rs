//! The concrete synthesis models: circular and rectangular modal synthesis
//! and the finite-difference drum.

mod bessel_model;
mod fdtd_model;
mod poisson_model;

pub use bessel_model::{BesselModel, BesselSettings};
pub use fdtd_model::{FdtdModel, FdtdSettings};
pub use poisson_model::{PoissonModel, PoissonSettings};

use std::f64::consts::TAU;

use ndarray::Array2;

use crate::error::Error;

/// Per-sample exponential decay rate for a T60 of `decay_time` seconds.
///
/// An infinite decay time means a lossless membrane, which must map to a rate
/// of exactly zero so the envelope `exp(i * rate)` stays pinned at one.
pub(crate) fn decay_rate(sample_interval: f64, decay_time: f64) -> f64 {
    if decay_time.is_infinite() {
        0.0
    } else {
        -sample_interval * 6.0 * 10f64.ln() / decay_time
    }
}

/// Transverse wave speed of a membrane under `tension` with areal `density`.
pub(crate) fn wavespeed(tension: f64, density: f64) -> f64 {
    (tension / density).sqrt()
}

pub(crate) fn ensure_positive(value: f64, name: &'static str) -> Result<(), Error> {
    if value <= 0.0 || !value.is_finite() {
        return Err(Error::InvalidPhysicalParameter(name));
    }
    Ok(())
}

/// Validates the parameters shared by every model: a strike amplitude in
/// [0, 1], a positive (possibly infinite) T60, and positive material
/// properties.
pub(crate) fn validate_physical(
    amplitude: f64,
    decay_time: f64,
    density: f64,
    tension: f64,
) -> Result<(), Error> {
    if !(0.0..=1.0).contains(&amplitude) || amplitude.is_nan() {
        return Err(Error::InvalidAmplitude(amplitude));
    }
    if decay_time <= 0.0 || decay_time.is_nan() {
        return Err(Error::InvalidPhysicalParameter("decay time"));
    }
    ensure_positive(density, "material density")?;
    ensure_positive(tension, "tension")?;
    Ok(())
}

/// Renders an additive modal waveform in place.
///
/// Each mode contributes a sinusoid at `gamma * series * 2 pi * k` radians per
/// sample, weighted by the absolute strike amplitude, under a shared
/// exponential envelope. The sum is normalised by the mode count and the
/// loudest weight so the result stays within `[-amplitude, amplitude]`. A
/// strike landing on a node of every mode leaves the waveform silent.
pub(crate) fn additive_waveform(
    waveform: &mut [f64],
    amplitudes: &Array2<f64>,
    series: &Array2<f64>,
    gamma: f64,
    sample_interval: f64,
    decay: f64,
    amplitude: f64,
) {
    let weights: Vec<f64> = amplitudes.iter().map(|a| amplitude * a.abs()).collect();
    let rates: Vec<f64> = series
        .iter()
        .map(|z| gamma * z * TAU * sample_interval)
        .collect();
    let peak = weights.iter().cloned().fold(0.0, f64::max);
    if peak <= f64::EPSILON {
        waveform.fill(0.0);
        return;
    }
    let norm = weights.len() as f64 * peak;
    for (i, sample) in waveform.iter_mut().enumerate() {
        let t = i as f64;
        let envelope = (t * decay).exp();
        let mut acc = 0.0;
        for (w, rate) in weights.iter().zip(&rates) {
            acc += w * (t * rate).sin();
        }
        *sample = acc * envelope / norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_decay_rate_is_zero_for_a_lossless_membrane() {
        assert_eq!(decay_rate(1.0 / 48_000.0, f64::INFINITY), 0.0);
        assert!(decay_rate(1.0 / 48_000.0, 2.0) < 0.0);
    }

    #[test]
    fn test_additive_waveform_is_normalised() {
        let amplitudes = array![[1.0, -0.5], [0.25, 0.1]];
        let series = array![[2.4, 5.5], [3.8, 7.0]];
        let mut waveform = vec![0.0; 4096];
        additive_waveform(
            &mut waveform,
            &amplitudes,
            &series,
            100.0,
            1.0 / 48_000.0,
            0.0,
            1.0,
        );
        assert!(waveform.iter().any(|s| s.abs() > 0.0));
        for s in &waveform {
            assert!(s.abs() <= 1.0);
        }
    }

    #[test]
    fn test_silent_strike_leaves_silence() {
        let amplitudes = array![[0.0, 0.0]];
        let series = array![[2.4, 5.5]];
        let mut waveform = vec![1.0; 128];
        additive_waveform(
            &mut waveform,
            &amplitudes,
            &series,
            100.0,
            1.0 / 48_000.0,
            -0.001,
            1.0,
        );
        assert!(waveform.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_physical_validation() {
        assert!(validate_physical(1.0, f64::INFINITY, 0.2, 2000.0).is_ok());
        assert!(validate_physical(1.5, 2.0, 0.2, 2000.0).is_err());
        assert!(validate_physical(-0.1, 2.0, 0.2, 2000.0).is_err());
        assert!(validate_physical(1.0, 0.0, 0.2, 2000.0).is_err());
        assert!(validate_physical(1.0, 2.0, 0.0, 2000.0).is_err());
        assert!(validate_physical(1.0, 2.0, 0.2, -1.0).is_err());
    }
}
