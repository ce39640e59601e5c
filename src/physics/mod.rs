//! Membrane acoustics: eigenmode mathematics and finite-difference stepping.

mod bessel;
mod fdtd;
mod modes;

pub use bessel::{bessel_j, bessel_j_zero};
pub use fdtd::{fdtd_waveform, raised_cosine_1d, raised_cosine_2d};
pub use modes::{
    circular_amplitudes, circular_series, rectangular_amplitudes, rectangular_series,
};
