//! Closed-form eigenmode series and strike amplitudes for canonical membranes.
//!
//! Circular membranes take their angular-frequency scaling from the zeros of
//! the Bessel functions of the first kind; rectangular membranes from the
//! sine-series eigenfunctions of a unit-area rectangle with aspect ratio
//! epsilon. All functions here are pure and deterministic in their inputs.

use std::f64::consts::PI;

use ndarray::Array2;

use super::bessel::{bessel_j, bessel_j_zero};
use crate::error::Error;

fn validate_modes(m: usize, n: usize) -> Result<(), Error> {
    if m < 1 || n < 1 {
        return Err(Error::InvalidModeCount { m, n });
    }
    Ok(())
}

/// The M x N series of Bessel zeros z_mn for a circular membrane.
///
/// Entry `(m, n)` is the (n+1)-th positive zero of J_m, the frequency-scaling
/// value of the mode with angular order m and radial order n.
///
/// # Examples
///
/// ```
/// use drumhead::physics::circular_series;
///
/// let series = circular_series(2, 2).unwrap();
/// assert_eq!(series.dim(), (2, 2));
/// assert!((series[[0, 0]] - 2.404825557695773).abs() < 1e-6);
/// ```
pub fn circular_series(m: usize, n: usize) -> Result<Array2<f64>, Error> {
    validate_modes(m, n)?;
    Ok(Array2::from_shape_fn((m, n), |(i, j)| {
        bessel_j_zero(i, j + 1)
    }))
}

/// Modal amplitude weights for a strike at polar position `(r, theta)` on a
/// circular membrane.
///
/// Entry `(m, n)` evaluates the mode shape J_m(z_mn r) cos(m theta) at the
/// strike point; `r` is the fractional radius.
pub fn circular_amplitudes(r: f64, theta: f64, m: usize, n: usize) -> Result<Array2<f64>, Error> {
    let series = circular_series(m, n)?;
    Ok(Array2::from_shape_fn((m, n), |(i, j)| {
        bessel_j(i, series[[i, j]] * r) * (i as f64 * theta).cos()
    }))
}

/// Scaled eigenfrequency terms for a unit-area rectangular membrane of aspect
/// ratio `epsilon` (side lengths sqrt(epsilon) by 1/sqrt(epsilon)).
///
/// Entry `(m, n)` is sqrt(((m+1)/sqrt(epsilon))^2 + ((n+1) sqrt(epsilon))^2).
pub fn rectangular_series(m: usize, n: usize, epsilon: f64) -> Result<Array2<f64>, Error> {
    validate_modes(m, n)?;
    if epsilon <= 0.0 || !epsilon.is_finite() {
        return Err(Error::InvalidPhysicalParameter("aspect ratio"));
    }
    let root = epsilon.sqrt();
    Ok(Array2::from_shape_fn((m, n), |(i, j)| {
        (((i + 1) as f64 / root).powi(2) + ((j + 1) as f64 * root).powi(2)).sqrt()
    }))
}

/// Modal amplitude weights for a strike at cartesian `(x, y)` on a unit-area
/// rectangular membrane of aspect ratio `epsilon`.
///
/// The strike point lives on the membrane itself: x in [0, sqrt(epsilon)],
/// y in [0, 1/sqrt(epsilon)].
pub fn rectangular_amplitudes(
    (x, y): (f64, f64),
    m: usize,
    n: usize,
    epsilon: f64,
) -> Result<Array2<f64>, Error> {
    validate_modes(m, n)?;
    if epsilon <= 0.0 || !epsilon.is_finite() {
        return Err(Error::InvalidPhysicalParameter("aspect ratio"));
    }
    let root = epsilon.sqrt();
    Ok(Array2::from_shape_fn((m, n), |(i, j)| {
        ((i + 1) as f64 * PI * x / root).sin() * ((j + 1) as f64 * PI * y * root).sin()
    }))
}
