//! Crate-wide error type.
//!
//! Configuration problems fail fast at construction or at the offending call.
//! Uninitialised samplers are *not* errors: generating before the first
//! `update_properties` is a defined no-op, and labels default to an empty map.

use thiserror::Error;

/// Errors produced by shape construction, sampler configuration and export.
#[derive(Debug, Error)]
pub enum Error {
    /// Audio duration must be a positive number of seconds.
    #[error("duration must be positive, got {0}")]
    InvalidDuration(f64),

    /// The sample rate must be a positive frequency.
    #[error("sample rate must be positive")]
    InvalidSampleRate,

    /// Peak amplitude is a normalised value.
    #[error("amplitude must lie within [0, 1], got {0}")]
    InvalidAmplitude(f64),

    /// Modal synthesis needs at least one mode along each axis.
    #[error("mode counts must be at least 1, got {m}x{n}")]
    InvalidModeCount { m: usize, n: usize },

    /// A named physical parameter (density, tension, size, ...) was not positive.
    #[error("{0} must be positive")]
    InvalidPhysicalParameter(&'static str),

    /// Polygons are defined by three or more vertices.
    #[error("a polygon requires at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// The requested shape has no interior.
    #[error("shape has zero area")]
    DegenerateShape,

    /// Ellipse axes must both be positive lengths.
    #[error("ellipse axes must be positive, got major {major} and minor {minor}")]
    InvalidAxes { major: f64, minor: f64 },

    /// The physical parameters map the drum onto too few grid cells for the
    /// finite-difference stencil to fit.
    #[error("drum rasterises to a {cells}x{cells} grid, too coarse for the 2D stencil")]
    GridTooCoarse { cells: usize },

    /// Waveform export failed.
    #[error("failed to write waveform: {0}")]
    Export(#[from] hound::Error),
}
