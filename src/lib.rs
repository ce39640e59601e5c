//! Drumhead - physically modelled drum membrane synthesis
//!
//! This library generates drum sounds by simulating vibrating membranes, producing
//! fixed-length waveforms together with the geometric and physical labels that
//! describe them. It is intended as the audio front end of a machine-learning
//! data pipeline, but is equally usable as a stand-alone synthesis library.
//!
//! Two synthesis paths are provided:
//!
//! - **Modal synthesis** - closed-form eigenmode series for circular
//!   ([`BesselModel`]) and rectangular ([`PoissonModel`]) membranes, summed as
//!   decaying sinusoids.
//! - **Finite-difference synthesis** ([`FdtdModel`]) - a time-domain solver that
//!   rasterises an arbitrary 2D boundary shape into an occupancy mask and steps
//!   the 2D wave equation under Dirichlet boundary conditions.
//!
//! Both paths implement the same [`AudioSampler`] lifecycle:
//!
//! ```no_run
//! use drumhead::{AudioSampler, BitDepth, PoissonModel};
//!
//! let mut model = PoissonModel::new(1.0, 48_000).unwrap();
//! for i in 0..10 {
//!     model.update_properties(Some(i));
//!     model.generate_waveform();
//!     let labels = model.labels();
//!     assert_eq!(labels["drum_size"].len(), 1);
//!     model.export(format!("sample_{i:03}.wav").as_ref(), BitDepth::B24).unwrap();
//! }
//! ```

pub mod error;
pub mod geometry;
pub mod physics;
pub mod sampler;
pub mod samplers;

// Re-export commonly used types at the crate root
pub use error::Error;
pub use geometry::{
    Circle, CircleSettings, Ellipse, EllipseSettings, LineIntersection, Point, Polygon,
    PolygonSettings, RectangleSettings, Shape, ShapeSettings,
};
pub use sampler::{AudioSampler, BitDepth, Labels, SamplerCore};
pub use samplers::{BesselModel, FdtdModel, PoissonModel};
