//! The sampler lifecycle shared by every synthesis model.
//!
//! The intended use inside a dataset generation loop:
//!
//! ```no_run
//! use drumhead::{AudioSampler, BitDepth, BesselModel};
//!
//! let mut sampler = BesselModel::new(1.0, 48_000).unwrap();
//! for i in 0..100 {
//!     sampler.update_properties(Some(i));
//!     sampler.generate_waveform();
//!     let x = &sampler.core().waveform;
//!     let y = sampler.labels();
//!     sampler.export(format!("{i}.wav").as_ref(), BitDepth::B24).unwrap();
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

/// Label record attached to a generated waveform: an ordered mapping from
/// label name to a small sequence of values.
pub type Labels = BTreeMap<String, Vec<f64>>;

/// PCM bit depths supported by [`AudioSampler::export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    B16,
    #[default]
    B24,
    B32,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            Self::B16 => 16,
            Self::B24 => 24,
            Self::B32 => 32,
        }
    }
}

/// The concrete state every sampler carries: audio-domain configuration and
/// the waveform buffer it regenerates in place.
#[derive(Debug, Clone)]
pub struct SamplerCore {
    /// Duration of the audio file (seconds).
    pub duration: f64,
    /// Audio sample rate (Hz).
    pub sample_rate: u32,
    /// Length of the audio file (samples).
    pub length: usize,
    /// The audio sample itself, overwritten on each generation.
    pub waveform: Vec<f64>,
}

impl SamplerCore {
    /// Validates the audio-domain configuration and preallocates a zeroed
    /// waveform of `ceil(duration * sample_rate)` samples.
    pub fn new(duration: f64, sample_rate: u32) -> Result<Self, Error> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::InvalidDuration(duration));
        }
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }
        let length = (duration * sample_rate as f64).ceil() as usize;
        Ok(Self {
            duration,
            sample_rate,
            length,
            waveform: vec![0.0; length],
        })
    }

    /// Time between consecutive samples (seconds).
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }
}

/// The four-call lifecycle contract every synthesis model implements.
///
/// The order of operations per dataset entry is `update_properties` →
/// `generate_waveform` → `labels` → `export`. Calling `generate_waveform`
/// or `labels` before the first `update_properties` is not an error: the
/// waveform stays zeroed and the labels are empty, by contract.
pub trait AudioSampler {
    /// Shared audio-domain state and the produced waveform.
    fn core(&self) -> &SamplerCore;

    /// Resamples model properties for dataset entry `index`.
    ///
    /// Every fifth index (and the initial `None` call) redraws the drum
    /// itself; every other call redraws only the strike configuration.
    fn update_properties(&mut self, index: Option<usize>);

    /// Regenerates the waveform buffer from the current properties. A no-op
    /// while the model is uninitialised.
    fn generate_waveform(&mut self);

    /// Labels describing the current waveform; empty until the first
    /// `update_properties` call.
    fn labels(&self) -> Labels;

    /// Writes the waveform as a mono PCM WAV file.
    fn export(&self, path: &Path, bit_depth: BitDepth) -> Result<(), Error> {
        let core = self.core();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: core.sample_rate,
            bits_per_sample: bit_depth.bits(),
            sample_format: hound::SampleFormat::Int,
        };
        let scale = ((1i64 << (bit_depth.bits() - 1)) - 1) as f64;
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &core.waveform {
            writer.write_sample((sample.clamp(-1.0, 1.0) * scale) as i32)?;
        }
        writer.finalize()?;
        Ok(())
    }
}
