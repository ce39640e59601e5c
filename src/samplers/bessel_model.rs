//! Modal synthesis of a circular membrane.

use std::f64::consts::PI;

use log::{debug, trace};
use ndarray::Array2;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{additive_waveform, decay_rate, validate_physical, wavespeed};
use crate::error::Error;
use crate::physics::{circular_amplitudes, circular_series};
use crate::sampler::{AudioSampler, Labels, SamplerCore};

/// Physical configuration of a [`BesselModel`].
#[derive(Debug, Clone, Copy)]
pub struct BesselSettings {
    /// Peak strike amplitude, in [0, 1].
    pub amplitude: f64,
    /// T60 decay time (seconds); infinity models a lossless membrane.
    pub decay_time: f64,
    /// Number of angular mode orders.
    pub modes_m: usize,
    /// Number of radial mode orders.
    pub modes_n: usize,
    /// Areal density of the membrane (kg/m^2).
    pub material_density: f64,
    /// Membrane tension at rest (N/m).
    pub tension: f64,
}

impl Default for BesselSettings {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            decay_time: 2.0,
            modes_m: 10,
            modes_n: 10,
            material_density: 0.2,
            tension: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drum {
    /// Radius of the membrane (meters).
    size: f64,
    /// Frequency scaling c / L (Hz).
    gamma: f64,
    /// Strike position in polar coordinates (fractional radius, angle).
    strike: (f64, f64),
}

/// A circular membrane rendered by summing its Bessel eigenmodes as decaying
/// sinusoids.
///
/// # Examples
///
/// ```no_run
/// use drumhead::{AudioSampler, BesselModel};
///
/// let mut model = BesselModel::new(1.0, 48_000).unwrap();
/// model.update_properties(None);
/// model.generate_waveform();
/// assert!(model.core().waveform.iter().any(|s| s.abs() > 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct BesselModel<R: Rng = ThreadRng> {
    core: SamplerCore,
    settings: BesselSettings,
    rng: R,
    /// Bessel zeros z_mn, fixed for the lifetime of the model.
    series: Array2<f64>,
    decay: f64,
    wavespeed: f64,
    drum: Option<Drum>,
}

impl BesselModel {
    /// A model with default physical settings, seeded from the thread RNG.
    pub fn new(duration: f64, sample_rate: u32) -> Result<Self, Error> {
        Self::with_settings(duration, sample_rate, BesselSettings::default())
    }

    pub fn with_settings(
        duration: f64,
        sample_rate: u32,
        settings: BesselSettings,
    ) -> Result<Self, Error> {
        Self::with_rng(duration, sample_rate, settings, rand::thread_rng())
    }
}

impl<R: Rng> BesselModel<R> {
    /// A model drawing all of its random properties from `rng`.
    pub fn with_rng(
        duration: f64,
        sample_rate: u32,
        settings: BesselSettings,
        rng: R,
    ) -> Result<Self, Error> {
        validate_physical(
            settings.amplitude,
            settings.decay_time,
            settings.material_density,
            settings.tension,
        )?;
        let core = SamplerCore::new(duration, sample_rate)?;
        let series = circular_series(settings.modes_m, settings.modes_n)?;
        let decay = decay_rate(core.sample_interval(), settings.decay_time);
        Ok(Self {
            core,
            rng,
            series,
            decay,
            wavespeed: wavespeed(settings.tension, settings.material_density),
            settings,
            drum: None,
        })
    }

    /// Per-sample exponential decay rate; exactly zero for an infinite T60.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Current membrane radius, once sampled.
    pub fn drum_size(&self) -> Option<f64> {
        self.drum.map(|d| d.size)
    }

    /// Current strike position `(r, theta)`, once sampled.
    pub fn strike_location(&self) -> Option<(f64, f64)> {
        self.drum.map(|d| d.strike)
    }
}

impl<R: Rng> AudioSampler for BesselModel<R> {
    fn core(&self) -> &SamplerCore {
        &self.core
    }

    fn update_properties(&mut self, index: Option<usize>) {
        if index.is_none_or(|i| i % 5 == 0) {
            let size = self.rng.gen_range(0.1..2.0);
            debug!("resampled circular membrane: radius {size:.3} m");
            self.drum = Some(Drum {
                size,
                gamma: self.wavespeed / size,
                // A fresh drum is always struck dead centre first.
                strike: (0.0, 0.0),
            });
        } else if let Some(drum) = &mut self.drum {
            drum.strike = (
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(0.0..PI),
            );
        }
    }

    fn generate_waveform(&mut self) {
        let Some(drum) = self.drum else { return };
        let Ok(amplitudes) = circular_amplitudes(
            drum.strike.0,
            drum.strike.1,
            self.settings.modes_m,
            self.settings.modes_n,
        ) else {
            return;
        };
        let sample_interval = self.core.sample_interval();
        additive_waveform(
            &mut self.core.waveform,
            &amplitudes,
            &self.series,
            drum.gamma,
            sample_interval,
            self.decay,
            self.settings.amplitude,
        );
        trace!(
            "rendered {} samples for a strike at (r {:.3}, theta {:.3})",
            self.core.length, drum.strike.0, drum.strike.1
        );
    }

    fn labels(&self) -> Labels {
        let mut labels = Labels::new();
        if let Some(drum) = &self.drum {
            labels.insert("drum_size".into(), vec![drum.size]);
            labels.insert("strike_location".into(), vec![drum.strike.0, drum.strike.1]);
        }
        labels
    }
}
