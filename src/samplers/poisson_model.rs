//! Modal synthesis of a rectangular membrane.

use log::{debug, trace};
use ndarray::Array2;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{additive_waveform, decay_rate, validate_physical, wavespeed};
use crate::error::Error;
use crate::physics::{rectangular_amplitudes, rectangular_series};
use crate::sampler::{AudioSampler, Labels, SamplerCore};

/// Physical configuration of a [`PoissonModel`].
#[derive(Debug, Clone, Copy)]
pub struct PoissonSettings {
    /// Peak strike amplitude, in [0, 1].
    pub amplitude: f64,
    /// T60 decay time (seconds); infinity models a lossless membrane.
    pub decay_time: f64,
    /// Number of modes along the first axis.
    pub modes_m: usize,
    /// Number of modes along the second axis.
    pub modes_n: usize,
    /// Areal density of the membrane (kg/m^2).
    pub material_density: f64,
    /// Membrane tension at rest (N/m).
    pub tension: f64,
}

impl Default for PoissonSettings {
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

#[derive(Debug, Clone)]
struct Drum {
    /// Aspect ratio of the unit-area rectangle.
    epsilon: f64,
    /// Scaling length of the membrane (meters).
    size: f64,
    /// Frequency scaling c / L (Hz).
    gamma: f64,
    /// Eigenfrequency terms for the current aspect ratio.
    series: Array2<f64>,
    /// Strike position on the membrane, x in [0, sqrt(e)], y in [0, 1/sqrt(e)].
    strike: (f64, f64),
}

/// A unit-area rectangular membrane rendered by summing its sine eigenmodes
/// as decaying sinusoids.
///
/// The aspect ratio is resampled with the drum, so congruent rectangles of
/// different proportions appear across a dataset while the membrane area
/// stays fixed.
#[derive(Debug, Clone)]
pub struct PoissonModel<R: Rng = ThreadRng> {
    core: SamplerCore,
    settings: PoissonSettings,
    rng: R,
    decay: f64,
    wavespeed: f64,
    drum: Option<Drum>,
}

impl PoissonModel {
    /// A model with default physical settings, seeded from the thread RNG.
    pub fn new(duration: f64, sample_rate: u32) -> Result<Self, Error> {
        Self::with_settings(duration, sample_rate, PoissonSettings::default())
    }

    pub fn with_settings(
        duration: f64,
        sample_rate: u32,
        settings: PoissonSettings,
    ) -> Result<Self, Error> {
        Self::with_rng(duration, sample_rate, settings, rand::thread_rng())
    }
}

impl<R: Rng> PoissonModel<R> {
    /// A model drawing all of its random properties from `rng`.
    pub fn with_rng(
        duration: f64,
        sample_rate: u32,
        settings: PoissonSettings,
        rng: R,
    ) -> Result<Self, Error> {
        validate_physical(
            settings.amplitude,
            settings.decay_time,
            settings.material_density,
            settings.tension,
        )?;
        // Mode counts fail fast here rather than on the first update.
        rectangular_series(settings.modes_m, settings.modes_n, 1.0)?;
        let core = SamplerCore::new(duration, sample_rate)?;
        let decay = decay_rate(core.sample_interval(), settings.decay_time);
        Ok(Self {
            core,
            rng,
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

    /// Current aspect ratio, once sampled.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.drum.as_ref().map(|d| d.epsilon)
    }

    /// Current membrane size, once sampled.
    pub fn drum_size(&self) -> Option<f64> {
        self.drum.as_ref().map(|d| d.size)
    }

    /// Current strike position `(x, y)`, once sampled.
    pub fn strike_location(&self) -> Option<(f64, f64)> {
        self.drum.as_ref().map(|d| d.strike)
    }
}

impl<R: Rng> AudioSampler for PoissonModel<R> {
    fn core(&self) -> &SamplerCore {
        &self.core
    }

    fn update_properties(&mut self, index: Option<usize>) {
        if index.is_none_or(|i| i % 5 == 0) {
            let epsilon = self.rng.gen_range(0.25..4.0);
            let size = self.rng.gen_range(0.1..2.0);
            let Ok(series) =
                rectangular_series(self.settings.modes_m, self.settings.modes_n, epsilon)
            else {
                return;
            };
            debug!("resampled rectangular membrane: aspect {epsilon:.3}, size {size:.3} m");
            let root = epsilon.sqrt();
            self.drum = Some(Drum {
                epsilon,
                size,
                gamma: self.wavespeed / size,
                series,
                // A fresh drum is always struck dead centre first.
                strike: (root / 2.0, 1.0 / (2.0 * root)),
            });
        } else if let Some(drum) = &mut self.drum {
            let root = drum.epsilon.sqrt();
            drum.strike = (
                self.rng.gen_range(0.0..root),
                self.rng.gen_range(0.0..1.0 / root),
            );
        }
    }

    fn generate_waveform(&mut self) {
        let Some(drum) = &self.drum else { return };
        let Ok(amplitudes) = rectangular_amplitudes(
            drum.strike,
            self.settings.modes_m,
            self.settings.modes_n,
            drum.epsilon,
        ) else {
            return;
        };
        let sample_interval = self.core.sample_interval();
        let gamma = drum.gamma;
        additive_waveform(
            &mut self.core.waveform,
            &amplitudes,
            &drum.series,
            gamma,
            sample_interval,
            self.decay,
            self.settings.amplitude,
        );
        trace!(
            "rendered {} samples for a strike at ({:.3}, {:.3})",
            self.core.length, drum.strike.0, drum.strike.1
        );
    }

    fn labels(&self) -> Labels {
        let mut labels = Labels::new();
        if let Some(drum) = &self.drum {
            labels.insert("aspect_ratio".into(), vec![drum.epsilon]);
            labels.insert("drum_size".into(), vec![drum.size]);
            labels.insert("strike_location".into(), vec![drum.strike.0, drum.strike.1]);
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn model(seed: u64, settings: PoissonSettings) -> PoissonModel<StdRng> {
        PoissonModel::with_rng(0.02, 48_000, settings, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_uninitialised_model_is_silent_and_unlabelled() {
        let mut model = model(1, PoissonSettings::default());
        assert!(model.labels().is_empty());
        model.generate_waveform();
        assert!(model.core().waveform.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_first_strike_is_the_centre() {
        let mut model = model(2, PoissonSettings::default());
        model.update_properties(None);
        let epsilon = model.aspect_ratio().unwrap();
        let root = epsilon.sqrt();
        let (x, y) = model.strike_location().unwrap();
        assert!((x - root / 2.0).abs() < 1e-12);
        assert!((y - 1.0 / (2.0 * root)).abs() < 1e-12);

        model.generate_waveform();
        let waveform = &model.core().waveform;
        assert!(waveform.iter().any(|s| s.abs() > 0.0));
        assert!(waveform.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_strikes_stay_on_the_membrane() {
        let mut model = model(3, PoissonSettings::default());
        model.update_properties(Some(0));
        let epsilon = model.aspect_ratio().unwrap();
        let root = epsilon.sqrt();
        for i in 1..5 {
            model.update_properties(Some(i));
            assert_eq!(model.aspect_ratio(), Some(epsilon));
            let (x, y) = model.strike_location().unwrap();
            assert!((0.0..root).contains(&x));
            assert!((0.0..1.0 / root).contains(&y));
        }
    }

    #[test]
    fn test_every_fifth_update_resamples_the_drum() {
        let mut model = model(4, PoissonSettings::default());
        model.update_properties(Some(0));
        let size = model.drum_size().unwrap();
        model.update_properties(Some(5));
        assert_ne!(model.drum_size(), Some(size));
    }

    #[test]
    fn test_lossless_membrane_has_no_decay() {
        let settings = PoissonSettings {
            decay_time: f64::INFINITY,
            ..PoissonSettings::default()
        };
        assert_eq!(model(5, settings).decay(), 0.0);
    }

    #[test]
    fn test_labels_describe_the_current_drum() {
        let mut model = model(6, PoissonSettings::default());
        model.update_properties(None);
        let labels = model.labels();
        assert_eq!(labels["aspect_ratio"].len(), 1);
        assert_eq!(labels["drum_size"].len(), 1);
        assert_eq!(labels["strike_location"].len(), 2);
        assert!((0.25..4.0).contains(&labels["aspect_ratio"][0]));
        assert!((0.1..2.0).contains(&labels["drum_size"][0]));
    }
}
