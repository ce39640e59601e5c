//! Finite-difference synthesis of an arbitrarily shaped membrane.

use log::{debug, trace};
use ndarray::Array2;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{ensure_positive, validate_physical, wavespeed};
use crate::error::Error;
use crate::geometry::{Point, Shape, ShapeSettings};
use crate::physics::{fdtd_waveform, raised_cosine_2d};
use crate::sampler::{AudioSampler, Labels, SamplerCore};

/// Physical configuration of an [`FdtdModel`].
#[derive(Debug, Clone, Copy)]
pub struct FdtdSettings {
    /// Peak strike amplitude, in [0, 1].
    pub amplitude: f64,
    /// T60 decay time (seconds); infinity models a lossless membrane.
    pub decay_time: f64,
    /// Physical extent of the simulated domain (meters).
    pub drum_size: f64,
    /// Areal density of the membrane (kg/m^2).
    pub material_density: f64,
    /// Membrane tension at rest (N/m).
    pub tension: f64,
    /// Width of the raised cosine excitation (meters).
    pub strike_width: f64,
    /// How membrane boundaries are sampled.
    pub shape: ShapeSettings,
}

impl Default for FdtdSettings {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            decay_time: 2.0,
            drum_size: 0.3,
            material_density: 0.2,
            tension: 2000.0,
            strike_width: 0.02,
            shape: ShapeSettings::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct DrumState {
    shape: Shape,
    mask: Array2<bool>,
    strike: Point,
    strike_cell: (usize, usize),
    listen: Point,
    listen_cell: (usize, usize),
}

/// A membrane of arbitrary boundary shape, stepped with a 2D leapfrog scheme
/// over its rasterised occupancy mask.
///
/// The spatial step is derived from the temporal one so that the scheme runs
/// exactly at its two-dimensional stability limit (Courant number
/// `1 / sqrt(2)`), which maximises the simulated bandwidth for a given
/// sample rate.
#[derive(Debug, Clone)]
pub struct FdtdModel<R: Rng = ThreadRng> {
    core: SamplerCore,
    settings: FdtdSettings,
    rng: R,
    /// Grid cells per side, H = round(L / h).
    grid_size: usize,
    courant: f64,
    coefficients: (f64, f64, f64),
    /// Excitation radius in cells, never below one cell.
    sigma_cells: f64,
    state: Option<DrumState>,
}

impl FdtdModel {
    /// A model with default physical settings, seeded from the thread RNG.
    pub fn new(duration: f64, sample_rate: u32) -> Result<Self, Error> {
        Self::with_settings(duration, sample_rate, FdtdSettings::default())
    }

    pub fn with_settings(
        duration: f64,
        sample_rate: u32,
        settings: FdtdSettings,
    ) -> Result<Self, Error> {
        Self::with_rng(duration, sample_rate, settings, rand::thread_rng())
    }
}

impl<R: Rng> FdtdModel<R> {
    /// A model drawing all of its random properties from `rng`.
    pub fn with_rng(
        duration: f64,
        sample_rate: u32,
        settings: FdtdSettings,
        mut rng: R,
    ) -> Result<Self, Error> {
        validate_physical(
            settings.amplitude,
            settings.decay_time,
            settings.material_density,
            settings.tension,
        )?;
        ensure_positive(settings.drum_size, "drum size")?;
        ensure_positive(settings.strike_width, "strike width")?;
        // Unsatisfiable fixed shape settings fail here, not on the first update.
        settings.shape.sample(&mut rng)?;

        let core = SamplerCore::new(duration, sample_rate)?;
        let c = wavespeed(settings.tension, settings.material_density);
        let k = core.sample_interval();
        let h = c * k * 2f64.sqrt();
        let grid_size = (settings.drum_size / h).round() as usize;
        if grid_size < 8 {
            return Err(Error::GridTooCoarse { cells: grid_size });
        }

        let courant = c * k / h;
        let loss = if settings.decay_time.is_infinite() {
            0.0
        } else {
            6.0 * 10f64.ln() / settings.decay_time
        };
        let denominator = 1.0 + loss * k;
        let lambda2 = courant * courant;
        let coefficients = (
            (2.0 - 4.0 * lambda2) / denominator,
            lambda2 / denominator,
            (1.0 - loss * k) / denominator,
        );
        Ok(Self {
            core,
            rng,
            grid_size,
            courant,
            coefficients,
            sigma_cells: (settings.strike_width / h).max(1.0),
            settings,
            state: None,
        })
    }

    /// Courant number of the scheme; `1 / sqrt(2)` by construction.
    pub fn courant_number(&self) -> f64 {
        self.courant
    }

    /// Grid cells per side of the simulated domain.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// The `(c0, c1, c2)` coefficients of the lossy leapfrog update.
    pub fn stencil_coefficients(&self) -> (f64, f64, f64) {
        self.coefficients
    }

    /// Current membrane boundary, once sampled.
    pub fn shape(&self) -> Option<&Shape> {
        self.state.as_ref().map(|s| &s.shape)
    }

    /// Current strike position in shape coordinates, once sampled.
    pub fn strike_point(&self) -> Option<Point> {
        self.state.as_ref().map(|s| s.strike)
    }

    /// Current listening position in shape coordinates, once sampled.
    pub fn listening_point(&self) -> Option<Point> {
        self.state.as_ref().map(|s| s.listen)
    }

    fn cell_active(mask: &Array2<bool>, (x, y): (usize, usize)) -> bool {
        let (rows, cols) = mask.dim();
        x > 0 && y > 0 && x < rows - 1 && y < cols - 1 && mask[[x, y]]
    }

    /// A point inside the shape whose mask cell takes part in the update.
    ///
    /// Rejection-sampled; points landing on boundary cells are discarded
    /// because the Dirichlet condition pins them at zero.
    fn sample_active(
        shape: &Shape,
        mask: &Array2<bool>,
        grid_size: usize,
        rng: &mut R,
    ) -> (Point, (usize, usize)) {
        for _ in 0..10_000 {
            let p = shape.random_point_inside(rng);
            let cell = shape.grid_position(p, grid_size);
            if Self::cell_active(mask, cell) {
                return (p, cell);
            }
        }
        // Degenerate rasterisation: fall back to any interior foreground cell.
        for x in 1..grid_size - 1 {
            for y in 1..grid_size - 1 {
                if mask[[x, y]] {
                    return (shape.grid_point((x, y), grid_size), (x, y));
                }
            }
        }
        let centroid = shape.centroid();
        let cell = shape.grid_position(centroid, grid_size);
        (centroid, cell)
    }
}

/// True when the interior foreground cells form exactly one 8-connected
/// region, so a wave started anywhere on the membrane reaches every
/// listening point.
fn mask_is_connected(mask: &Array2<bool>) -> bool {
    let (rows, cols) = mask.dim();
    let mut total = 0usize;
    let mut seed = None;
    for x in 1..rows - 1 {
        for y in 1..cols - 1 {
            if mask[[x, y]] {
                total += 1;
                if seed.is_none() {
                    seed = Some((x, y));
                }
            }
        }
    }
    let Some(seed) = seed else { return false };

    let mut visited = Array2::from_elem((rows, cols), false);
    let mut stack = vec![seed];
    visited[[seed.0, seed.1]] = true;
    let mut reached = 0usize;
    while let Some((x, y)) = stack.pop() {
        reached += 1;
        for nx in x.saturating_sub(1)..=(x + 1).min(rows - 2) {
            for ny in y.saturating_sub(1)..=(y + 1).min(cols - 2) {
                if nx >= 1 && ny >= 1 && mask[[nx, ny]] && !visited[[nx, ny]] {
                    visited[[nx, ny]] = true;
                    stack.push((nx, ny));
                }
            }
        }
    }
    reached == total
}

impl<R: Rng> AudioSampler for FdtdModel<R> {
    fn core(&self) -> &SamplerCore {
        &self.core
    }

    fn update_properties(&mut self, index: Option<usize>) {
        if index.is_none_or(|i| i % 5 == 0) {
            // Concave boundaries can rasterise into several islands; the
            // stencil only makes sense over a single region, so keep drawing
            // until the mask is connected.
            let mut drawn = None;
            for _ in 0..64 {
                let Ok(shape) = self.settings.shape.sample(&mut self.rng) else {
                    return;
                };
                let mask = shape.draw(self.grid_size);
                if mask_is_connected(&mask) {
                    drawn = Some((shape, mask));
                    break;
                }
            }
            let Some((shape, mask)) = drawn else { return };
            debug!(
                "resampled membrane boundary on a {0}x{0} grid",
                self.grid_size
            );
            // A fresh drum is struck and read at its centroid, unless that
            // cell falls outside the active region (possible for concave
            // boundaries).
            let centroid = shape.centroid();
            let cell = shape.grid_position(centroid, self.grid_size);
            let (strike, strike_cell) = if Self::cell_active(&mask, cell) {
                (centroid, cell)
            } else {
                Self::sample_active(&shape, &mask, self.grid_size, &mut self.rng)
            };
            self.state = Some(DrumState {
                shape,
                mask,
                strike,
                strike_cell,
                listen: strike,
                listen_cell: strike_cell,
            });
        } else if let Some(state) = &mut self.state {
            let (strike, strike_cell) =
                Self::sample_active(&state.shape, &state.mask, self.grid_size, &mut self.rng);
            let (listen, listen_cell) =
                Self::sample_active(&state.shape, &state.mask, self.grid_size, &mut self.rng);
            state.strike = strike;
            state.strike_cell = strike_cell;
            state.listen = listen;
            state.listen_cell = listen_cell;
        }
    }

    fn generate_waveform(&mut self) {
        let Some(state) = &self.state else { return };
        let size = self.grid_size;
        let mut u = raised_cosine_2d((size, size), state.strike_cell, self.sigma_cells);
        // The excitation respects the Dirichlet condition: zero everywhere
        // outside the active interior.
        for x in 0..size {
            for y in 0..size {
                if !Self::cell_active(&state.mask, (x, y)) {
                    u[[x, y]] = 0.0;
                }
            }
        }
        let u_prev = u.clone();
        let waveform = fdtd_waveform(
            u_prev,
            u,
            &state.mask,
            self.coefficients,
            self.core.length,
            state.listen_cell,
        );
        trace!(
            "stepped {} ticks, striking {:?} and reading {:?}",
            self.core.length, state.strike_cell, state.listen_cell
        );
        let peak = waveform.iter().fold(0.0f64, |m, s| m.max(s.abs()));
        self.core.waveform = if peak > f64::EPSILON {
            let scale = self.settings.amplitude / peak;
            waveform.iter().map(|s| s * scale).collect()
        } else {
            waveform
        };
    }

    fn labels(&self) -> Labels {
        let mut labels = Labels::new();
        if let Some(state) = &self.state {
            labels = state.shape.labels();
            labels.insert(
                "strike_location".into(),
                vec![state.strike.x, state.strike.y],
            );
        }
        labels
    }
}
