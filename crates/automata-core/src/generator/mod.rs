use crate::config::{AutomataConfig, AutomataConfigError};
use crate::field::Field;
use crate::kernel::Kernel;
use crate::metrics::{FrameStats, RunSummary};
use crate::rng::create_rng;
use crate::smoothing::GaussianSmoother;
use crate::tuning::TuningParams;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};
use tracing::{debug, trace};


#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorInitError {
    InvalidConfig(AutomataConfigError),
    /// The beauty factor extrapolates sigma to exactly zero, where no kernel exists.
    DegenerateTuning { beauty_factor: f64, sigma: f64 },
}

impl GeneratorInitError {
    /// `true` when construction failed because the grid size was zero.
    pub fn is_invalid_dimension(&self) -> bool {
        matches!(
            self,
            GeneratorInitError::InvalidConfig(AutomataConfigError::InvalidDimension)
        )
    }
}

impl fmt::Display for GeneratorInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorInitError::InvalidConfig(e) => write!(f, "invalid generator config: {e}"),
            GeneratorInitError::DegenerateTuning {
                beauty_factor,
                sigma,
            } => write!(
                f,
                "beauty_factor {beauty_factor} derives sigma {sigma}, which has no kernel"
            ),
        }
    }
}

impl Error for GeneratorInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GeneratorInitError::InvalidConfig(e) => Some(e),
            GeneratorInitError::DegenerateTuning { .. } => None,
        }
    }
}

impl From<AutomataConfigError> for GeneratorInitError {
    fn from(e: AutomataConfigError) -> Self {
        GeneratorInitError::InvalidConfig(e)
    }
}

/// Evolves a square scalar field one frame at a time.
///
/// Each frame convolves the current field with a band-pass kernel, blends the result with
/// the previous field, squashes it through `tanh` and adds smoothed noise. The random
/// source is owned by the generator, so two generators built from equally seeded sources
/// produce identical frame sequences regardless of what else runs in the process.
pub struct FieldGenerator<R = ChaCha12Rng> {
    params: TuningParams,
    kernel: Kernel,
    grid: Field,
    noise_smoother: GaussianSmoother,
    // Per-frame scratch buffers, swapped with `grid` so frames never reallocate.
    next: Vec<f64>,
    noise: Vec<f64>,
    frame_index: usize,
    rng: R,
}

impl FieldGenerator<ChaCha12Rng> {
    /// Build a generator whose random source is seeded from `config.seed`.
    pub fn from_config(config: &AutomataConfig) -> Result<Self, GeneratorInitError> {
        Self::with_config(config, create_rng(config.seed))
    }
}

impl<R: Rng> FieldGenerator<R> {
    /// Build a generator with default kernel size, smoothing and tuning policy.
    pub fn new(grid_size: usize, beauty_factor: f64, rng: R) -> Result<Self, GeneratorInitError> {
        Self::with_config(&AutomataConfig::with_grid(grid_size, beauty_factor), rng)
    }

    /// Build a generator from a full config, drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored here; the caller owns seeding of `rng`.
    pub fn with_config(config: &AutomataConfig, mut rng: R) -> Result<Self, GeneratorInitError> {
        // Validate before anything is allocated.
        config.validate()?;
        let params = config.tuning_params();
        if !params.is_usable() {
            return Err(GeneratorInitError::DegenerateTuning {
                beauty_factor: params.beauty_factor,
                sigma: params.sigma,
            });
        }

        let size = config.grid_size;
        let kernel = Kernel::gaussian_difference(config.kernel_size, params.sigma);
        let grid = initial_field(size, config.initial_smoothing_sigma() as f64, &mut rng);
        debug!(
            grid_size = size,
            beauty_factor = params.beauty_factor,
            feedback_factor = params.feedback_factor,
            excitation = params.excitation,
            noise_factor = params.noise_factor,
            sigma = params.sigma,
            "field generator initialized"
        );

        Ok(Self {
            params,
            kernel,
            grid,
            noise_smoother: GaussianSmoother::new(config.noise_smoothing_sigma() as f64),
            next: vec![0.0; size * size],
            noise: vec![0.0; size * size],
            frame_index: 0,
            rng,
        })
    }

    /// Advance the field by one frame and return it.
    ///
    /// The returned borrow is only valid until the next call; clone it to keep a snapshot.
    pub fn generate_frame(&mut self) -> &Field {
        self.kernel.convolve_same(&self.grid, &mut self.next);

        let feedback = self.params.feedback_factor;
        for (cell, &previous) in self.next.iter_mut().zip(self.grid.data()) {
            *cell = ((1.0 - feedback) * *cell + feedback * previous).tanh();
        }

        self.fill_noise();
        for (cell, noise) in self.next.iter_mut().zip(&self.noise) {
            *cell += noise;
        }

        self.grid.swap_data(&mut self.next);
        self.frame_index += 1;
        trace!(frame = self.frame_index, "frame generated");
        &self.grid
    }

    /// Generate `frames` frames, sampling statistics every `sample_every` frames.
    ///
    /// The last frame is always sampled. `sample_every == 0` samples every frame.
    pub fn run(&mut self, frames: usize, sample_every: usize) -> RunSummary {
        let sample_every = sample_every.max(1);
        let start_frame = self.frame_index;
        let mut samples = Vec::with_capacity(frames / sample_every + 1);
        for i in 1..=frames {
            let frame = self.generate_frame();
            if i % sample_every == 0 || i == frames {
                samples.push(FrameStats::from_field(start_frame + i, frame));
            }
        }
        RunSummary::new(self.size(), self.params, frames, sample_every, samples)
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn params(&self) -> &TuningParams {
        &self.params
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Current field: the initial field before the first frame, else the latest frame.
    pub fn field(&self) -> &Field {
        &self.grid
    }

    /// Number of frames generated so far.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    fn fill_noise(&mut self) {
        let amplitude = self.params.noise_factor;
        for v in &mut self.noise {
            *v = (self.rng.random::<f64>() - 0.5) * amplitude;
        }
        let size = self.grid.size();
        self.noise_smoother.apply(&mut self.noise, size);
    }
}

/// Smoothed uniform noise rescaled so its minimum is -1 and its maximum is 1.
///
/// A perfectly flat smoothed field has no range to rescale; it becomes all zeros.
fn initial_field<R: Rng>(size: usize, smoothing_sigma: f64, rng: &mut R) -> Field {
    let mut field = Field::zeros(size);
    for v in field.data_mut() {
        *v = rng.random::<f64>();
    }
    GaussianSmoother::new(smoothing_sigma).apply(field.data_mut(), size);

    let (min, max) = (field.min(), field.max());
    let span = max - min;
    if span > 0.0 && span.is_finite() {
        for v in field.data_mut() {
            *v = 2.0 * (*v - min) / span - 1.0;
        }
    } else {
        debug!(grid_size = size, "flat initial field, substituting zeros");
        field.data_mut().fill(0.0);
    }
    field
}
