/// Largest accepted grid side length. Keeps `n * n` buffers well inside addressable memory.
pub const MAX_GRID_SIZE: usize = 4096;

/// Side length of the convolution kernel unless a config overrides it.
pub const DEFAULT_KERNEL_SIZE: usize = 31;

/// The initial field is smoothed with standard deviation `grid_size / 10`.
pub const DEFAULT_INITIAL_SMOOTHING_DIVISOR: usize = 10;

/// Per-frame noise is smoothed with standard deviation `grid_size / 20`.
pub const DEFAULT_NOISE_SMOOTHING_DIVISOR: usize = 20;

/// Gaussian smoothing windows extend this many standard deviations from the centre.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Prime multiplier used to derive per-generator RNG streams from a base seed.
pub const RNG_DERIVATION_PRIME: u64 = 7919;
