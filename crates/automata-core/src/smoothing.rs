//! Separable Gaussian smoothing for square fields.
//!
//! Edges use reflect boundaries (`d c b a | a b c d | d c b a`). The window spans
//! `round(4 * sigma)` cells on each side and the weights sum to one, so every output
//! cell is a convex combination of inputs and can never exceed the input extremes.

use crate::constants::GAUSSIAN_TRUNCATE;

/// Reusable Gaussian blur with precomputed weights and scratch storage.
#[derive(Clone, Debug)]
pub struct GaussianSmoother {
    weights: Vec<f64>,
    radius: usize,
    scratch: Vec<f64>,
}

impl GaussianSmoother {
    /// `sigma <= 0` yields an identity smoother.
    pub fn new(sigma: f64) -> Self {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Self {
                weights: vec![1.0],
                radius: 0,
                scratch: Vec::new(),
            };
        }
        let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
        let inv_two_var = 0.5 / (sigma * sigma);
        let mut weights: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let x = i as f64 - radius as f64;
                (-x * x * inv_two_var).exp()
            })
            .collect();
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        Self {
            weights,
            radius,
            scratch: Vec::new(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.radius == 0
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Smooth a `size x size` row-major field in place.
    pub fn apply(&mut self, data: &mut [f64], size: usize) {
        debug_assert_eq!(data.len(), size * size);
        if self.is_identity() || size == 0 {
            return;
        }
        self.scratch.resize(data.len(), 0.0);

        // Columns first, then rows.
        for y in 0..size {
            for x in 0..size {
                let mut acc = 0.0;
                for (k, w) in self.weights.iter().enumerate() {
                    let sy = reflect(y as isize + k as isize - self.radius as isize, size);
                    acc += w * data[sy * size + x];
                }
                self.scratch[y * size + x] = acc;
            }
        }
        for y in 0..size {
            let row = &self.scratch[y * size..(y + 1) * size];
            for x in 0..size {
                let mut acc = 0.0;
                for (k, w) in self.weights.iter().enumerate() {
                    let sx = reflect(x as isize + k as isize - self.radius as isize, size);
                    acc += w * row[sx];
                }
                data[y * size + x] = acc;
            }
        }
    }
}

/// One-shot smoothing of a square field.
pub fn gaussian_filter(data: &mut [f64], size: usize, sigma: f64) {
    GaussianSmoother::new(sigma).apply(data, size);
}

/// Map any index onto `0..len` by mirroring about the edges, edge sample included.
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}
