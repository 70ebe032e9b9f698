use crate::field::Field;

/// Fixed band-pass kernel: a Gaussian with its mean removed, scaled to unit absolute mass.
///
/// Positive near the centre and negative in the surround, so convolving with it sharpens
/// blobs of the kernel's width and suppresses everything flatter.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f64>,
}

impl Kernel {
    /// Build a `size x size` kernel sampled at integer offsets `-(size / 2)..=size / 2`.
    ///
    /// A one-cell kernel has nothing left after mean removal and comes back all zeros.
    /// Only `sigma²` enters the Gaussian, so a negative sigma builds the same kernel as
    /// its absolute value.
    pub fn gaussian_difference(size: usize, sigma: f64) -> Self {
        debug_assert!(size % 2 == 1, "kernel size must be odd");
        debug_assert!(sigma != 0.0, "kernel sigma must be non-zero");
        let half = (size / 2) as f64;
        let inv_two_var = 1.0 / (2.0 * sigma * sigma);

        let mut data = Vec::with_capacity(size * size);
        for y in 0..size {
            let dy = y as f64 - half;
            for x in 0..size {
                let dx = x as f64 - half;
                data.push((-(dx * dx + dy * dy) * inv_two_var).exp());
            }
        }

        let mean = data.iter().sum::<f64>() / data.len().max(1) as f64;
        for v in &mut data {
            *v -= mean;
        }
        let abs_sum: f64 = data.iter().map(|v| v.abs()).sum();
        if abs_sum > 0.0 && abs_sum.is_finite() {
            for v in &mut data {
                *v /= abs_sum;
            }
        } else {
            data.fill(0.0);
        }

        Self { size, data }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.size + x]
    }

    pub fn abs_sum(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).sum()
    }

    /// Same-size 2-D convolution of `input` with this kernel, written into `out`.
    ///
    /// Cells outside the input count as zero. The kernel is flipped (true convolution),
    /// though for this kernel that is indistinguishable from correlation.
    pub fn convolve_same(&self, input: &Field, out: &mut [f64]) {
        let n = input.size();
        let k = self.size;
        let c = k / 2;
        let src = input.data();
        debug_assert_eq!(out.len(), src.len());

        for y in 0..n {
            // Source row is `y + c - ky`; keep it inside `0..n`.
            let ky_lo = (y + c).saturating_sub(n - 1);
            let ky_hi = (y + c).min(k - 1);
            for x in 0..n {
                let kx_lo = (x + c).saturating_sub(n - 1);
                let kx_hi = (x + c).min(k - 1);
                let mut acc = 0.0;
                for ky in ky_lo..=ky_hi {
                    let src_row = &src[(y + c - ky) * n..][..n];
                    let kernel_row = &self.data[ky * k..][..k];
                    for kx in kx_lo..=kx_hi {
                        acc += kernel_row[kx] * src_row[x + c - kx];
                    }
                }
                out[y * n + x] = acc;
            }
        }
    }
}
