use crate::field::Field;
use crate::tuning::TuningParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FrameStats {
    /// 1-based index of the frame these values describe.
    pub frame: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl FrameStats {
    pub fn from_field(frame: usize, field: &Field) -> Self {
        let data = field.data();
        if data.is_empty() {
            return Self {
                frame,
                ..Self::default()
            };
        }
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            frame,
            min: field.min(),
            max: field.max(),
            mean,
            std: variance.sqrt(),
        }
    }
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub grid_size: usize,
    pub frames: usize,
    pub sample_every: usize,
    pub tuning: TuningParams,
    pub samples: Vec<FrameStats>,
}

impl RunSummary {
    pub fn new(
        grid_size: usize,
        tuning: TuningParams,
        frames: usize,
        sample_every: usize,
        samples: Vec<FrameStats>,
    ) -> Self {
        Self {
            schema_version: default_schema_version(),
            grid_size,
            frames,
            sample_every,
            tuning,
            samples,
        }
    }

    /// Widest excursion seen across all sampled frames.
    pub fn peak_amplitude(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.min.abs().max(s.max.abs()))
            .fold(0.0, f64::max)
    }
}
