use crate::constants::{
    DEFAULT_INITIAL_SMOOTHING_DIVISOR, DEFAULT_KERNEL_SIZE, DEFAULT_NOISE_SMOOTHING_DIVISOR,
};
use crate::tuning::{TuningParams, TuningPolicy};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutomataConfig {
    /// Deterministic seed for reproducible frame sequences.
    pub seed: u64,
    /// Side length of the square field.
    pub grid_size: usize,
    /// Single tuning knob, nominally in [0,1]. Values outside extrapolate the formulas.
    pub beauty_factor: f64,
    /// Side length of the convolution kernel. Must be odd.
    pub kernel_size: usize,
    /// Formulas used to derive feedback, excitation, noise and sigma.
    pub tuning: TuningPolicy,
    /// Initial smoothing standard deviation is `grid_size / initial_smoothing_divisor`.
    pub initial_smoothing_divisor: usize,
    /// Noise smoothing standard deviation is `grid_size / noise_smoothing_divisor`.
    pub noise_smoothing_divisor: usize,
}

impl Default for AutomataConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grid_size: 256,
            beauty_factor: 0.5,
            kernel_size: DEFAULT_KERNEL_SIZE,
            tuning: TuningPolicy::Reward,
            initial_smoothing_divisor: DEFAULT_INITIAL_SMOOTHING_DIVISOR,
            noise_smoothing_divisor: DEFAULT_NOISE_SMOOTHING_DIVISOR,
        }
    }
}

macro_rules! define_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AutomataConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for AutomataConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_config_error! {
    InvalidDimension => "grid_size must be greater than 0";
    GridSizeTooLarge { max: usize, actual: usize } => "grid_size ({actual}) exceeds supported maximum ({max})";
    InvalidKernelSize { actual: usize } => "kernel_size ({actual}) must be odd and at least 3";
    InvalidBeautyFactor => "beauty_factor must be finite";
    InvalidInitialSmoothingDivisor => "initial_smoothing_divisor must be greater than 0";
    InvalidNoiseSmoothingDivisor => "noise_smoothing_divisor must be greater than 0";
    InvalidTuningCoefficients => "custom tuning coefficients must be finite with non-negative gains";
    InvalidTuningRange => "custom tuning must keep feedback_factor within (0,1), sigma positive, and noise_factor non-negative for beauty_factor in [0,1]";
}

impl std::error::Error for AutomataConfigError {}

impl AutomataConfig {
    pub const MAX_GRID_SIZE: usize = crate::constants::MAX_GRID_SIZE;

    /// Config for a given grid size and beauty factor, everything else default.
    pub fn with_grid(grid_size: usize, beauty_factor: f64) -> Self {
        Self {
            grid_size,
            beauty_factor,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AutomataConfigError> {
        self.validate_grid()?;
        self.validate_kernel()?;
        self.validate_smoothing()?;
        self.validate_tuning()?;
        Ok(())
    }

    /// Tuning parameters this config resolves to.
    pub fn tuning_params(&self) -> TuningParams {
        self.tuning.derive(self.beauty_factor)
    }

    /// Standard deviation used to smooth the initial field.
    pub fn initial_smoothing_sigma(&self) -> usize {
        self.grid_size / self.initial_smoothing_divisor.max(1)
    }

    /// Standard deviation used to smooth the per-frame noise.
    pub fn noise_smoothing_sigma(&self) -> usize {
        self.grid_size / self.noise_smoothing_divisor.max(1)
    }

    fn validate_grid(&self) -> Result<(), AutomataConfigError> {
        if self.grid_size == 0 {
            return Err(AutomataConfigError::InvalidDimension);
        }
        if self.grid_size > Self::MAX_GRID_SIZE {
            return Err(AutomataConfigError::GridSizeTooLarge {
                max: Self::MAX_GRID_SIZE,
                actual: self.grid_size,
            });
        }
        Ok(())
    }

    fn validate_kernel(&self) -> Result<(), AutomataConfigError> {
        if self.kernel_size < 3 || self.kernel_size % 2 == 0 {
            return Err(AutomataConfigError::InvalidKernelSize {
                actual: self.kernel_size,
            });
        }
        Ok(())
    }

    fn validate_smoothing(&self) -> Result<(), AutomataConfigError> {
        if self.initial_smoothing_divisor == 0 {
            return Err(AutomataConfigError::InvalidInitialSmoothingDivisor);
        }
        if self.noise_smoothing_divisor == 0 {
            return Err(AutomataConfigError::InvalidNoiseSmoothingDivisor);
        }
        Ok(())
    }

    fn validate_tuning(&self) -> Result<(), AutomataConfigError> {
        if !self.beauty_factor.is_finite() {
            return Err(AutomataConfigError::InvalidBeautyFactor);
        }
        // Built-in policies are fixed and known-good; only custom coefficients need checks.
        if let TuningPolicy::Custom(coefficients) = &self.tuning {
            if !(coefficients.is_finite() && coefficients.is_monotonic()) {
                return Err(AutomataConfigError::InvalidTuningCoefficients);
            }
            if !coefficients.is_well_formed_on_unit_interval() {
                return Err(AutomataConfigError::InvalidTuningRange);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::TuningCoefficients;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(AutomataConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_grid_is_invalid_dimension() {
        let cfg = AutomataConfig::with_grid(0, 0.5);
        assert_eq!(cfg.validate(), Err(AutomataConfigError::InvalidDimension));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let cfg = AutomataConfig::with_grid(AutomataConfig::MAX_GRID_SIZE + 1, 0.5);
        assert!(matches!(
            cfg.validate(),
            Err(AutomataConfigError::GridSizeTooLarge { .. })
        ));
    }

    #[test]
    fn even_or_tiny_kernel_is_rejected() {
        for kernel_size in [0, 1, 2, 30] {
            let cfg = AutomataConfig {
                kernel_size,
                ..AutomataConfig::default()
            };
            assert_eq!(
                cfg.validate(),
                Err(AutomataConfigError::InvalidKernelSize {
                    actual: kernel_size
                })
            );
        }
    }

    #[test]
    fn non_finite_beauty_is_rejected_but_out_of_range_is_accepted() {
        let nan = AutomataConfig::with_grid(16, f64::NAN);
        assert_eq!(nan.validate(), Err(AutomataConfigError::InvalidBeautyFactor));

        let extrapolated = AutomataConfig::with_grid(16, 1.4);
        assert_eq!(extrapolated.validate(), Ok(()));
        let negative = AutomataConfig::with_grid(16, -0.3);
        assert_eq!(negative.validate(), Ok(()));
    }

    #[test]
    fn zero_smoothing_divisors_are_rejected() {
        let initial = AutomataConfig {
            initial_smoothing_divisor: 0,
            ..AutomataConfig::default()
        };
        assert_eq!(
            initial.validate(),
            Err(AutomataConfigError::InvalidInitialSmoothingDivisor)
        );
        let noise = AutomataConfig {
            noise_smoothing_divisor: 0,
            ..AutomataConfig::default()
        };
        assert_eq!(
            noise.validate(),
            Err(AutomataConfigError::InvalidNoiseSmoothingDivisor)
        );
    }

    #[test]
    fn custom_tuning_is_checked() {
        let decreasing_feedback = AutomataConfig {
            tuning: TuningPolicy::Custom(TuningCoefficients {
                feedback_gain: -0.1,
                ..TuningCoefficients::REWARD
            }),
            ..AutomataConfig::default()
        };
        assert_eq!(
            decreasing_feedback.validate(),
            Err(AutomataConfigError::InvalidTuningCoefficients)
        );

        let saturated_feedback = AutomataConfig {
            tuning: TuningPolicy::Custom(TuningCoefficients {
                feedback_base: 0.95,
                feedback_gain: 0.1,
                ..TuningCoefficients::REWARD
            }),
            ..AutomataConfig::default()
        };
        assert_eq!(
            saturated_feedback.validate(),
            Err(AutomataConfigError::InvalidTuningRange)
        );

        let flat_kernel = AutomataConfig {
            tuning: TuningPolicy::Custom(TuningCoefficients {
                sigma_base: 0.0,
                ..TuningCoefficients::REWARD
            }),
            ..AutomataConfig::default()
        };
        assert_eq!(
            flat_kernel.validate(),
            Err(AutomataConfigError::InvalidTuningRange)
        );
    }

    #[test]
    fn smoothing_sigmas_truncate() {
        let cfg = AutomataConfig::with_grid(8, 1.0);
        assert_eq!(cfg.initial_smoothing_sigma(), 0);
        assert_eq!(cfg.noise_smoothing_sigma(), 0);
        let cfg = AutomataConfig::with_grid(256, 1.0);
        assert_eq!(cfg.initial_smoothing_sigma(), 25);
        assert_eq!(cfg.noise_smoothing_sigma(), 12);
    }

    #[test]
    fn legacy_config_json_deserializes_with_defaults() {
        let legacy_json = r#"{
            "seed": 7,
            "grid_size": 64,
            "beauty_factor": 0.25
        }"#;
        let cfg: AutomataConfig =
            serde_json::from_str(legacy_json).expect("legacy config should parse");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.grid_size, 64);
        assert_eq!(cfg.kernel_size, 31);
        assert_eq!(cfg.tuning, TuningPolicy::Reward);
        assert_eq!(cfg.initial_smoothing_divisor, 10);
        assert_eq!(cfg.noise_smoothing_divisor, 20);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn error_messages_are_stable() {
        let cases = [
            (
                AutomataConfigError::InvalidDimension,
                "grid_size must be greater than 0",
            ),
            (
                AutomataConfigError::GridSizeTooLarge {
                    max: 4096,
                    actual: 5000,
                },
                "grid_size (5000) exceeds supported maximum (4096)",
            ),
            (
                AutomataConfigError::InvalidKernelSize { actual: 4 },
                "kernel_size (4) must be odd and at least 3",
            ),
            (
                AutomataConfigError::InvalidBeautyFactor,
                "beauty_factor must be finite",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
