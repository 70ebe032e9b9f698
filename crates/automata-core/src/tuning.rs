//! Mapping from the single beauty knob to the generator's tuning parameters.
//!
//! Every parameter is a linear function of the beauty factor `b`. Feedback grows with
//! `b`; excitation, noise and kernel spread grow with `1 - b`. A policy is just a set of
//! these coefficients, so swapping formulas never touches the update loop.

use serde::{Deserialize, Serialize};

/// Linear coefficients for the four tuning formulas.
///
/// `feedback = feedback_base + feedback_gain * b`, and for the other three
/// `value = base + gain * (1 - b)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TuningCoefficients {
    pub feedback_base: f64,
    pub feedback_gain: f64,
    pub excitation_base: f64,
    pub excitation_gain: f64,
    pub noise_base: f64,
    pub noise_gain: f64,
    pub sigma_base: f64,
    pub sigma_gain: f64,
}

impl TuningCoefficients {
    /// Formulas shipped with the reward screen.
    pub const REWARD: Self = Self {
        feedback_base: 0.8,
        feedback_gain: 0.1,
        excitation_base: 0.1,
        excitation_gain: 0.8,
        noise_base: 0.01,
        noise_gain: 0.05,
        sigma_base: 1.0,
        sigma_gain: 1.0,
    };

    /// Illustrative alternate policy, not used by the game: weaker feedback and a
    /// stronger noise floor, for livelier frames at the same beauty factor.
    pub const PROTOTYPE: Self = Self {
        feedback_base: 0.7,
        feedback_gain: 0.2,
        excitation_base: 0.2,
        excitation_gain: 0.6,
        noise_base: 0.02,
        noise_gain: 0.04,
        sigma_base: 1.0,
        sigma_gain: 1.0,
    };

    pub fn derive(&self, beauty_factor: f64) -> TuningParams {
        let calm = 1.0 - beauty_factor;
        TuningParams {
            beauty_factor,
            feedback_factor: self.feedback_base + self.feedback_gain * beauty_factor,
            excitation: self.excitation_base + self.excitation_gain * calm,
            noise_factor: self.noise_base + self.noise_gain * calm,
            sigma: self.sigma_base + self.sigma_gain * calm,
        }
    }

    pub fn is_finite(&self) -> bool {
        [
            self.feedback_base,
            self.feedback_gain,
            self.excitation_base,
            self.excitation_gain,
            self.noise_base,
            self.noise_gain,
            self.sigma_base,
            self.sigma_gain,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Gains point the right way: feedback rises with beauty, everything else falls.
    pub fn is_monotonic(&self) -> bool {
        self.feedback_gain >= 0.0
            && self.excitation_gain >= 0.0
            && self.noise_gain >= 0.0
            && self.sigma_gain >= 0.0
    }

    /// Derived parameters stay usable over the whole `[0, 1]` beauty range.
    ///
    /// The formulas are linear, so checking both endpoints covers the interval.
    pub fn is_well_formed_on_unit_interval(&self) -> bool {
        [0.0, 1.0]
            .iter()
            .map(|&b| self.derive(b))
            .all(|p| {
                p.is_usable()
                    && p.feedback_factor > 0.0
                    && p.feedback_factor < 1.0
                    && p.sigma > 0.0
                    && p.noise_factor >= 0.0
            })
    }
}

/// Named, swappable tuning formulas.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TuningPolicy {
    #[default]
    Reward,
    /// Illustrative alternate formulas, see [`TuningCoefficients::PROTOTYPE`].
    Prototype,
    Custom(TuningCoefficients),
}

impl TuningPolicy {
    pub fn coefficients(&self) -> TuningCoefficients {
        match self {
            TuningPolicy::Reward => TuningCoefficients::REWARD,
            TuningPolicy::Prototype => TuningCoefficients::PROTOTYPE,
            TuningPolicy::Custom(coefficients) => *coefficients,
        }
    }

    pub fn derive(&self, beauty_factor: f64) -> TuningParams {
        self.coefficients().derive(beauty_factor)
    }
}

/// Parameters derived once at construction; immutable for the generator's lifetime.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TuningParams {
    pub beauty_factor: f64,
    /// Weight of the previous state when blending with the convolved state.
    pub feedback_factor: f64,
    /// How much new structure a step may inject. Not read by the current update rule.
    pub excitation: f64,
    /// Amplitude of the per-frame perturbation.
    pub noise_factor: f64,
    /// Standard deviation of the kernel Gaussian.
    pub sigma: f64,
}

impl TuningParams {
    /// Whether a generator can be built from these values.
    ///
    /// Extrapolated beauty factors may push feedback or sigma negative; both still give a
    /// well-defined update since the kernel only sees `sigma²`. Only `sigma == 0` has no
    /// kernel.
    pub fn is_usable(&self) -> bool {
        self.feedback_factor.is_finite()
            && self.excitation.is_finite()
            && self.noise_factor.is_finite()
            && self.sigma.is_finite()
            && self.sigma != 0.0
    }
}
