//! Inputs for the reward animation shown after a level is finished.
//!
//! A level always replays the same animation: its number is the seed, and harder levels
//! get a higher beauty factor and a longer animation.

use crate::config::AutomataConfig;
use crate::generator::{FieldGenerator, GeneratorInitError};
use crate::rng::level_seed;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

pub const MAX_LEVEL: u32 = 100;
pub const REWARD_GRID_SIZE: usize = 256;
pub const REWARD_BASE_FRAMES: usize = 100;
pub const REWARD_FRAMES_PER_LEVEL: usize = 2;
/// Frame cap handed to the display loop. Effectively "as fast as the renderer allows".
pub const REWARD_FRAME_RATE: u32 = 1 << 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardPlanError {
    LevelOutOfRange { max: u32, actual: u32 },
}

impl fmt::Display for RewardPlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardPlanError::LevelOutOfRange { max, actual } => {
                write!(f, "level ({actual}) exceeds maximum level ({max})")
            }
        }
    }
}

impl Error for RewardPlanError {}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RewardPlan {
    pub level: u32,
    pub seed: u64,
    pub beauty_factor: f64,
    pub grid_size: usize,
    pub frame_count: usize,
    pub frame_rate: u32,
}

impl RewardPlan {
    pub fn for_level(level: u32) -> Result<Self, RewardPlanError> {
        if level > MAX_LEVEL {
            return Err(RewardPlanError::LevelOutOfRange {
                max: MAX_LEVEL,
                actual: level,
            });
        }
        Ok(Self {
            level,
            seed: level_seed(level),
            beauty_factor: f64::from(level) / f64::from(MAX_LEVEL),
            grid_size: REWARD_GRID_SIZE,
            frame_count: REWARD_BASE_FRAMES + REWARD_FRAMES_PER_LEVEL * level as usize,
            frame_rate: REWARD_FRAME_RATE,
        })
    }

    pub fn config(&self) -> AutomataConfig {
        AutomataConfig {
            seed: self.seed,
            ..AutomataConfig::with_grid(self.grid_size, self.beauty_factor)
        }
    }

    pub fn generator(&self) -> Result<FieldGenerator<ChaCha12Rng>, GeneratorInitError> {
        FieldGenerator::from_config(&self.config())
    }
}
