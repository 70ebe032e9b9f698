pub mod config;
pub mod constants;
pub mod field;
pub mod generator;
pub mod kernel;
pub mod metrics;
pub mod reward;
pub mod rng;
pub mod smoothing;
pub mod tuning;

pub use config::{AutomataConfig, AutomataConfigError};
pub use constants::MAX_GRID_SIZE;
pub use field::Field;
pub use generator::{FieldGenerator, GeneratorInitError};
pub use metrics::{FrameStats, RunSummary};
pub use reward::{RewardPlan, RewardPlanError, MAX_LEVEL};
pub use tuning::{TuningCoefficients, TuningParams, TuningPolicy};
