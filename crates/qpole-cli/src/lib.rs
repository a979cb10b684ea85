//! Training driver and command-line surface for qpole

pub mod cli;
pub mod config;
pub mod report;
pub mod trainer;

pub use config::TrainerConfig;
pub use report::{to_json_lines, write_report};
pub use trainer::{train, Trainer, TrainingLimits, TrainingOutcome, TrainingReport};
