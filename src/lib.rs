pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, SummaryFormat};
pub use core::{engine::SimulationEngine, pipeline::GenerationPipeline};
pub use domain::model::{DepthRange, DrillingLog, DrillingSample, Parameter, WalkSteps};
pub use utils::error::{Result, SimError};
