pub mod cli;
pub mod toml_config;

pub use crate::core::report::SummaryFormat;

use crate::core::ConfigProvider;
use crate::domain::model::{DepthRange, Parameter, WalkSteps};
use crate::utils::error::Result;
use crate::utils::validation;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

/// 單次執行可產生的最大份數
pub const MAX_RUN_COUNT: usize = 1000;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "drill-sim")]
#[command(about = "Generate synthetic drilling logs as CSV files")]
pub struct CliConfig {
    #[arg(long, default_value = "500", help = "Start depth (m)")]
    pub start_depth: u32,

    #[arg(long, default_value = "1000", help = "End depth (m)")]
    pub end_depth: u32,

    #[arg(long, default_value = "5", help = "Depth step (m)")]
    pub step: u32,

    #[arg(long, default_value = "0.5")]
    pub max_step_rop: f64,

    #[arg(long, default_value = "5")]
    pub max_step_rpm: f64,

    #[arg(long, default_value = "10")]
    pub max_step_flow_rate: f64,

    #[arg(long, default_value = "1")]
    pub max_step_wob: f64,

    #[arg(long, default_value = "data")]
    pub output_dir: String,

    #[arg(long, default_value = "test_data")]
    pub file_prefix: String,

    #[arg(long, help = "Seed for reproducible output")]
    pub seed: Option<u64>,

    #[arg(long, default_value = "1", help = "Number of logs to generate")]
    pub count: usize,

    #[arg(long, default_value = "5", help = "Rows to preview (0 disables)")]
    pub preview: usize,

    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryFormat,

    #[arg(long, help = "Write CSV to stdout instead of the output directory")]
    pub stdout: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Log process CPU and memory per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.start_depth, self.end_depth, self.step)
    }

    fn walk_steps(&self) -> WalkSteps {
        WalkSteps {
            rop: self.max_step_rop,
            rpm: self.max_step_rpm,
            flow_rate: self.max_step_flow_rate,
            weight_on_bit: self.max_step_wob,
        }
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_generation(self)?;
        validate_count("count", self.count)
    }
}

pub fn validate_count(field_name: &str, count: usize) -> Result<()> {
    validation::validate_range(field_name, count, 1, MAX_RUN_COUNT)
}

/// Checks shared by every configuration source.
pub fn validate_generation<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let range = config.depth_range();
    validation::validate_range("start_depth", range.start_m, 0, DepthRange::MAX_DEPTH_M)?;
    validation::validate_range(
        "end_depth",
        range.end_m,
        range.start_m,
        DepthRange::MAX_DEPTH_M,
    )?;
    validation::validate_range("step", range.step_m, 1, DepthRange::MAX_STEP_M)?;

    let steps = config.walk_steps();
    for (field, parameter) in [
        ("max_step_rop", Parameter::Rop),
        ("max_step_rpm", Parameter::Rpm),
        ("max_step_flow_rate", Parameter::FlowRate),
        ("max_step_wob", Parameter::WeightOnBit),
    ] {
        let (min, max) = parameter.max_step_limits();
        validation::validate_range(field, steps.get(parameter), min, max)?;
    }

    validation::validate_path("output_dir", config.output_dir())?;
    validation::validate_file_prefix("file_prefix", config.file_prefix())?;
    Ok(())
}
