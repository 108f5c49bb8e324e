use crate::config::{validate_count, validate_generation, SummaryFormat};
use crate::core::ConfigProvider;
use crate::domain::model::{DepthRange, Parameter, WalkSteps};
use crate::utils::error::{Result, SimError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub profile: Option<ProfileConfig>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub depth: DepthConfig,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthConfig {
    pub start_m: u32,
    pub end_m: u32,
    pub step_m: u32,
}

impl Default for DepthConfig {
    fn default() -> Self {
        let range = DepthRange::default();
        Self {
            start_m: range.start_m,
            end_m: range.end_m,
            step_m: range.step_m,
        }
    }
}

/// 未填寫的參數沿用預設步幅
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkConfig {
    pub max_step_rop: Option<f64>,
    pub max_step_rpm: Option<f64>,
    pub max_step_flow_rate: Option<f64>,
    pub max_step_wob: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
    pub file_prefix: String,
    pub count: Option<usize>,
    pub preview_rows: Option<usize>,
    pub summary: Option<SummaryFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            file_prefix: "test_data".to_string(),
            count: None,
            preview_rows: None,
            summary: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap())
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SimError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SimError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SIM_SEED})，未定義者保留原字串
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn profile_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("<unnamed>")
    }

    pub fn count(&self) -> usize {
        self.output.count.unwrap_or(1)
    }

    pub fn preview_rows(&self) -> usize {
        self.output.preview_rows.unwrap_or(5)
    }

    pub fn summary_format(&self) -> SummaryFormat {
        self.output.summary.unwrap_or_default()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        let profile = validation::validate_required_field("profile", &self.profile)?;
        validation::validate_non_empty_string("profile.name", &profile.name)?;
        validate_generation(self).map_err(|e| match e {
            SimError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => SimError::InvalidConfigValueError {
                field: toml_field(&field),
                value,
                reason,
            },
            other => other,
        })?;
        validate_count("output.count", self.count())
    }
}

/// 將共用驗證的欄位名稱對應到 TOML 的區段路徑
fn toml_field(field: &str) -> String {
    match field {
        "start_depth" => "depth.start_m".to_string(),
        "end_depth" => "depth.end_m".to_string(),
        "step" => "depth.step_m".to_string(),
        "output_dir" => "output.dir".to_string(),
        "file_prefix" => "output.file_prefix".to_string(),
        other => format!("walk.{}", other),
    }
}

impl ConfigProvider for TomlConfig {
    fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.depth.start_m, self.depth.end_m, self.depth.step_m)
    }

    fn walk_steps(&self) -> WalkSteps {
        WalkSteps {
            rop: self
                .walk
                .max_step_rop
                .unwrap_or(Parameter::Rop.default_max_step()),
            rpm: self
                .walk
                .max_step_rpm
                .unwrap_or(Parameter::Rpm.default_max_step()),
            flow_rate: self
                .walk
                .max_step_flow_rate
                .unwrap_or(Parameter::FlowRate.default_max_step()),
            weight_on_bit: self
                .walk
                .max_step_wob
                .unwrap_or(Parameter::WeightOnBit.default_max_step()),
        }
    }

    fn output_dir(&self) -> &str {
        &self.output.dir
    }

    fn file_prefix(&self) -> &str {
        &self.output.file_prefix
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
seed = 1234

[profile]
name = "shallow-well"
description = "Short section for smoke tests"

[depth]
start_m = 0
end_m = 300
step_m = 10

[walk]
max_step_rop = 1.5
max_step_wob = 0.5

[output]
dir = "./sim-output"
file_prefix = "well_a"
count = 2
summary = "json"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.profile_name(), "shallow-well");
        assert_eq!(config.seed(), Some(1234));
        assert_eq!(config.depth_range(), DepthRange::new(0, 300, 10));
        let steps = config.walk_steps();
        assert_eq!(steps.rop, 1.5);
        assert_eq!(steps.rpm, 5.0);
        assert_eq!(steps.weight_on_bit, 0.5);
        assert_eq!(config.file_prefix(), "well_a");
        assert_eq!(config.count(), 2);
        assert_eq!(config.summary_format(), SummaryFormat::Json);
        assert!(config.monitoring_enabled());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_profile_uses_defaults() {
        let config = TomlConfig::from_toml_str("[profile]\nname = \"defaults\"\n").unwrap();

        assert_eq!(config.depth_range(), DepthRange::default());
        assert_eq!(config.walk_steps(), WalkSteps::default());
        assert_eq!(config.output_dir(), "data");
        assert_eq!(config.count(), 1);
        assert_eq!(config.preview_rows(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DRILL_SIM_TEST_OUTPUT_DIR", "/tmp/drill-sim-test");

        let toml_content = r#"
[profile]
name = "env"

[output]
dir = "${DRILL_SIM_TEST_OUTPUT_DIR}"
file_prefix = "${DRILL_SIM_TEST_UNDEFINED_PREFIX}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_dir(), "/tmp/drill-sim-test");
        assert_eq!(config.file_prefix(), "${DRILL_SIM_TEST_UNDEFINED_PREFIX}");

        std::env::remove_var("DRILL_SIM_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_config_validation_reports_toml_field() {
        let toml_content = r#"
[profile]
name = "bad"

[depth]
start_m = 500
end_m = 1000
step_m = 500

[walk]
max_step_rpm = 40.0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(SimError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "depth.step_m")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_profile_section() {
        let config = TomlConfig::from_toml_str("[depth]\nstart_m = 0\nend_m = 50\nstep_m = 5\n").unwrap();
        assert_eq!(config.profile_name(), "<unnamed>");
        match config.validate() {
            Err(SimError::MissingConfigError { field }) => assert_eq!(field, "profile"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_oversized_count_rejected() {
        let config =
            TomlConfig::from_toml_str("[profile]\nname = \"big\"\n\n[output]\ndir = \"data\"\nfile_prefix = \"x\"\ncount = 5000\n")
                .unwrap();
        match config.validate() {
            Err(SimError::InvalidConfigValueError { field, .. }) => assert_eq!(field, "output.count"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[profile\nname = 1").unwrap_err();
        assert!(matches!(err, SimError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[profile]\nname = \"file-test\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.profile_name(), "file-test");
    }
}
