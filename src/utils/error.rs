use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("File already exists: {path}")]
    FileExistsError { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SimError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SimError::InvalidConfigValueError { .. }
            | SimError::MissingConfigError { .. }
            | SimError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SimError::IoError(_) | SimError::FileExistsError { .. } => ErrorCategory::Storage,
            SimError::CsvError(_)
            | SimError::SerializationError(_)
            | SimError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 檔名衝突由呼叫端換號重試，單獨出現時僅屬可重試錯誤
            SimError::FileExistsError { .. } => ErrorSeverity::Medium,
            SimError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SimError::ConfigValidationError { .. }
            | SimError::MissingConfigError { .. } => {
                "Check the configuration file or command-line arguments".to_string()
            }
            SimError::InvalidConfigValueError { field, reason, .. } => {
                format!("Adjust '{}' ({})", field, reason)
            }
            SimError::FileExistsError { .. } => {
                "Re-run the generator; a fresh file index will be chosen".to_string()
            }
            SimError::IoError(_) => {
                "Make sure the output directory is writable and the disk is not full".to_string()
            }
            SimError::CsvError(_) | SimError::SerializationError(_) => {
                "Report this as a bug together with the generation parameters".to_string()
            }
            SimError::ProcessingError { .. } => {
                "Widen the depth range or reduce the depth step".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Storage => format!("Could not write drilling data: {}", self),
            ErrorCategory::Processing => format!("Data generation failed: {}", self),
        }
    }

    /// 依嚴重程度對應行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
