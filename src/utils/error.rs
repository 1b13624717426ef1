use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Cannot read config file {path}: {source}")]
    ConfigReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected response: {message}")]
    ResponseError { message: String },
}

impl CheckerError {
    /// 是否為配置相關錯誤（必須中止程序）
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CheckerError::TomlParseError(_)
                | CheckerError::TomlSerializeError(_)
                | CheckerError::ConfigReadError { .. }
                | CheckerError::MissingConfigError { .. }
                | CheckerError::InvalidConfigValueError { .. }
        )
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CheckerError::TomlParseError(e) => format!("Config file is not valid TOML: {}", e),
            CheckerError::ConfigReadError { path, source } => {
                format!("Config file {} could not be read: {}", path, source)
            }
            CheckerError::MissingConfigError { field } => {
                format!("Configuration incomplete: '{}' is not set", field)
            }
            CheckerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            CheckerError::IoError(e) => format!("File access failed: {}", e),
            CheckerError::HttpError(e) if e.is_timeout() => "Request timed out".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CheckerError::TomlParseError(_) | CheckerError::TomlSerializeError(_) => {
                "Fix the syntax of the config file, or delete it to run first-time setup again"
            }
            CheckerError::ConfigReadError { .. } => {
                "Make sure the config path is a readable file, or pass another one with --config-file"
            }
            CheckerError::MissingConfigError { .. } => {
                "Ensure model, hardware_version and current_firmware_version are set under [device]"
            }
            CheckerError::InvalidConfigValueError { .. } => {
                "Edit the config file or use --update-version to correct the value"
            }
            CheckerError::IoError(_) => "Check that the config file path exists and is writable",
            CheckerError::HttpError(_) | CheckerError::ResponseError { .. } => {
                "Check your network connection or try --manual"
            }
            CheckerError::HeaderError(_) => "Run again with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;
