use serde::Serialize;
use std::fmt;

/// Structured error type for the I/O layers (gateway, CLI, config, API)
///
/// The projection engine never produces one of these: malformed cron input
/// degrades to empty results instead.
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error codes for categorizing different error types
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Gateway errors
    GatewayUnavailable,
    GatewayTimeout,
    GatewayError,

    // CLI errors
    CliError,

    // Payload / config errors
    ParseError,
    ConfigError,
    FileNotFound,

    // Validation errors
    InvalidParams,

    // Generic
    Unknown,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{:?}: {} - {}", self.code, self.message, details)
        } else {
            write!(f, "{:?}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for AppError {}

// Convenience constructors
impl AppError {
    pub fn gateway_unavailable(url: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::GatewayUnavailable,
            message: "Gateway is not reachable".to_string(),
            details: Some(url.into()),
        }
    }

    pub fn gateway_timeout(url: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::GatewayTimeout,
            message: "Gateway did not respond in time".to_string(),
            details: Some(url.into()),
        }
    }

    pub fn gateway_error(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::GatewayError,
            message: msg.into(),
            details: None,
        }
    }

    pub fn cli_error(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::CliError,
            message: msg.into(),
            details: None,
        }
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ParseError,
            message: msg.into(),
            details: None,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ConfigError,
            message: "Invalid configuration".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::FileNotFound,
            message: "File not found".to_string(),
            details: Some(path.into()),
        }
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidParams,
            message: "Invalid parameters".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unknown,
            message: msg.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// Conversions from common error types
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => Self::file_not_found(err.to_string()),
            ErrorKind::TimedOut => {
                Self::cli_error("Command timed out").with_details(err.to_string())
            }
            _ => Self::unknown(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(format!("JSON parse error: {}", err))
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_error(format!("YAML parse error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_default();
        if err.is_timeout() {
            Self::gateway_timeout(url)
        } else if err.is_connect() {
            Self::gateway_unavailable(url)
        } else if err.is_decode() {
            Self::parse_error(format!("Failed to decode gateway response: {}", err))
        } else {
            Self::gateway_error(err.to_string())
        }
    }
}
