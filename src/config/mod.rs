//! Dashboard configuration and loader
//!
//! Read from an optional YAML file, then overridden by environment variables.
//! Falls back to defaults if the file doesn't exist.
//!
//! File location:
//! - MISSION_CONTROL_CONFIG, if set
//! - otherwise <config dir>/mission-control/config.yaml
//!
//! Environment Variable Overrides:
//! - CLAWDBOT_GATEWAY_URL: gateway.url
//! - CLAWDBOT_TOKEN: gateway.token
//! - MISSION_CONTROL_SOURCE: source (gateway | cli)
//! - MISSION_CONTROL_API_HOST: api.host
//! - MISSION_CONTROL_API_PORT: api.port

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::JobPalette;
use crate::constants::{
    DEFAULT_CLI_ARGS, DEFAULT_CLI_PROGRAM, DEFAULT_GATEWAY_URL, MAX_CONFIG_BYTES,
};
use crate::error::AppError;

/// Where the job list comes from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Gateway,
    Cli,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gateway" => Ok(SourceKind::Gateway),
            "cli" => Ok(SourceKind::Cli),
            other => Err(format!("Unknown job source '{}'. Valid options: gateway, cli", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    pub url: String,
    pub token: String,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GATEWAY_URL.to_string(),
            token: String::new(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_CLI_PROGRAM.to_string(),
            args: DEFAULT_CLI_ARGS.iter().map(|a| a.to_string()).collect(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3040,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceKind,
    pub gateway: GatewayConfig,
    pub cli: CliConfig,
    pub api: ApiConfig,
    pub palette: JobPalette,
}

impl DashboardConfig {
    /// Load from the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self, AppError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "Loading dashboard config");
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Config file path: MISSION_CONTROL_CONFIG or the platform config dir
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var("MISSION_CONTROL_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("mission-control").join("config.yaml"))
    }

    /// Parse a YAML config file (1MB max)
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let metadata = fs::metadata(path)
            .map_err(|_| AppError::file_not_found(path.display().to_string()))?;

        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(AppError::config_error(format!(
                "Config too large: {} bytes (max 1MB)",
                metadata.len()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment, in production)
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CLAWDBOT_GATEWAY_URL") {
            self.gateway.url = url;
        }
        if let Some(token) = lookup("CLAWDBOT_TOKEN") {
            self.gateway.token = token;
        }
        if let Some(source) = lookup("MISSION_CONTROL_SOURCE") {
            match source.parse() {
                Ok(kind) => self.source = kind,
                Err(e) => tracing::warn!("Ignoring MISSION_CONTROL_SOURCE: {}", e),
            }
        }
        if let Some(host) = lookup("MISSION_CONTROL_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("MISSION_CONTROL_API_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.api.port = port,
                Err(_) => {
                    tracing::warn!(value = %port, "Ignoring invalid MISSION_CONTROL_API_PORT")
                }
            }
        }
    }

    /// Validate configuration constraints
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.port == 0 {
            return Err(AppError::config_error("api.port must not be 0"));
        }
        if self.gateway.url.trim().is_empty() {
            return Err(AppError::config_error("gateway.url must not be empty"));
        }
        if self.cli.program.trim().is_empty() {
            return Err(AppError::config_error("cli.program must not be empty"));
        }
        self.palette.validate().map_err(AppError::config_error)?;
        Ok(())
    }
}
