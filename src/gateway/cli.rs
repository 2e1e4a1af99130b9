use std::time::Duration;
use tokio::process::Command;

use super::payload::parse_jobs_payload;
use crate::calendar::types::JobDescriptor;
use crate::config::CliConfig;
use crate::error::AppError;

/// Lists jobs by running the gateway CLI (`clawdbot cron list --format=json`)
#[derive(Debug, Clone)]
pub struct CliSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CliSource {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn fetch_jobs(&self) -> Result<Vec<JobDescriptor>, AppError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .args(&self.args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            AppError::cli_error(format!(
                "'{}' timed out after {:?}",
                self.command_line(),
                self.timeout
            ))
        })?
        .map_err(|e| {
            AppError::cli_error(format!("Failed to execute '{}'", self.command_line()))
                .with_details(e.to_string())
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::cli_error(format!(
                "'{}' exited with code {}",
                self.command_line(),
                output.status.code().unwrap_or(-1)
            ))
            .with_details(stderr.trim()));
        }

        parse_jobs_payload(&String::from_utf8_lossy(&output.stdout))
    }
}
