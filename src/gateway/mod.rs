//! Job sources for the external agent gateway
//!
//! The gateway owns scheduling and execution. This module only reads its
//! cron job list, over HTTP or through its CLI, and never writes back.

pub mod cli;
pub mod client;
pub mod payload;

pub use cli::CliSource;
pub use client::GatewayClient;
pub use payload::parse_jobs_payload;

use crate::calendar::types::JobDescriptor;
use crate::config::{DashboardConfig, SourceKind};
use crate::error::AppError;

/// The configured job source
#[derive(Debug, Clone)]
pub enum JobSource {
    Gateway(GatewayClient),
    Cli(CliSource),
}

impl JobSource {
    pub fn from_config(config: &DashboardConfig) -> Result<Self, AppError> {
        match config.source {
            SourceKind::Gateway => Ok(JobSource::Gateway(GatewayClient::new(&config.gateway)?)),
            SourceKind::Cli => Ok(JobSource::Cli(CliSource::new(&config.cli))),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            JobSource::Gateway(client) => format!("gateway {}", client.list_url()),
            JobSource::Cli(cli) => format!("cli '{}'", cli.command_line()),
        }
    }

    pub async fn fetch_jobs(&self) -> Result<Vec<JobDescriptor>, AppError> {
        let result = match self {
            JobSource::Gateway(client) => client.fetch_jobs().await,
            JobSource::Cli(cli) => cli.fetch_jobs().await,
        };

        match &result {
            Ok(jobs) => {
                tracing::debug!(count = jobs.len(), source = %self.describe(), "Fetched cron jobs")
            }
            Err(e) => {
                tracing::warn!(source = %self.describe(), "Failed to fetch cron jobs: {}", e)
            }
        }
        result
    }
}
