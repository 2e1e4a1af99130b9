//! HTTP client for the agent gateway's cron listing

use reqwest::Client;
use std::time::Duration;

use super::payload::parse_jobs_payload;
use crate::calendar::types::JobDescriptor;
use crate::config::GatewayConfig;
use crate::constants::GATEWAY_CRON_LIST_PATH;
use crate::error::AppError;

/// Connection timeout (shorter than the request timeout)
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    token: String,
    client: Client,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        })
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base_url, GATEWAY_CRON_LIST_PATH)
    }

    /// POST an empty JSON object to the cron list endpoint
    pub async fn fetch_jobs(&self) -> Result<Vec<JobDescriptor>, AppError> {
        let url = self.list_url();

        let mut request = self.client.post(&url).json(&serde_json::json!({}));
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::gateway_error(format!("Gateway returned {}", status))
                .with_details(body));
        }

        let text = response.text().await?;
        parse_jobs_payload(&text)
    }
}
