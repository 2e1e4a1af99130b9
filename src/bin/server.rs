//! Mission control dashboard server
//!
//! Reads the cron job list from the agent gateway on every request and serves
//! the weekly calendar and cron table as JSON.
//!
//! Usage:
//!   MISSION_CONTROL_API_PORT=3040 ./mission-control-server
//!
//! Environment variables:
//!   - MISSION_CONTROL_CONFIG: Path to config.yaml
//!   - MISSION_CONTROL_SOURCE: `gateway` or `cli`
//!   - CLAWDBOT_GATEWAY_URL / CLAWDBOT_TOKEN: Gateway address and bearer token
//!   - MISSION_CONTROL_API_HOST / MISSION_CONTROL_API_PORT
//!   - RUST_LOG: Log filter (default: mission_control=info)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mission_control_lib::{api, DashboardConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("mission_control=info,mission_control_lib=info")
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting mission control server...");

    if let Err(e) = api::start_server(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
