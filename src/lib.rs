// Module declarations
pub mod api;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod crons;
pub mod error;
pub mod gateway;

pub use calendar::CronProjectionEngine;
pub use config::DashboardConfig;
pub use error::{AppError, ErrorCode};
