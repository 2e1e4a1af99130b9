//! Cron table view: filtering, sorting, stats and display labels

pub mod format;
pub mod list;

pub use format::{cron_to_human, format_duration, next_runs, time_since, time_until};
pub use list::{compute_stats, list_crons, CronListPage, CronListQuery, CronRow, CronStats};
