use std::ops::RangeInclusive;

/// Hours shown on the weekly calendar grid
/// Hours outside this window are computed but never emitted as slots
pub const DISPLAY_HOURS: RangeInclusive<u8> = 7..=23;

/// Number of weekday columns (0 = Monday ... 6 = Sunday)
pub const DAYS_PER_WEEK: u8 = 7;

/// Column labels, Monday first
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Weekday names indexed by standard cron number (0 = Sunday)
pub const CRON_DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Job-name fragments that mark a job as one-off regardless of its schedule
/// Matched case-insensitively
pub const ONE_OFF_NAME_MARKERS: &[&str] = &["recordatorio", "reminder"];

/// Default page size of the cron table
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper bound for a requested page size
pub const MAX_PAGE_SIZE: usize = 200;

/// Upper bound for upcoming run times computed per expression
pub const MAX_NEXT_RUNS: usize = 10;

/// Gateway endpoint that lists cron jobs
pub const GATEWAY_CRON_LIST_PATH: &str = "/api/cron/list";

/// Default gateway URL
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:18789";

/// Default CLI invocation for listing jobs
pub const DEFAULT_CLI_PROGRAM: &str = "clawdbot";
pub const DEFAULT_CLI_ARGS: &[&str] = &["cron", "list", "--format=json"];

/// Config files above this size are rejected
pub const MAX_CONFIG_BYTES: u64 = 1_048_576;
