//! Human-readable labels for the cron table
//!
//! Every function takes `now` explicitly so output is reproducible.

use chrono::{DateTime, Utc};
use cron::Schedule;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::calendar::parse::{parse_days_of_week, CronFields};
use crate::constants::{CRON_DAY_NAMES, MAX_NEXT_RUNS, MONTH_NAMES};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// "In 2d 3h", "In 4h 10m", "In 5m", or "Overdue"
pub fn time_until(future_ms: i64, now_ms: i64) -> String {
    let diff = future_ms.saturating_sub(now_ms);
    if diff < 0 {
        return "Overdue".to_string();
    }

    let minutes = diff / MINUTE_MS;
    let hours = diff / HOUR_MS;
    let days = diff / DAY_MS;

    if days > 0 {
        format!("In {}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("In {}h {}m", hours, minutes % 60)
    } else {
        format!("In {}m", minutes)
    }
}

/// "3d ago", "2h ago", "7m ago", or "Just now"
pub fn time_since(past_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(past_ms);

    let minutes = diff / MINUTE_MS;
    let hours = diff / HOUR_MS;
    let days = diff / DAY_MS;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "Just now".to_string()
    }
}

pub fn format_duration(ms: i64) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }
    let seconds = ms as f64 / 1000.0;
    if seconds < 60.0 {
        return format!("{:.1}s", seconds);
    }
    format!("{:.1}m", seconds / 60.0)
}

/// Describe common cron shapes; anything else comes back unchanged
pub fn cron_to_human(expression: &str) -> String {
    let Some(f) = CronFields::parse(expression) else {
        return expression.to_string();
    };
    let date_wild = f.day_of_month == "*" && f.month == "*" && f.day_of_week == "*";

    if let Some(step) = parse_stride(f.minute) {
        if f.hour == "*" && date_wild {
            return format!("Every {} minutes", step);
        }
    }
    if f.minute == "0" && f.hour == "*" && date_wild {
        return "Every hour".to_string();
    }
    if let Some(step) = parse_stride(f.hour) {
        if f.minute.parse::<u8>().is_ok() && date_wild {
            return format!("Every {} hours", step);
        }
    }

    let (Ok(minute), Ok(hour)) = (f.minute.parse::<u8>(), f.hour.parse::<u8>()) else {
        return expression.to_string();
    };
    let at = format!("{}:{:02}", hour, minute);

    if f.day_of_week != "*" {
        if f.day_of_week == "1-5" {
            return format!("Weekdays at {}", at);
        }
        return match f.day_of_week.parse::<usize>() {
            Ok(day) if day <= 7 => format!("Every {} at {}", CRON_DAY_NAMES[day % 7], at),
            _ => expression.to_string(),
        };
    }

    if f.day_of_month != "*" && f.month != "*" {
        return match (f.day_of_month.parse::<u8>(), f.month.parse::<usize>()) {
            (Ok(day), Ok(month)) if (1..=12).contains(&month) => {
                format!("{} {} at {}", MONTH_NAMES[month - 1], day, at)
            }
            _ => expression.to_string(),
        };
    }

    if f.day_of_month == "*" && f.month == "*" {
        return format!("Daily at {}", at);
    }

    expression.to_string()
}

fn parse_stride(field: &str) -> Option<u32> {
    field
        .strip_prefix("*/")
        .and_then(|step| step.parse::<u32>().ok())
        .filter(|step| *step > 0)
}

/// Upcoming fire times strictly after `after`, at most `MAX_NEXT_RUNS`
///
/// Invalid expressions give an empty list.
pub fn next_runs(expression: &str, after: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    let count = count.min(MAX_NEXT_RUNS);
    let runs: BTreeSet<DateTime<Utc>> = to_schedules(expression)
        .iter()
        .flat_map(|schedule| schedule.after(&after).take(count))
        .collect();
    runs.into_iter().take(count).collect()
}

pub fn is_valid_expression(expression: &str) -> bool {
    !to_schedules(expression).is_empty()
}

/// 5-field standard cron to the `cron` crate's format
///
/// The crate wants a leading seconds field and numbers weekdays 1 = Sunday,
/// so the day-of-week field is rewritten from its parsed weekday set.
/// Standard cron fires when either day field matches if both are
/// restricted, while the crate requires both. That case becomes two
/// schedules, one per day field, and callers take the union.
fn to_schedules(expression: &str) -> Vec<Schedule> {
    let Some(f) = CronFields::parse(expression) else {
        return Vec::new();
    };

    let day_of_week = if f.day_of_week == "*" {
        "*".to_string()
    } else {
        let days = parse_days_of_week(f.day_of_week);
        if days.is_empty() {
            return Vec::new();
        }
        days.iter()
            .map(|index| ((index + 1) % 7 + 1).to_string())
            .collect::<Vec<_>>()
            .join(",")
    };

    let build = |day_of_month: &str, day_of_week: &str| {
        let expr = format!(
            "0 {} {} {} {} {}",
            f.minute, f.hour, day_of_month, f.month, day_of_week
        );
        Schedule::from_str(&expr).ok()
    };

    let schedules = if f.day_of_month != "*" && day_of_week != "*" {
        vec![build(f.day_of_month, "*"), build("*", day_of_week.as_str())]
    } else {
        vec![build(f.day_of_month, day_of_week.as_str())]
    };

    // One invalid half invalidates the expression.
    schedules.into_iter().collect::<Option<Vec<_>>>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const NOW: i64 = 1_760_000_000_000;

    #[test]
    fn test_time_until() {
        assert_eq!(time_until(NOW - 1, NOW), "Overdue");
        assert_eq!(time_until(NOW + 5 * MINUTE_MS + 30_000, NOW), "In 5m");
        assert_eq!(time_until(NOW + 4 * HOUR_MS + 10 * MINUTE_MS, NOW), "In 4h 10m");
        assert_eq!(time_until(NOW + 2 * DAY_MS + 3 * HOUR_MS, NOW), "In 2d 3h");
    }

    #[test]
    fn test_time_since() {
        assert_eq!(time_since(NOW - 20_000, NOW), "Just now");
        assert_eq!(time_since(NOW - 7 * MINUTE_MS, NOW), "7m ago");
        assert_eq!(time_since(NOW - 2 * HOUR_MS - MINUTE_MS, NOW), "2h ago");
        assert_eq!(time_since(NOW - 3 * DAY_MS, NOW), "3d ago");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(850), "850ms");
        assert_eq!(format_duration(12_300), "12.3s");
        assert_eq!(format_duration(90_000), "1.5m");
    }

    #[test]
    fn test_cron_to_human_common_patterns() {
        assert_eq!(cron_to_human("0 * * * *"), "Every hour");
        assert_eq!(cron_to_human("*/30 * * * *"), "Every 30 minutes");
        assert_eq!(cron_to_human("*/15 * * * *"), "Every 15 minutes");
        assert_eq!(cron_to_human("0 */4 * * *"), "Every 4 hours");
        assert_eq!(cron_to_human("0 9 * * *"), "Daily at 9:00");
        assert_eq!(cron_to_human("5 18 * * *"), "Daily at 18:05");
        assert_eq!(cron_to_human("0 9 * * 1"), "Every Monday at 9:00");
        assert_eq!(cron_to_human("0 10 * * 0"), "Every Sunday at 10:00");
        assert_eq!(cron_to_human("0 9 * * 1-5"), "Weekdays at 9:00");
        assert_eq!(cron_to_human("30 9 15 3 *"), "Mar 15 at 9:30");
    }

    #[test]
    fn test_cron_to_human_falls_back_to_expression() {
        assert_eq!(cron_to_human("0 9,13 * * *"), "0 9,13 * * *");
        assert_eq!(cron_to_human("0 9 * * 1,3"), "0 9 * * 1,3");
        assert_eq!(cron_to_human("0 9 15 * *"), "0 9 15 * *");
        assert_eq!(cron_to_human("not cron"), "not cron");
    }

    #[test]
    fn test_next_runs_daily() {
        let after = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        let runs = next_runs("0 9 * * *", after, 2);
        assert_eq!(
            runs,
            vec![
                Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 10, 21, 9, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_next_runs_uses_standard_weekday_numbers() {
        // 2026-10-19 is a Monday
        let after = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        let sunday = next_runs("0 9 * * 0", after, 1);
        assert_eq!(sunday, vec![Utc.with_ymd_and_hms(2026, 10, 25, 9, 0, 0).unwrap()]);
        let monday = next_runs("0 9 * * 1", after, 1);
        assert_eq!(monday, vec![Utc.with_ymd_and_hms(2026, 10, 26, 9, 0, 0).unwrap()]);
    }

    #[test]
    fn test_next_runs_either_day_field_matches() {
        let after = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        // every Friday, plus the 13th of each month; 2026-11-13 is both
        let runs = next_runs("0 9 13 * 5", after, 5);
        assert_eq!(
            runs,
            vec![
                Utc.with_ymd_and_hms(2026, 10, 23, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 10, 30, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 11, 6, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 11, 13, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 11, 20, 9, 0, 0).unwrap(),
            ]
        );
        assert!(is_valid_expression("0 9 13 * 5"));
        assert!(!is_valid_expression("0 9 32 * 5"));
    }

    #[test]
    fn test_relative_labels_survive_extreme_timestamps() {
        assert_eq!(time_until(i64::MIN, NOW), "Overdue");
        assert!(time_until(i64::MAX, i64::MIN).starts_with("In "));
        assert!(time_since(i64::MIN, NOW).ends_with("d ago"));
        assert_eq!(time_since(i64::MAX, NOW), "Just now");
    }

    #[test]
    fn test_next_runs_capped_and_invalid() {
        let after = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        assert_eq!(next_runs("* * * * *", after, 100).len(), MAX_NEXT_RUNS);
        assert!(next_runs("0 9 * *", after, 3).is_empty());
        assert!(next_runs("0 9 * * 9", after, 3).is_empty());
        assert!(!is_valid_expression("61 9 * * *"));
        assert!(is_valid_expression("0 8 * * 1,3,5"));
    }
}
