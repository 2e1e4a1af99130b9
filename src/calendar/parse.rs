//! Cron field parsing for the weekly calendar
//!
//! Only the hour and day-of-week fields matter for the grid. Parsing is
//! permissive: a malformed token is dropped, a malformed field yields an
//! empty set, and nothing here returns an error.
//!
//! Supported tokens: `*`, literal, `a,b,c`, `a-b`, and `*/N` strides.

use std::collections::BTreeSet;

use crate::constants::{DAYS_PER_WEEK, DISPLAY_HOURS};

/// The five fields of a cron expression, borrowed from the source string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CronFields<'a> {
    pub minute: &'a str,
    pub hour: &'a str,
    pub day_of_month: &'a str,
    pub month: &'a str,
    pub day_of_week: &'a str,
}

impl<'a> CronFields<'a> {
    /// Split on whitespace; anything other than exactly five fields is rejected
    pub fn parse(expression: &'a str) -> Option<Self> {
        let mut parts = expression.split_whitespace();
        let fields = Self {
            minute: parts.next()?,
            hour: parts.next()?,
            day_of_month: parts.next()?,
            month: parts.next()?,
            day_of_week: parts.next()?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(fields)
    }
}

/// Hours of the display window matched by an hour field
///
/// A `*/N` stride always counts from hour 0 and is then cut to the window,
/// so `*/6` gives 12 and 18 (0 and 6 fall before the window).
pub fn parse_hours(field: &str) -> BTreeSet<u8> {
    let field = field.trim();
    if field == "*" {
        return DISPLAY_HOURS.collect();
    }

    if let Some((_, step)) = field.split_once('/') {
        return match parse_step(step) {
            Some(step) => (0..24u8)
                .step_by(step)
                .filter(|h| DISPLAY_HOURS.contains(h))
                .collect(),
            None => BTreeSet::new(),
        };
    }

    field
        .split(',')
        .flat_map(expand_token)
        .filter(|h| DISPLAY_HOURS.contains(h))
        .collect()
}

/// Weekday indices (0 = Monday ... 6 = Sunday) matched by a day-of-week field
///
/// Values are read as standard cron numbers (0 = Sunday, 7 also Sunday) and
/// converted before they are returned. Inverted ranges such as `5-1` match
/// nothing.
pub fn parse_days_of_week(field: &str) -> BTreeSet<u8> {
    let field = field.trim();
    if field == "*" {
        return (0..DAYS_PER_WEEK).collect();
    }

    if let Some((_, step)) = field.split_once('/') {
        return match parse_step(step) {
            Some(step) => (0..DAYS_PER_WEEK)
                .step_by(step)
                .filter_map(cron_day_to_index)
                .collect(),
            None => BTreeSet::new(),
        };
    }

    field
        .split(',')
        .flat_map(expand_token)
        .filter_map(cron_day_to_index)
        .collect()
}

/// Standard cron weekday (0/7 = Sunday) to grid column (0 = Monday)
pub fn cron_day_to_index(cron_day: u8) -> Option<u8> {
    match cron_day {
        0 => Some(6),
        1..=7 => Some(cron_day - 1),
        _ => None,
    }
}

fn parse_step(step: &str) -> Option<usize> {
    step.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// A literal or an inclusive `a-b` range; malformed input expands to nothing
fn expand_token(token: &str) -> Vec<u8> {
    let token = token.trim();
    match token.split_once('-') {
        Some((start, end)) => match (start.trim().parse::<u8>(), end.trim().parse::<u8>()) {
            (Ok(start), Ok(end)) if start <= end => (start..=end).collect(),
            _ => Vec::new(),
        },
        None => token.parse::<u8>().map(|v| vec![v]).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u8]) -> BTreeSet<u8> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_fields_require_exactly_five() {
        assert!(CronFields::parse("0 9 * * 1").is_some());
        assert!(CronFields::parse("0 9 * *").is_none());
        assert!(CronFields::parse("0 0 9 * * 1").is_none());
        assert!(CronFields::parse("").is_none());
    }

    #[test]
    fn test_fields_tolerate_repeated_whitespace() {
        let fields = CronFields::parse("  30  8 *\t* 1-5 ").unwrap();
        assert_eq!(fields.minute, "30");
        assert_eq!(fields.hour, "8");
        assert_eq!(fields.day_of_week, "1-5");
    }

    #[test]
    fn test_hours_wildcard_is_display_window() {
        let hours = parse_hours("*");
        assert_eq!(hours.len(), 17);
        assert_eq!(hours.first(), Some(&7));
        assert_eq!(hours.last(), Some(&23));
    }

    #[test]
    fn test_hours_stride_truncated_to_window() {
        assert_eq!(parse_hours("*/6"), set(&[12, 18]));
        assert_eq!(parse_hours("*/4"), set(&[8, 12, 16, 20]));
        assert_eq!(parse_hours("*/1"), parse_hours("*"));
    }

    #[test]
    fn test_hours_invalid_stride_is_empty() {
        assert!(parse_hours("*/abc").is_empty());
        assert!(parse_hours("*/0").is_empty());
        assert!(parse_hours("*/").is_empty());
    }

    #[test]
    fn test_hours_list_skips_bad_tokens_and_out_of_window() {
        assert_eq!(parse_hours("6,9,x,14,24"), set(&[9, 14]));
        assert_eq!(parse_hours("9,9,9"), set(&[9]));
    }

    #[test]
    fn test_hours_literal() {
        assert_eq!(parse_hours("8"), set(&[8]));
        assert!(parse_hours("3").is_empty());
        assert!(parse_hours("nine").is_empty());
    }

    #[test]
    fn test_hours_range() {
        assert_eq!(parse_hours("5-9"), set(&[7, 8, 9]));
        assert!(parse_hours("18-9").is_empty());
    }

    #[test]
    fn test_hours_never_leave_window() {
        for field in ["*", "*/2", "*/5", "0-23", "0,1,2,22,23", "23", "0"] {
            assert!(parse_hours(field).iter().all(|h| DISPLAY_HOURS.contains(h)), "{}", field);
        }
    }

    #[test]
    fn test_days_wildcard() {
        assert_eq!(parse_days_of_week("*"), set(&[0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_days_sunday_zero_becomes_six() {
        assert_eq!(parse_days_of_week("0"), set(&[6]));
        assert_eq!(parse_days_of_week("7"), set(&[6]));
    }

    #[test]
    fn test_days_weekday_range() {
        assert_eq!(parse_days_of_week("1-5"), set(&[0, 1, 2, 3, 4]));
        assert_eq!(parse_days_of_week("0-6"), set(&[0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_days_inverted_range_is_empty() {
        assert!(parse_days_of_week("5-1").is_empty());
    }

    #[test]
    fn test_days_list() {
        assert_eq!(parse_days_of_week("1,3,5"), set(&[0, 2, 4]));
        assert_eq!(parse_days_of_week("0,6"), set(&[5, 6]));
        assert_eq!(parse_days_of_week("1,mon,9"), set(&[0]));
    }

    #[test]
    fn test_days_list_with_range_token() {
        assert_eq!(parse_days_of_week("1-3,5"), set(&[0, 1, 2, 4]));
    }

    #[test]
    fn test_days_stride() {
        // cron days 0, 2, 4, 6
        assert_eq!(parse_days_of_week("*/2"), set(&[6, 1, 3, 5]));
        assert!(parse_days_of_week("*/x").is_empty());
    }

    #[test]
    fn test_days_never_leave_range() {
        for field in ["*", "0-7", "0,1,2,3,4,5,6,7,8", "*/3", "9"] {
            assert!(parse_days_of_week(field).iter().all(|d| *d < 7), "{}", field);
        }
    }
}
