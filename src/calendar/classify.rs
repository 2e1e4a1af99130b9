use super::types::Classification;
use crate::constants::ONE_OFF_NAME_MARKERS;

/// Recurring vs one-off, from the job name and the date fields of its schedule
///
/// A reminder-like name wins over everything else. Otherwise a schedule whose
/// day-of-month and month are both specific values is a single date.
/// Hour, minute and day-of-week are never consulted.
pub fn classify(name: &str, expression: &str) -> Classification {
    if is_one_off_name(name) {
        return Classification::OneOff;
    }

    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() >= 5 && is_specific(fields[2]) && is_specific(fields[3]) {
        return Classification::OneOff;
    }

    Classification::Recurring
}

/// Case-insensitive reminder markers in a job name
pub fn is_one_off_name(name: &str) -> bool {
    let name = name.to_lowercase();
    ONE_OFF_NAME_MARKERS.iter().any(|marker| name.contains(marker))
}

// Ranges like "1-5" count as specific.
fn is_specific(field: &str) -> bool {
    field != "*" && !field.contains('/') && !field.contains(',')
}
