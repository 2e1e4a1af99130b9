use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Schedule of a gateway job
/// Only cron-kind schedules carry an expression; anything else projects to nothing
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 5-field cron expression: minute hour day-of-month month day-of-week
    #[serde(rename = "expr", default, deserialize_with = "null_as_default")]
    pub expression: String,
    /// IANA zone name, display only
    #[serde(rename = "tz", default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl ScheduleSpec {
    pub fn cron(expression: impl Into<String>) -> Self {
        Self {
            kind: Some("cron".to_string()),
            expression: expression.into(),
            timezone: None,
        }
    }

    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }
}

/// Runtime state reported by the gateway (all optional)
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_at_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_at_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// A cron job as listed by the gateway
///
/// Keys this crate doesn't model are kept in `extra` and written back
/// unchanged when the job is re-serialized.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct JobDescriptor {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: ScheduleSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JobState>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, schedule: ScheduleSpec) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            schedule,
            state: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_state(mut self, state: JobState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Explicit `null` reads as the field's default, like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whether a job repeats weekly or fires on a single date
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "calendar/")]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Recurring,
    OneOff,
}

/// One (hour, weekday) cell occupied by a job
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "calendar/")]
pub struct CalendarSlot {
    pub job_id: String,
    pub job_name: String,
    /// 7..=23
    pub hour_of_day: u8,
    /// 0 = Monday ... 6 = Sunday
    pub day_of_week: u8,
    pub color: String,
    pub classification: Classification,
    /// Source cron expression (tooltip)
    pub expression: String,
}

/// Legend item for one palette category
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "calendar/")]
pub struct LegendEntry {
    pub category: String,
    pub label: String,
    pub color: String,
}

/// One hour row of the weekly grid
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "calendar/")]
pub struct CalendarRow {
    pub hour: u8,
    /// "HH:00"
    pub label: String,
    /// Seven cells, Monday first
    pub cells: Vec<Vec<CalendarSlot>>,
}

/// Weekly grid (7 weekdays x display hours) ready for rendering
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "calendar/")]
pub struct CalendarView {
    pub total_jobs: u32,
    pub active_jobs: u32,
    pub slot_count: u32,
    pub timezones: Vec<String>,
    pub days: Vec<String>,
    pub rows: Vec<CalendarRow>,
    pub legend: Vec<LegendEntry>,
}
