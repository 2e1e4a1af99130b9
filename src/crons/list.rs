//! Cron table: filtering, sorting, pagination and summary counts

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use super::format::{cron_to_human, format_duration, time_since, time_until};
use crate::calendar::classify::classify;
use crate::calendar::types::{Classification, JobDescriptor, JobState};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "crons/")]
#[serde(rename_all = "snake_case")]
pub enum CronTab {
    #[default]
    All,
    Recurring,
    OneOff,
}

impl CronTab {
    fn accepts(self, classification: Classification) -> bool {
        match self {
            CronTab::All => true,
            CronTab::Recurring => classification == Classification::Recurring,
            CronTab::OneOff => classification == Classification::OneOff,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "crons/")]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    #[default]
    NextRun,
    LastRun,
    Status,
    Duration,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "crons/")]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query parameters of the cron table
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CronListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_true")]
    pub show_disabled: bool,
    #[serde(default)]
    pub tab: CronTab,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    /// 1-based
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_true() -> bool {
    true
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for CronListQuery {
    fn default() -> Self {
        Self {
            search: None,
            show_disabled: true,
            tab: CronTab::All,
            sort: SortField::NextRun,
            direction: SortDirection::Asc,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "crons/")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Disabled,
    Ok,
    Error,
    Pending,
}

/// One line of the cron table
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "crons/")]
pub struct CronRow {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub expression: String,
    pub timezone: Option<String>,
    pub classification: Classification,
    pub status: JobStatus,
    pub schedule_label: String,
    pub next_run_at_ms: Option<i64>,
    pub next_run_label: Option<String>,
    pub last_run_at_ms: Option<i64>,
    pub last_run_label: Option<String>,
    pub duration_label: Option<String>,
    pub last_error: Option<String>,
}

/// Summary counts over the unfiltered job list
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "crons/")]
pub struct CronStats {
    pub total: u32,
    pub enabled: u32,
    pub disabled: u32,
    pub errors: u32,
    pub ok: u32,
    pub recurring: u32,
    pub one_off: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "crons/")]
pub struct CronListPage {
    pub items: Vec<CronRow>,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_matches: u32,
    pub stats: CronStats,
}

pub fn job_status(job: &JobDescriptor) -> JobStatus {
    if !job.enabled {
        return JobStatus::Disabled;
    }
    match last_status(job) {
        Some("ok") => JobStatus::Ok,
        Some("error") => JobStatus::Error,
        _ => JobStatus::Pending,
    }
}

pub fn compute_stats(jobs: &[JobDescriptor]) -> CronStats {
    let mut stats = CronStats::default();
    for job in jobs {
        stats.total += 1;
        if job.enabled {
            stats.enabled += 1;
        } else {
            stats.disabled += 1;
        }
        match last_status(job) {
            Some("ok") => stats.ok += 1,
            Some("error") => stats.errors += 1,
            _ => {}
        }
        match classify(&job.name, &job.schedule.expression) {
            Classification::Recurring => stats.recurring += 1,
            Classification::OneOff => stats.one_off += 1,
        }
    }
    stats
}

/// Filter, sort and paginate jobs for the cron table
pub fn list_crons(jobs: &[JobDescriptor], query: &CronListQuery, now_ms: i64) -> CronListPage {
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    let mut matches: Vec<&JobDescriptor> = jobs
        .iter()
        .filter(|job| search.is_empty() || job.name.to_lowercase().contains(&search))
        .filter(|job| query.show_disabled || job.enabled)
        .filter(|job| query.tab.accepts(classify(&job.name, &job.schedule.expression)))
        .collect();

    matches.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort);
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let per_page = query.per_page.clamp(1, MAX_PAGE_SIZE);
    let page = query.page.max(1);
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(per_page);

    let items = matches
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(|job| to_row(job, now_ms))
        .collect();

    CronListPage {
        items,
        page: page as u32,
        per_page: per_page as u32,
        total_pages: total_pages as u32,
        total_matches: total_matches as u32,
        stats: compute_stats(jobs),
    }
}

pub fn to_row(job: &JobDescriptor, now_ms: i64) -> CronRow {
    let state = job.state.clone().unwrap_or_default();
    let next_run = timestamp(state.next_run_at_ms);
    let last_run = timestamp(state.last_run_at_ms);

    CronRow {
        id: job.id.clone(),
        name: job.name.clone(),
        enabled: job.enabled,
        expression: job.schedule.expression.clone(),
        timezone: job.schedule.timezone.clone(),
        classification: classify(&job.name, &job.schedule.expression),
        status: job_status(job),
        schedule_label: cron_to_human(&job.schedule.expression),
        next_run_at_ms: next_run,
        next_run_label: next_run.map(|ms| time_until(ms, now_ms)),
        last_run_at_ms: last_run,
        last_run_label: last_run.map(|ms| time_since(ms, now_ms)),
        duration_label: state
            .last_duration_ms
            .filter(|ms| *ms != 0)
            .map(format_duration),
        last_error: state.last_error,
    }
}

fn last_status(job: &JobDescriptor) -> Option<&str> {
    job.state.as_ref().and_then(|s| s.last_status.as_deref())
}

// Missing or zero timestamps count as absent.
fn timestamp(value: Option<i64>) -> Option<i64> {
    value.filter(|ms| *ms != 0)
}

fn compare(a: &JobDescriptor, b: &JobDescriptor, field: SortField) -> Ordering {
    let state_a = a.state.as_ref();
    let state_b = b.state.as_ref();

    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::NextRun => {
            let key = |s: Option<&JobState>| {
                timestamp(s.and_then(|s| s.next_run_at_ms)).unwrap_or(i64::MAX)
            };
            key(state_a).cmp(&key(state_b))
        }
        SortField::LastRun => {
            // most recent first
            let key = |s: Option<&JobState>| {
                timestamp(s.and_then(|s| s.last_run_at_ms)).unwrap_or(0)
            };
            key(state_b).cmp(&key(state_a))
        }
        SortField::Status => status_key(a).cmp(status_key(b)),
        SortField::Duration => {
            let key = |s: Option<&JobState>| {
                s.and_then(|s| s.last_duration_ms).unwrap_or(0)
            };
            key(state_a).cmp(&key(state_b))
        }
    }
}

fn status_key(job: &JobDescriptor) -> &str {
    if !job.enabled {
        return "disabled";
    }
    last_status(job).filter(|s| !s.is_empty()).unwrap_or("z")
}
