use std::collections::BTreeSet;

use super::classify::classify;
use super::palette::JobPalette;
use super::parse::{parse_days_of_week, parse_hours, CronFields};
use super::types::*;
use crate::constants::{DAYS_PER_WEEK, DAY_LABELS, DISPLAY_HOURS};

/// Projects cron jobs onto the weekly calendar grid
///
/// Stateless apart from the palette it owns; the same jobs always produce the
/// same slots. Safe to share across request handlers.
#[derive(Clone, Debug, Default)]
pub struct CronProjectionEngine {
    palette: JobPalette,
}

impl CronProjectionEngine {
    pub fn new(palette: JobPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &JobPalette {
        &self.palette
    }

    pub fn color_for(&self, job_name: &str) -> &str {
        self.palette.color_for(job_name)
    }

    pub fn classify(&self, job: &JobDescriptor) -> Classification {
        classify(&job.name, &job.schedule.expression)
    }

    /// One slot per (hour, weekday) the job occupies inside the display window
    pub fn project_job_to_slots(&self, job: &JobDescriptor) -> Vec<CalendarSlot> {
        if !job.enabled {
            return Vec::new();
        }
        let Some(fields) = CronFields::parse(&job.schedule.expression) else {
            return Vec::new();
        };

        let hours = parse_hours(fields.hour);
        let days = parse_days_of_week(fields.day_of_week);
        if hours.is_empty() || days.is_empty() {
            return Vec::new();
        }

        let color = self.color_for(&job.name).to_string();
        let classification = self.classify(job);

        let mut slots = Vec::with_capacity(hours.len() * days.len());
        for &hour in &hours {
            for &day in &days {
                slots.push(CalendarSlot {
                    job_id: job.id.clone(),
                    job_name: job.name.clone(),
                    hour_of_day: hour,
                    day_of_week: day,
                    color: color.clone(),
                    classification,
                    expression: job.schedule.expression.clone(),
                });
            }
        }
        slots
    }

    /// Slots of every job, in job order
    pub fn project_all(&self, jobs: &[JobDescriptor]) -> Vec<CalendarSlot> {
        jobs.iter()
            .flat_map(|job| self.project_job_to_slots(job))
            .collect()
    }

    /// Bucket all slots into the hour x weekday grid
    pub fn build_calendar(&self, jobs: &[JobDescriptor]) -> CalendarView {
        let slots = self.project_all(jobs);
        let slot_count = slots.len() as u32;

        let mut rows: Vec<CalendarRow> = DISPLAY_HOURS
            .map(|hour| CalendarRow {
                hour,
                label: format!("{:02}:00", hour),
                cells: vec![Vec::new(); DAYS_PER_WEEK as usize],
            })
            .collect();

        let first_hour = *DISPLAY_HOURS.start();
        for slot in slots {
            let row = (slot.hour_of_day - first_hour) as usize;
            let col = slot.day_of_week as usize;
            if let Some(cell) = rows.get_mut(row).and_then(|r| r.cells.get_mut(col)) {
                cell.push(slot);
            }
        }

        let timezones: BTreeSet<String> = jobs
            .iter()
            .filter(|job| job.enabled)
            .filter_map(|job| job.schedule.timezone.as_deref())
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .map(str::to_string)
            .collect();

        CalendarView {
            total_jobs: jobs.len() as u32,
            active_jobs: jobs.iter().filter(|job| job.enabled).count() as u32,
            slot_count,
            timezones: timezones.into_iter().collect(),
            days: DAY_LABELS.iter().map(|d| d.to_string()).collect(),
            rows,
            legend: self.palette.legend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::palette::DEFAULT_COLOR;
    use std::collections::HashSet;

    fn job(name: &str, expr: &str) -> JobDescriptor {
        JobDescriptor::new(format!("id-{}", name), name, ScheduleSpec::cron(expr))
    }

    #[test]
    fn test_email_report_projects_three_slots() {
        let engine = CronProjectionEngine::default();
        let job = job("Enviar email reporte", "0 8 * * 1,3,5");
        let job = JobDescriptor {
            schedule: job.schedule.with_timezone("Europe/Madrid"),
            ..job
        };

        let slots = engine.project_job_to_slots(&job);
        assert_eq!(slots.len(), 3);
        let days: HashSet<u8> = slots.iter().map(|s| s.day_of_week).collect();
        assert_eq!(days, HashSet::from([0, 2, 4]));
        assert!(slots.iter().all(|s| s.hour_of_day == 8));
        assert!(slots.iter().all(|s| s.color == "#EA4335"));
        assert!(slots.iter().all(|s| s.classification == Classification::Recurring));
        assert!(slots.iter().all(|s| s.job_id == job.id));
    }

    #[test]
    fn test_disabled_job_projects_nothing() {
        let engine = CronProjectionEngine::default();
        for expr in ["* * * * *", "0 8 * * 1-5", "garbage"] {
            let job = job("Publicar tweet", expr).disabled();
            assert!(engine.project_job_to_slots(&job).is_empty());
        }
    }

    #[test]
    fn test_malformed_expression_projects_nothing() {
        let engine = CronProjectionEngine::default();
        assert!(engine.project_job_to_slots(&job("a", "0 8 * *")).is_empty());
        assert!(engine.project_job_to_slots(&job("a", "0 0 8 * * 1")).is_empty());
        assert!(engine.project_job_to_slots(&job("a", "0 8 * * funday")).is_empty());
    }

    #[test]
    fn test_every_hour_every_day_fills_grid() {
        let engine = CronProjectionEngine::default();
        let slots = engine.project_job_to_slots(&job("Heartbeat", "0 * * * *"));
        assert_eq!(slots.len(), 17 * 7);

        let unique: HashSet<(u8, u8)> = slots
            .iter()
            .map(|s| (s.hour_of_day, s.day_of_week))
            .collect();
        assert_eq!(unique.len(), slots.len());
    }

    #[test]
    fn test_hours_outside_window_are_dropped() {
        let engine = CronProjectionEngine::default();
        assert!(engine.project_job_to_slots(&job("Night", "0 3 * * *")).is_empty());
        let slots = engine.project_job_to_slots(&job("Stride", "0 */6 * * 0"));
        let hours: Vec<u8> = slots.iter().map(|s| s.hour_of_day).collect();
        assert_eq!(hours, vec![12, 18]);
        assert!(slots.iter().all(|s| s.day_of_week == 6));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let engine = CronProjectionEngine::default();
        let jobs = vec![
            job("Publicar tweet", "0 9,13,18 * * 1-5"),
            job("Reporte semanal", "30 10 * * 1"),
        ];
        assert_eq!(engine.project_all(&jobs), engine.project_all(&jobs));
    }

    #[test]
    fn test_slot_carries_classification() {
        let engine = CronProjectionEngine::default();
        let slots = engine.project_job_to_slots(&job("Recordatorio pagar factura", "0 9 15 3 *"));
        assert_eq!(slots.len(), 7);
        assert!(slots.iter().all(|s| s.classification == Classification::OneOff));
        assert!(slots.iter().all(|s| s.color == "#EC4899"));
    }

    #[test]
    fn test_engine_classify_and_color() {
        let engine = CronProjectionEngine::default();
        assert_eq!(
            engine.classify(&job("Reporte semanal", "0 9 * * 1")),
            Classification::Recurring
        );
        assert_eq!(
            engine.classify(&job("Newsletter", "0 9 15 3 *")),
            Classification::OneOff
        );
        assert_eq!(engine.color_for("Unknown Job XYZ"), DEFAULT_COLOR);
    }

    #[test]
    fn test_build_calendar_buckets_by_hour_and_day() {
        let engine = CronProjectionEngine::default();
        let jobs = vec![
            JobDescriptor {
                schedule: ScheduleSpec::cron("0 8 * * 1,3,5").with_timezone("Europe/Madrid"),
                ..job("Enviar email reporte", "")
            },
            job("Publicar tweet", "0 8 * * 1"),
            job("Apagado", "0 8 * * 1").disabled(),
        ];

        let view = engine.build_calendar(&jobs);
        assert_eq!(view.total_jobs, 3);
        assert_eq!(view.active_jobs, 2);
        assert_eq!(view.slot_count, 4);
        assert_eq!(view.rows.len(), 17);
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.timezones, vec!["Europe/Madrid".to_string()]);

        let eight = &view.rows[1];
        assert_eq!(eight.hour, 8);
        assert_eq!(eight.label, "08:00");
        let monday: Vec<&str> = eight.cells[0].iter().map(|s| s.job_name.as_str()).collect();
        assert_eq!(monday, vec!["Enviar email reporte", "Publicar tweet"]);
        assert_eq!(eight.cells[2].len(), 1);
        assert!(eight.cells[1].is_empty());
        assert!(view.rows[0].cells.iter().all(|c| c.is_empty()));
        assert_eq!(view.legend.len(), engine.palette().rules.len());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CronProjectionEngine>();
    }
}
