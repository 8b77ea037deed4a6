//! Earliest-deadline-first daily allocator.
//!
//! # Responsibility
//! - Spread each project's remaining effort over the business days left
//!   before its due date.
//! - Share each day's capacity between projects, earliest due date first.
//! - Report projects that cannot be fully scheduled.
//!
//! # Invariants
//! - Output order is project-major (EDF order), date-ascending per project.
//! - Every chunk is at least the minimum chunk size, except a project's
//!   final chunk, which is exactly its leftover remainder.
//! - Identical input yields identical `(project_id, date, hours)` triples.

use crate::calendar::{add_days, business_days_left, is_weekend};
use crate::model::project::{Project, ProjectId};
use crate::model::task::{ProjectSnapshot, Task};
use crate::planner::config::{AllocatorConfig, ConfigError};
use crate::planner::ledger::CapacityLedger;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Tolerance for comparing fractional hour values.
const HOURS_EPSILON: f64 = 1e-9;

/// Non-fatal scheduling diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationWarning {
    /// Effort is left and the due date has passed.
    Overdue {
        project_id: ProjectId,
        due_date: NaiveDate,
        remaining_hours: f64,
    },
    /// Effort is left, the due date has not passed, but no business day
    /// falls between today and the due date.
    NoBusinessDayLeft {
        project_id: ProjectId,
        due_date: NaiveDate,
        remaining_hours: f64,
    },
    /// The walk reached the due date with effort still unscheduled.
    Unscheduled {
        project_id: ProjectId,
        due_date: NaiveDate,
        unscheduled_hours: f64,
    },
}

impl AllocationWarning {
    pub fn project_id(&self) -> ProjectId {
        match self {
            Self::Overdue { project_id, .. }
            | Self::NoBusinessDayLeft { project_id, .. }
            | Self::Unscheduled { project_id, .. } => *project_id,
        }
    }
}

impl Display for AllocationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overdue {
                project_id,
                due_date,
                remaining_hours,
            } => write!(
                f,
                "project {project_id} is overdue (due {due_date}) with {remaining_hours}h left"
            ),
            Self::NoBusinessDayLeft {
                project_id,
                due_date,
                remaining_hours,
            } => write!(
                f,
                "project {project_id} has no business day left before {due_date} for {remaining_hours}h"
            ),
            Self::Unscheduled {
                project_id,
                due_date,
                unscheduled_hours,
            } => write!(
                f,
                "project {project_id} cannot fit {unscheduled_hours}h before {due_date}"
            ),
        }
    }
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationPlan {
    /// Chunks in generation order.
    pub tasks: Vec<Task>,
    pub warnings: Vec<AllocationWarning>,
}

impl AllocationPlan {
    /// Chunks scheduled on `date`, in generation order.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.date == date).collect()
    }

    /// Total hours booked on `date` across all projects.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.tasks
            .iter()
            .filter(|task| task.date == date)
            .map(|task| task.hours)
            .sum()
    }

    /// Total hours scheduled for one project.
    pub fn hours_for(&self, project_id: ProjectId) -> f64 {
        self.tasks
            .iter()
            .filter(|task| task.project.id == project_id)
            .map(|task| task.hours)
            .sum()
    }

    pub fn is_feasible(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Sorts chunks by date, keeping generation order within a day.
pub fn sort_date_major(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.date);
}

/// Allocates with the default 8h/2h policy and returns only the chunks.
pub fn allocate(projects: &[Project], today: NaiveDate) -> Vec<Task> {
    DailyAllocator::default().allocate(projects, today).tasks
}

/// Stateless allocator; each call builds and drops its own ledger.
#[derive(Debug, Clone, Default)]
pub struct DailyAllocator {
    config: AllocatorConfig,
}

impl DailyAllocator {
    /// # Errors
    /// Returns the first configuration invariant that does not hold.
    pub fn new(config: AllocatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builds the schedule for every project from `today` on.
    ///
    /// Never fails. Projects with no remaining effort are ignored; projects
    /// that cannot be fully placed produce warnings next to their partial
    /// chunks.
    pub fn allocate(&self, projects: &[Project], today: NaiveDate) -> AllocationPlan {
        let started_at = Instant::now();
        let mut ordered: Vec<&Project> = projects.iter().collect();
        ordered.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });

        let mut ledger = CapacityLedger::new(self.config.daily_capacity_hours);
        let mut plan = AllocationPlan::default();

        for project in ordered {
            self.allocate_project(project, today, &mut ledger, &mut plan);
        }

        info!(
            "event=allocation_run module=planner status=ok today={} projects={} tasks={} warnings={} duration_ms={}",
            today,
            projects.len(),
            plan.tasks.len(),
            plan.warnings.len(),
            started_at.elapsed().as_millis()
        );
        plan
    }

    fn allocate_project(
        &self,
        project: &Project,
        today: NaiveDate,
        ledger: &mut CapacityLedger,
        plan: &mut AllocationPlan,
    ) {
        if project.remaining_hours <= HOURS_EPSILON {
            return;
        }

        let days_left = business_days_left(today, project.due_date);
        if days_left <= 0 {
            let overdue = project.due_date < today;
            warn!(
                "event=allocation_skip module=planner status={} project_id={} due_date={} remaining_hours={}",
                if overdue { "overdue" } else { "no_business_day" },
                project.id,
                project.due_date,
                project.remaining_hours
            );
            let (project_id, due_date, remaining_hours) =
                (project.id, project.due_date, project.remaining_hours);
            plan.warnings.push(if overdue {
                AllocationWarning::Overdue {
                    project_id,
                    due_date,
                    remaining_hours,
                }
            } else {
                AllocationWarning::NoBusinessDayLeft {
                    project_id,
                    due_date,
                    remaining_hours,
                }
            });
            return;
        }

        let target = self.daily_target(project.remaining_hours, days_left);
        let snapshot = ProjectSnapshot::of(project);
        let mut remaining = project.remaining_hours;
        let mut day = today;

        while remaining > HOURS_EPSILON && day <= project.due_date {
            if !is_weekend(day) {
                if let Some(hours) = self.chunk_for_day(target, remaining, ledger.available(day)) {
                    let booked = ledger.reserve(day, hours);
                    remaining -= booked;
                    plan.tasks.push(Task::new(snapshot.clone(), day, booked));
                }
            }
            if day == NaiveDate::MAX {
                break;
            }
            day = add_days(day, 1);
        }

        debug!(
            "event=allocation_project module=planner status=ok project_id={} days_left={} target_hours={} unscheduled_hours={}",
            project.id,
            days_left,
            target,
            remaining.max(0.0)
        );

        if remaining > HOURS_EPSILON {
            warn!(
                "event=allocation_shortfall module=planner status=partial project_id={} due_date={} unscheduled_hours={}",
                project.id, project.due_date, remaining
            );
            plan.warnings.push(AllocationWarning::Unscheduled {
                project_id: project.id,
                due_date: project.due_date,
                unscheduled_hours: remaining,
            });
        }
    }

    /// Per-day target: an even spread, never below the minimum chunk.
    fn daily_target(&self, remaining: f64, days_left: i64) -> f64 {
        let even_spread = (remaining / days_left as f64).ceil();
        even_spread.max(self.config.min_chunk_hours)
    }

    /// Hours to book on one business day, if any.
    fn chunk_for_day(&self, target: f64, remaining: f64, available: f64) -> Option<f64> {
        let min_chunk = self.config.min_chunk_hours;
        let desired = target.min(remaining).min(available);

        if desired + HOURS_EPSILON >= min_chunk {
            return Some(desired);
        }
        // Final sliver: only placed when the whole remainder fits today.
        if remaining < min_chunk && available + HOURS_EPSILON >= remaining {
            return Some(remaining);
        }
        None
    }
}
