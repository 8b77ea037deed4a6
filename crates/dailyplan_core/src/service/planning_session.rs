//! Planning session: allocation, daily agenda and completion tracking.
//!
//! # Responsibility
//! - Feed active projects from storage into the allocator.
//! - Record worked hours against the owning project.
//! - Remember completed chunks for the lifetime of the session.
//!
//! # Invariants
//! - Expired projects never reach the allocator.
//! - `0 < hours_worked <= task.hours` for every accepted completion.
//! - `remaining_hours` is decremented and clamped at zero, never negative.
//! - Completion state is keyed by `TaskKey`, never by per-run task ids.

use crate::model::project::{Project, ProjectId};
use crate::model::task::{Task, TaskKey};
use crate::planner::allocator::{AllocationPlan, DailyAllocator};
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository, RepoError};
use crate::service::agenda::DailyAgenda;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from planning session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Worked hours outside `(0, task.hours]`.
    InvalidHoursWorked { hours_worked: f64, scheduled: f64 },
    /// The chunk was already completed this session.
    AlreadyCompleted(TaskKey),
    /// The chunk's project no longer exists.
    ProjectNotFound(ProjectId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHoursWorked {
                hours_worked,
                scheduled,
            } => {
                if *hours_worked <= 0.0 || hours_worked.is_nan() {
                    write!(f, "hours must be greater than 0, got {hours_worked}")
                } else {
                    write!(
                        f,
                        "maximum hours for this task is {scheduled}, got {hours_worked}"
                    )
                }
            }
            Self::AlreadyCompleted(key) => write!(
                f,
                "task for project {} on {} is already completed",
                key.project_id, key.date
            ),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// One user's planning session over a project store.
pub struct PlanningSession<R: ProjectRepository> {
    repo: R,
    allocator: DailyAllocator,
    completed: BTreeMap<TaskKey, Task>,
}

impl<R: ProjectRepository> PlanningSession<R> {
    pub fn new(repo: R, allocator: DailyAllocator) -> Self {
        Self {
            repo,
            allocator,
            completed: BTreeMap::new(),
        }
    }

    /// Allocates every project still due on or after `today`.
    pub fn plan(&self, today: NaiveDate) -> Result<AllocationPlan, SessionError> {
        let projects = self
            .repo
            .list_projects(&ProjectListQuery::active_on(today))?;
        Ok(self.allocator.allocate(&projects, today))
    }

    /// Today's checklist: fresh chunks plus chunks completed earlier.
    pub fn agenda(&self, today: NaiveDate) -> Result<DailyAgenda, SessionError> {
        let plan = self.plan(today)?;
        Ok(DailyAgenda::build(today, &plan.tasks, &self.completed))
    }

    /// Today's chunk for one project, if the allocator scheduled one.
    pub fn task_for_project(
        &self,
        project_id: ProjectId,
        today: NaiveDate,
    ) -> Result<Option<Task>, SessionError> {
        let plan = self.plan(today)?;
        Ok(plan
            .tasks
            .into_iter()
            .find(|task| task.project.id == project_id && task.date == today))
    }

    /// Records `hours_worked` against `task` and marks it completed.
    ///
    /// Returns the project as persisted after the decrement.
    ///
    /// # Errors
    /// - `InvalidHoursWorked` unless `0 < hours_worked <= task.hours`.
    /// - `AlreadyCompleted` when the chunk was completed before.
    /// - `ProjectNotFound` when the owning project is gone.
    /// - `Repo` for storage failures.
    pub fn complete_task(
        &mut self,
        task: &Task,
        hours_worked: f64,
    ) -> Result<Project, SessionError> {
        if !(hours_worked > 0.0 && hours_worked <= task.hours) {
            return Err(SessionError::InvalidHoursWorked {
                hours_worked,
                scheduled: task.hours,
            });
        }

        let key = task.key();
        if self.completed.contains_key(&key) {
            return Err(SessionError::AlreadyCompleted(key));
        }

        let mut project = self
            .repo
            .get_project(task.project.id)?
            .ok_or(SessionError::ProjectNotFound(task.project.id))?;
        project.remaining_hours = (project.remaining_hours - hours_worked).max(0.0);
        self.repo
            .update_remaining_hours(project.id, project.remaining_hours)?;

        self.completed.insert(key, task.clone());
        info!(
            "event=task_complete module=service status=ok project_id={} date={} hours_worked={} remaining_hours={}",
            project.id, task.date, hours_worked, project.remaining_hours
        );
        Ok(project)
    }

    pub fn is_completed(&self, key: &TaskKey) -> bool {
        self.completed.contains_key(key)
    }

    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.completed.values()
    }
}
