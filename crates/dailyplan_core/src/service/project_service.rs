//! Project intake use-case service.
//!
//! # Responsibility
//! - Reject invalid project input before it reaches storage or allocation.
//! - Expose create/delete/list entry points over a project repository.
//!
//! # Invariants
//! - Created projects start with `remaining_hours == total_hours`.
//! - Due dates are weekdays on or after the intake day.
//! - Names are stored trimmed.

use crate::calendar::{is_weekend, next_weekday};
use crate::model::project::{Project, ProjectId};
use crate::planner::config::DEFAULT_MIN_CHUNK_HOURS;
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository, RepoError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from project intake operations.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Name is blank after trim.
    BlankName,
    /// Hours are not a finite number.
    InvalidHours(f64),
    /// Budget is below the smallest schedulable chunk.
    BelowMinimumHours { hours: f64, minimum: f64 },
    /// Due date already passed.
    DueDateInPast { due_date: NaiveDate, today: NaiveDate },
    /// Due date is a Saturday or Sunday.
    DueDateOnWeekend {
        due_date: NaiveDate,
        suggested: NaiveDate,
    },
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "project name is required"),
            Self::InvalidHours(hours) => write!(f, "hours must be a finite number, got {hours}"),
            Self::BelowMinimumHours { hours, minimum } => {
                write!(f, "minimum hours is {minimum}, got {hours}")
            }
            Self::DueDateInPast { due_date, today } => {
                write!(f, "due date {due_date} is before today ({today})")
            }
            Self::DueDateOnWeekend {
                due_date,
                suggested,
            } => write!(
                f,
                "due date {due_date} falls on a weekend; try {suggested}"
            ),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for registering a project.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub due_date: NaiveDate,
    pub total_hours: f64,
}

/// Project intake facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
    min_hours: f64,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service enforcing the default 2h minimum budget.
    pub fn new(repo: R) -> Self {
        Self::with_min_hours(repo, DEFAULT_MIN_CHUNK_HOURS)
    }

    /// Creates a service with a custom minimum budget, usually the
    /// allocator's minimum chunk size.
    pub fn with_min_hours(repo: R, min_hours: f64) -> Self {
        Self { repo, min_hours }
    }

    /// Validates and stores a new project.
    ///
    /// # Errors
    /// - `BlankName`, `InvalidHours`, `BelowMinimumHours` for bad input.
    /// - `DueDateInPast` when `due_date < today`.
    /// - `DueDateOnWeekend` with the next weekday as suggestion.
    /// - `Repo` for storage failures.
    pub fn add_project(
        &self,
        request: &NewProject,
        today: NaiveDate,
    ) -> Result<Project, ProjectServiceError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ProjectServiceError::BlankName);
        }
        if !request.total_hours.is_finite() {
            return Err(ProjectServiceError::InvalidHours(request.total_hours));
        }
        if request.total_hours < self.min_hours {
            return Err(ProjectServiceError::BelowMinimumHours {
                hours: request.total_hours,
                minimum: self.min_hours,
            });
        }
        if request.due_date < today {
            return Err(ProjectServiceError::DueDateInPast {
                due_date: request.due_date,
                today,
            });
        }
        if is_weekend(request.due_date) {
            return Err(ProjectServiceError::DueDateOnWeekend {
                due_date: request.due_date,
                suggested: next_weekday(request.due_date),
            });
        }

        let project = Project::new(name, request.due_date, request.total_hours);
        self.repo.create_project(&project)?;
        info!(
            "event=project_add module=service status=ok project_id={} due_date={} total_hours={}",
            project.id, project.due_date, project.total_hours
        );
        Ok(project)
    }

    pub fn get_project(&self, id: ProjectId) -> Result<Project, ProjectServiceError> {
        self.repo
            .get_project(id)?
            .ok_or(ProjectServiceError::ProjectNotFound(id))
    }

    /// Projects still due today or later, earliest due first.
    pub fn active_projects(&self, today: NaiveDate) -> Result<Vec<Project>, ProjectServiceError> {
        Ok(self.repo.list_projects(&ProjectListQuery::active_on(today))?)
    }

    /// Every stored project, expired ones included.
    pub fn all_projects(&self) -> Result<Vec<Project>, ProjectServiceError> {
        Ok(self.repo.list_projects(&ProjectListQuery::default())?)
    }

    pub fn delete_project(&self, id: ProjectId) -> Result<(), ProjectServiceError> {
        self.repo.delete_project(id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }
}
