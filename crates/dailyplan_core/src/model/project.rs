//! Project domain model.
//!
//! # Responsibility
//! - Define the effort-budgeted, deadline-bound unit of work users register.
//! - Enforce record-level invariants before persistence or allocation.
//!
//! # Invariants
//! - `id` is non-nil and never reused for another project.
//! - `total_hours` is finite and strictly positive.
//! - `0 <= remaining_hours <= total_hours`.
//! - `name` is not blank.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Record-level validation failure for [`Project`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectValidationError {
    NilId,
    BlankName,
    NonFiniteHours,
    NonPositiveTotalHours(f64),
    RemainingOutOfRange { remaining: f64, total: f64 },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "project id must not be nil"),
            Self::BlankName => write!(f, "project name must not be blank"),
            Self::NonFiniteHours => write!(f, "project hours must be finite numbers"),
            Self::NonPositiveTotalHours(total) => {
                write!(f, "total_hours ({total}) must be > 0")
            }
            Self::RemainingOutOfRange { remaining, total } => write!(
                f,
                "remaining_hours ({remaining}) must be within 0..={total}"
            ),
        }
    }
}

impl Error for ProjectValidationError {}

/// A tracked unit of work with an effort budget and a due date.
///
/// The allocator treats projects as read-only input. Only completion
/// tracking changes `remaining_hours`, through the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Last calendar day work may be scheduled on.
    pub due_date: NaiveDate,
    /// Original effort budget in hours.
    pub total_hours: f64,
    /// Effort not yet completed, in hours.
    pub remaining_hours: f64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Creates a fresh project with a generated id and untouched budget.
    ///
    /// Does not validate; callers persisting the value go through
    /// [`Project::validate`] on the write path.
    pub fn new(name: impl Into<String>, due_date: NaiveDate, total_hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            due_date,
            total_hours,
            remaining_hours: total_hours,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Creates a project with a caller-provided id and validates it.
    ///
    /// Used by read-back and import paths where identity already exists.
    pub fn with_id(
        id: ProjectId,
        name: impl Into<String>,
        due_date: NaiveDate,
        total_hours: f64,
        remaining_hours: f64,
        created_at: i64,
    ) -> Result<Self, ProjectValidationError> {
        let project = Self {
            id,
            name: name.into(),
            due_date,
            total_hours,
            remaining_hours,
            created_at,
        };
        project.validate()?;
        Ok(project)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.is_nil() {
            return Err(ProjectValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::BlankName);
        }
        if !self.total_hours.is_finite() || !self.remaining_hours.is_finite() {
            return Err(ProjectValidationError::NonFiniteHours);
        }
        if self.total_hours <= 0.0 {
            return Err(ProjectValidationError::NonPositiveTotalHours(
                self.total_hours,
            ));
        }
        if self.remaining_hours < 0.0 || self.remaining_hours > self.total_hours {
            return Err(ProjectValidationError::RemainingOutOfRange {
                remaining: self.remaining_hours,
                total: self.total_hours,
            });
        }
        Ok(())
    }

    /// Hours already worked against the budget.
    pub fn completed_hours(&self) -> f64 {
        self.total_hours - self.remaining_hours
    }

    /// Returns whether no effort is left.
    pub fn is_finished(&self) -> bool {
        self.remaining_hours <= 0.0
    }

    /// Returns whether the due date is already behind `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }
}

#[derive(Deserialize)]
struct ProjectRecord {
    id: ProjectId,
    name: String,
    due_date: NaiveDate,
    total_hours: f64,
    remaining_hours: f64,
    created_at: i64,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ProjectValidationError;

    fn try_from(value: ProjectRecord) -> Result<Self, Self::Error> {
        Project::with_id(
            value.id,
            value.name,
            value.due_date,
            value.total_hours,
            value.remaining_hours,
            value.created_at,
        )
    }
}
