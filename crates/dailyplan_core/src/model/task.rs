//! Allocation chunk model.
//!
//! # Responsibility
//! - Describe one day's worth of allocated effort toward one project.
//! - Carry a read-only project snapshot so display code never re-joins
//!   against the live project list.
//!
//! # Invariants
//! - `hours > 0` for every chunk produced by the allocator.
//! - `id` is unique per chunk but not stable across allocation runs.

use crate::model::project::{Project, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-run chunk identifier.
pub type TaskId = Uuid;

/// Project fields copied at allocation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: ProjectId,
    pub name: String,
    pub due_date: NaiveDate,
}

impl ProjectSnapshot {
    pub fn of(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            due_date: project.due_date,
        }
    }
}

/// Stable logical identity of a chunk: one project on one day.
///
/// Use this, never [`TaskId`], to compare or deduplicate chunks from
/// different allocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskKey {
    pub project_id: ProjectId,
    pub date: NaiveDate,
}

/// One day-stamped work chunk for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project: ProjectSnapshot,
    /// The single calendar day this chunk is scheduled on.
    pub date: NaiveDate,
    pub hours: f64,
}

impl Task {
    /// Creates a chunk with a fresh per-run id.
    pub fn new(project: ProjectSnapshot, date: NaiveDate, hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            project,
            date,
            hours,
        }
    }

    pub fn key(&self) -> TaskKey {
        TaskKey {
            project_id: self.project.id,
            date: self.date,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project.id
    }
}
