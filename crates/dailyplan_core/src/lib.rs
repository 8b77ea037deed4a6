//! Core logic for dailyplan, a deadline-driven daily work planner.
//!
//! Projects carry an effort budget and a due date; the allocator turns them
//! into day-stamped work chunks, earliest deadline first, within a fixed
//! daily capacity.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod planner;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId, ProjectValidationError};
pub use model::task::{ProjectSnapshot, Task, TaskId, TaskKey};
pub use planner::allocator::{
    allocate, sort_date_major, AllocationPlan, AllocationWarning, DailyAllocator,
};
pub use planner::config::{AllocatorConfig, ConfigError};
pub use planner::ledger::CapacityLedger;
pub use repo::project_repo::{
    ProjectListQuery, ProjectRepository, RepoError, RepoResult, SqliteProjectRepository,
};
pub use service::agenda::{AgendaEntry, DailyAgenda};
pub use service::planning_session::{PlanningSession, SessionError};
pub use service::project_service::{NewProject, ProjectService, ProjectServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
