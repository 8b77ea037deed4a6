//! Repository layer for the project store.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from services.
//!
//! # Invariants
//! - Writes enforce `Project::validate()` before persistence.
//! - Missing rows surface as `RepoError::NotFound`, not as silent no-ops.

pub mod project_repo;
