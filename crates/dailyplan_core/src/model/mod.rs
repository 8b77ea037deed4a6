//! Planner domain model.
//!
//! # Responsibility
//! - Define the project records owned by persistence.
//! - Define the transient task chunks produced by the allocator.
//!
//! # Invariants
//! - Every project is identified by a stable, non-nil `ProjectId`.
//! - Task ids are regenerated on every allocation run; `TaskKey` is the only
//!   stable identity of a chunk across runs.

pub mod project;
pub mod task;
