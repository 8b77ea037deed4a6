//! Planner use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and allocation into use-case APIs.
//! - Keep the CLI decoupled from storage details.

pub mod agenda;
pub mod planning_session;
pub mod project_service;
