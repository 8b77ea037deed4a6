//! Daily allocation engine.
//!
//! # Responsibility
//! - Turn a project list into per-day, per-project work chunks.
//! - Partition each business day's capacity earliest-deadline-first.
//!
//! # Invariants
//! - Allocation is pure: no I/O, no state shared between calls.
//! - No chunk is ever placed on a weekend.
//! - Per run, a day's chunks never exceed its capacity and a project's
//!   chunks never exceed its remaining effort.

pub mod allocator;
pub mod config;
pub mod ledger;
