//! Command-line definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// dailyplan - how many hours to spend on which project today
#[derive(Debug, Parser)]
#[command(name = "dailyplan", version)]
pub struct Cli {
    /// Project store location
    #[arg(long, global = true, env = "DAILYPLAN_DB")]
    pub db: Option<PathBuf>,

    /// Plan as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, env = "DAILYPLAN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "DAILYPLAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Hours one business day can hold
    #[arg(long, global = true, default_value_t = 8.0)]
    pub capacity: f64,

    /// Smallest chunk worth scheduling, in hours
    #[arg(long, global = true, default_value_t = 2.0)]
    pub min_chunk: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new project
    Add {
        #[arg(long)]
        name: String,

        /// Last day to work on it (YYYY-MM-DD, weekday)
        #[arg(long)]
        due: NaiveDate,

        /// Total effort in hours
        #[arg(long)]
        hours: f64,
    },

    /// List projects
    List {
        /// Include projects whose due date has passed
        #[arg(long)]
        all: bool,
    },

    /// Show today's checklist
    Today,

    /// Show the schedule for the coming days
    Plan {
        /// Number of calendar days to show
        #[arg(long, default_value_t = 7)]
        days: u64,
    },

    /// Record hours worked on today's chunk of a project
    Complete {
        project_id: Uuid,

        /// Hours worked; defaults to the full chunk
        #[arg(long)]
        hours: Option<f64>,
    },

    /// Delete a project
    Delete { project_id: Uuid },

    /// Print the core library version
    Version,
}
