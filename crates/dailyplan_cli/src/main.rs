//! dailyplan command-line entry point.
//!
//! # Responsibility
//! - Wire CLI flags into core configuration, storage and services.
//! - Render results as plain text; map failures to a non-zero exit code.

mod cli;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use dailyplan_core::calendar::today_local;
use dailyplan_core::db::open_db;
use dailyplan_core::{
    core_version, default_log_level, init_logging, AllocatorConfig, DailyAllocator, NewProject,
    PlanningSession, ProjectService, SqliteProjectRepository,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DB_FILE_NAME: &str = "dailyplan.sqlite3";

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Command::Version = cli.command {
        println!("dailyplan_core {}", core_version());
        return Ok(());
    }

    let allocator = DailyAllocator::new(AllocatorConfig {
        daily_capacity_hours: cli.capacity,
        min_chunk_hours: cli.min_chunk,
    })?;
    let today = cli.today.unwrap_or_else(today_local);
    let db_path = resolve_db_path(cli.db);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_db(&db_path)?;

    let projects =
        ProjectService::with_min_hours(SqliteProjectRepository::new(&conn), cli.min_chunk);
    let mut session = PlanningSession::new(SqliteProjectRepository::new(&conn), allocator);

    match cli.command {
        Command::Add { name, due, hours } => {
            let project = projects.add_project(
                &NewProject {
                    name,
                    due_date: due,
                    total_hours: hours,
                },
                today,
            )?;
            println!("added {} ({})", project.name, project.id);
        }
        Command::List { all } => {
            let items = if all {
                projects.all_projects()?
            } else {
                projects.active_projects(today)?
            };
            print!("{}", render::projects(&items));
        }
        Command::Today => {
            print!("{}", render::agenda(&session.agenda(today)?));
        }
        Command::Plan { days } => {
            print!("{}", render::plan(&session.plan(today)?, today, days));
        }
        Command::Complete { project_id, hours } => {
            let task = session
                .task_for_project(project_id, today)?
                .ok_or_else(|| format!("no task scheduled today for project {project_id}"))?;
            let worked = hours.unwrap_or(task.hours);
            let project = session.complete_task(&task, worked)?;
            println!(
                "logged {} on {}; {} left",
                render::hours(worked),
                project.name,
                render::hours(project.remaining_hours)
            );
            print!("{}", render::agenda(&session.agenda(today)?));
        }
        Command::Delete { project_id } => {
            projects.delete_project(project_id)?;
            println!("deleted {project_id}");
        }
        Command::Version => {}
    }

    Ok(())
}

fn setup_logging(cli: &Cli) {
    let Some(log_dir) = cli.log_dir.as_ref() else {
        return;
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dailyplan")
            .join(DB_FILE_NAME)
    })
}
