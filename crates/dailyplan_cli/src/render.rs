//! Plain-text rendering for terminal output.

use chrono::NaiveDate;
use dailyplan_core::{AllocationPlan, DailyAgenda, Project};
use std::fmt::Write;

pub fn hours(value: f64) -> String {
    format!("{value}h")
}

pub fn projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet. Add your first project!\n".to_string();
    }

    let mut out = String::new();
    for project in projects {
        let _ = writeln!(
            out,
            "{}  {:<24} {}  {}/{}",
            project.id,
            project.name,
            project.due_date.format("%d %b"),
            hours(project.remaining_hours),
            hours(project.total_hours)
        );
    }
    out
}

pub fn agenda(agenda: &DailyAgenda) -> String {
    let mut out = format!("{}\n", agenda.date.format("%A, %B %-d"));
    if agenda.is_weekend {
        out.push_str("Weekend! No tasks scheduled. Enjoy your time off!\n");
        return out;
    }
    if agenda.is_empty() {
        out.push_str("No tasks scheduled for today.\n");
        return out;
    }

    for entry in &agenda.entries {
        let mark = if entry.completed { "x" } else { " " };
        let _ = writeln!(
            out,
            "[{mark}] {:<24} {:>6}  ({})",
            entry.task.project.name,
            hours(entry.task.hours),
            entry.task.project.id
        );
    }
    let _ = writeln!(out, "total {}", hours(agenda.planned_hours()));
    out
}

pub fn plan(plan: &AllocationPlan, from: NaiveDate, days: u64) -> String {
    let mut out = String::new();
    let mut tasks = plan.tasks.clone();
    dailyplan_core::sort_date_major(&mut tasks);

    for task in tasks
        .iter()
        .filter(|task| task.date >= from)
        .filter(|task| (task.date - from).num_days() < days as i64)
    {
        let _ = writeln!(
            out,
            "{}  {:<24} {:>6}",
            task.date.format("%a %Y-%m-%d"),
            task.project.name,
            hours(task.hours)
        );
    }
    if out.is_empty() {
        out.push_str("Nothing scheduled.\n");
    }
    for warning in &plan.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}
