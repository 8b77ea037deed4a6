//! Daily agenda projection.
//!
//! # Responsibility
//! - Filter an allocation run down to one day's chunks.
//! - Merge in chunks already completed this session for that day.
//!
//! # Invariants
//! - Planned chunks come first, in allocation order.
//! - A logical chunk (`TaskKey`) appears at most once.
//! - A completed chunk is shown as completed, never as its re-planned
//!   successor for the same key.

use crate::calendar::is_weekend;
use crate::model::task::{Task, TaskKey};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub task: Task,
    pub completed: bool,
}

/// Checklist for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAgenda {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub entries: Vec<AgendaEntry>,
}

impl DailyAgenda {
    /// Builds the checklist for `date` from a run's chunks and the
    /// session's completed chunks.
    pub fn build(date: NaiveDate, tasks: &[Task], completed: &BTreeMap<TaskKey, Task>) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<AgendaEntry> = tasks
            .iter()
            .filter(|task| task.date == date)
            .filter(|task| seen.insert(task.key()))
            .map(|task| match completed.get(&task.key()) {
                Some(done) => AgendaEntry {
                    task: done.clone(),
                    completed: true,
                },
                None => AgendaEntry {
                    task: task.clone(),
                    completed: false,
                },
            })
            .collect();

        entries.extend(
            completed
                .values()
                .filter(|task| task.date == date && !seen.contains(&task.key()))
                .map(|task| AgendaEntry {
                    task: task.clone(),
                    completed: true,
                }),
        );

        Self {
            date,
            is_weekend: is_weekend(date),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hours across all entries, completed or not.
    pub fn planned_hours(&self) -> f64 {
        self.entries.iter().map(|entry| entry.task.hours).sum()
    }

    pub fn open_entries(&self) -> impl Iterator<Item = &AgendaEntry> {
        self.entries.iter().filter(|entry| !entry.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::DailyAgenda;
    use crate::model::task::{ProjectSnapshot, Task};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn snapshot(seq: u128) -> ProjectSnapshot {
        ProjectSnapshot {
            id: Uuid::from_u128(seq),
            name: format!("project-{seq}"),
            due_date: monday(),
        }
    }

    #[test]
    fn completed_chunk_wins_over_replanned_chunk_with_same_key() {
        let worked = Task::new(snapshot(1), monday(), 4.0);
        let replanned = Task::new(snapshot(1), monday(), 2.0);
        let other = Task::new(snapshot(2), monday(), 3.0);
        let completed = BTreeMap::from([(worked.key(), worked.clone())]);

        let agenda = DailyAgenda::build(monday(), &[replanned, other.clone()], &completed);

        assert_eq!(agenda.entries.len(), 2);
        assert_eq!(agenda.entries[0].task, worked);
        assert!(agenda.entries[0].completed);
        assert_eq!(agenda.entries[1].task, other);
        assert!(!agenda.entries[1].completed);
        assert_eq!(agenda.planned_hours(), 7.0);
    }
}
