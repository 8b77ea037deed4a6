use chrono::NaiveDate;
use dailyplan_core::db::open_db_in_memory;
use dailyplan_core::{
    DailyAllocator, NewProject, PlanningSession, ProjectRepository, ProjectService,
    ProjectServiceError, SessionError, SqliteProjectRepository,
};
use uuid::Uuid;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

// 2024-06-03 is a Monday.
fn monday() -> NaiveDate {
    date(3)
}

fn new_project(name: &str, due_date: NaiveDate, total_hours: f64) -> NewProject {
    NewProject {
        name: name.to_string(),
        due_date,
        total_hours,
    }
}

#[test]
fn add_project_trims_name_and_starts_full() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::new(&conn));

    let project = service
        .add_project(&new_project("  thesis  ", date(7), 10.0), monday())
        .unwrap();

    assert_eq!(project.name, "thesis");
    assert_eq!(project.remaining_hours, 10.0);
    assert_eq!(service.get_project(project.id).unwrap(), project);
}

#[test]
fn add_project_rejects_invalid_input() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::new(&conn));

    let err = service
        .add_project(&new_project(" ", date(7), 10.0), monday())
        .unwrap_err();
    assert!(matches!(err, ProjectServiceError::BlankName));

    let err = service
        .add_project(&new_project("x", date(7), 1.5), monday())
        .unwrap_err();
    assert!(matches!(
        err,
        ProjectServiceError::BelowMinimumHours { minimum, .. } if minimum == 2.0
    ));

    let err = service
        .add_project(&new_project("x", date(7), f64::NAN), monday())
        .unwrap_err();
    assert!(matches!(err, ProjectServiceError::InvalidHours(_)));

    let err = service
        .add_project(&new_project("x", monday(), 4.0), date(4))
        .unwrap_err();
    assert!(matches!(err, ProjectServiceError::DueDateInPast { .. }));

    let saturday = date(8);
    let err = service
        .add_project(&new_project("x", saturday, 4.0), monday())
        .unwrap_err();
    match err {
        ProjectServiceError::DueDateOnWeekend { suggested, .. } => {
            assert_eq!(suggested, date(10));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(service.all_projects().unwrap().is_empty());
}

#[test]
fn active_projects_drop_expired_ones() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::new(&conn));

    let expiring = service
        .add_project(&new_project("old", monday(), 4.0), monday())
        .unwrap();
    let upcoming = service
        .add_project(&new_project("new", date(7), 4.0), monday())
        .unwrap();

    let tuesday = date(4);
    let active = service.active_projects(tuesday).unwrap();
    assert_eq!(active, vec![upcoming.clone()]);
    assert_eq!(service.all_projects().unwrap().len(), 2);

    service.delete_project(expiring.id).unwrap();
    let err = service.delete_project(expiring.id).unwrap_err();
    assert!(matches!(err, ProjectServiceError::ProjectNotFound(id) if id == expiring.id));
}

#[test]
fn agenda_lists_todays_chunks_earliest_deadline_first() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let later = projects
        .add_project(&new_project("later", date(7), 6.0), monday())
        .unwrap();
    let sooner = projects
        .add_project(&new_project("sooner", monday(), 6.0), monday())
        .unwrap();

    let session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let agenda = session.agenda(monday()).unwrap();

    assert!(!agenda.is_weekend);
    let rows: Vec<(Uuid, f64, bool)> = agenda
        .entries
        .iter()
        .map(|entry| (entry.task.project.id, entry.task.hours, entry.completed))
        .collect();
    assert_eq!(rows, vec![(sooner.id, 6.0, false), (later.id, 2.0, false)]);
    assert_eq!(agenda.planned_hours(), 8.0);
}

#[test]
fn weekend_agenda_is_empty_and_flagged() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    projects
        .add_project(&new_project("report", date(7), 6.0), monday())
        .unwrap();

    let session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let saturday = date(8);
    let agenda = session.agenda(saturday).unwrap();

    assert!(agenda.is_weekend);
    assert!(agenda.is_empty());
}

#[test]
fn completing_a_task_decrements_project_and_marks_it_done() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let project = projects
        .add_project(&new_project("thesis", date(5), 10.0), monday())
        .unwrap();

    let mut session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let task = session
        .task_for_project(project.id, monday())
        .unwrap()
        .unwrap();
    assert_eq!(task.hours, 4.0);

    let updated = session.complete_task(&task, 4.0).unwrap();
    assert_eq!(updated.remaining_hours, 6.0);
    assert!(session.is_completed(&task.key()));

    let stored = SqliteProjectRepository::new(&conn)
        .get_project(project.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.remaining_hours, 6.0);

    // Today's re-planned chunk shares the key; the worked chunk is shown.
    let agenda = session.agenda(monday()).unwrap();
    assert_eq!(agenda.entries.len(), 1);
    assert!(agenda.entries[0].completed);
    assert_eq!(agenda.entries[0].task.hours, 4.0);
    assert_eq!(agenda.entries[0].task.id, task.id);
    assert_eq!(agenda.planned_hours(), 4.0);
    assert_eq!(agenda.open_entries().count(), 0);

    let err = session.complete_task(&task, 1.0).unwrap_err();
    assert!(matches!(err, SessionError::AlreadyCompleted(key) if key == task.key()));
}

#[test]
fn completed_chunk_stays_visible_after_project_finishes() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let project = projects
        .add_project(&new_project("small", date(7), 3.0), monday())
        .unwrap();

    let mut session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let task = session
        .task_for_project(project.id, monday())
        .unwrap()
        .unwrap();
    assert_eq!(task.hours, 2.0);
    session.complete_task(&task, 2.0).unwrap();

    // Finish the rest out of band so no chunk is planned for today.
    SqliteProjectRepository::new(&conn)
        .update_remaining_hours(project.id, 0.0)
        .unwrap();

    let agenda = session.agenda(monday()).unwrap();
    assert_eq!(agenda.entries.len(), 1);
    assert_eq!(agenda.entries[0].task.key(), task.key());
    assert!(agenda.entries[0].completed);
    assert_eq!(session.completed_tasks().count(), 1);
}

#[test]
fn complete_task_validates_hours_worked() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let project = projects
        .add_project(&new_project("thesis", date(5), 10.0), monday())
        .unwrap();

    let mut session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let task = session
        .task_for_project(project.id, monday())
        .unwrap()
        .unwrap();

    let err = session.complete_task(&task, 0.0).unwrap_err();
    assert!(matches!(err, SessionError::InvalidHoursWorked { .. }));
    assert!(err.to_string().contains("greater than 0"));

    let err = session.complete_task(&task, 4.5).unwrap_err();
    assert!(err.to_string().contains("maximum hours for this task is 4"));

    assert!(!session.is_completed(&task.key()));
    let stored = SqliteProjectRepository::new(&conn)
        .get_project(project.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.remaining_hours, 10.0);
}

#[test]
fn partial_completion_clamps_and_replans() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let project = projects
        .add_project(&new_project("thesis", date(5), 10.0), monday())
        .unwrap();

    let mut session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let task = session
        .task_for_project(project.id, monday())
        .unwrap()
        .unwrap();
    let updated = session.complete_task(&task, 2.5).unwrap();
    assert_eq!(updated.remaining_hours, 7.5);

    let tuesday = date(4);
    let plan = session.plan(tuesday).unwrap();
    assert_eq!(plan.hours_for(project.id), 7.5);
    assert!(plan.tasks.iter().all(|task| task.date >= tuesday));
}

#[test]
fn completing_a_task_of_a_deleted_project_fails() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let project = projects
        .add_project(&new_project("gone", date(5), 4.0), monday())
        .unwrap();

    let mut session = PlanningSession::new(
        SqliteProjectRepository::new(&conn),
        DailyAllocator::default(),
    );
    let task = session
        .task_for_project(project.id, monday())
        .unwrap()
        .unwrap();
    projects.delete_project(project.id).unwrap();

    let err = session.complete_task(&task, 1.0).unwrap_err();
    assert!(matches!(err, SessionError::ProjectNotFound(id) if id == project.id));
}
