//! End-to-end board flows over [`InMemoryRecordStore`].

use crate::in_memory::helpers::{open_board, record, runtime, seed_workspace, store};
use rstest::rstest;
use serde_json::json;
use std::io;
use taskboard::{
    board::{
        adapters::memory::InMemoryRecordStore,
        domain::{BoardSnapshot, DropEvent, ProjectId, Task, TaskId, TaskStatus},
        ports::CreateOutcome,
        services::MoveOutcome,
    },
    config::BoardConfig,
};
use tokio::runtime::Runtime;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}

#[rstest]
fn opening_the_board_selects_first_project_by_name(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
) -> TestResult {
    let rt = runtime?;
    seed_workspace(&store)?;
    let board = open_board(&store, "V", BoardConfig::default())?;

    rt.block_on(board.session.start())?;

    let projects = board.session.projects();
    let names: Vec<&str> = projects.iter().map(|p| p.name()).collect();
    assert_eq!(names, ["apollo", "Borealis"]);
    let state = board.session.board();
    assert_eq!(ids(state.tasks_for_status(&TaskStatus::NotStarted)), ["T1", "T3"]);
    assert_eq!(ids(state.tasks_for_status(&TaskStatus::InProgress)), ["T2"]);
    assert!(state.tasks_for_status(&TaskStatus::Completed).is_empty());
    assert_eq!(board.view.last_rendered(), Some(state));
    Ok(())
}

#[rstest]
fn confirmed_move_is_written_through(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
) -> TestResult {
    let rt = runtime?;
    seed_workspace(&store)?;
    let board = open_board(&store, "V", BoardConfig::default())?;
    rt.block_on(board.session.start())?;

    let outcome = rt.block_on(board.session.handle_drop(&DropEvent::new("T1", "1", "3")));

    assert!(matches!(
        outcome,
        MoveOutcome::Confirmed { status: TaskStatus::Completed, .. }
    ));
    let stored = store
        .get("project_tasks", "T1")
        .ok_or("task record missing")?;
    assert_eq!(stored.get("status"), Some(&json!(3)));
    assert_ne!(stored.get("modified_on"), Some(&json!("2026-03-01T09:00:00Z")));
    assert_eq!(store.update_calls(), 1);
    assert_eq!(board.session.reconciler().pending_writes(), 0);

    rt.block_on(board.session.select_project(&ProjectId::new("P1")))?;
    let reloaded = board.session.board();
    assert_eq!(ids(reloaded.tasks_for_status(&TaskStatus::Completed)), ["T1"]);
    assert_eq!(ids(reloaded.tasks_for_status(&TaskStatus::NotStarted)), ["T3"]);
    Ok(())
}

#[rstest]
fn rejected_move_restores_original_position(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
) -> TestResult {
    let rt = runtime?;
    seed_workspace(&store)?;
    let board = open_board(&store, "V", BoardConfig::default())?;
    rt.block_on(board.session.start())?;
    let before = board.session.board();
    store.fail_updates_for("T1", "status transition not allowed");

    let outcome = rt.block_on(board.session.handle_drop(&DropEvent::new("T1", "1", "2")));

    assert!(matches!(outcome, MoveOutcome::RolledBack { .. }));
    assert_eq!(board.session.board(), before);
    let notices = board.view.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(
        notices.first().map(|notice| notice.message.as_str()),
        Some("Failed to update status. Please try again.")
    );
    let stored = store
        .get("project_tasks", "T1")
        .ok_or("task record missing")?;
    assert_eq!(stored.get("status"), Some(&json!(1)));
    Ok(())
}

#[rstest]
fn switching_projects_replaces_the_board(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
) -> TestResult {
    let rt = runtime?;
    seed_workspace(&store)?;
    let board = open_board(&store, "V", BoardConfig::default())?;
    rt.block_on(board.session.start())?;

    rt.block_on(board.session.select_project(&ProjectId::new("P2")))?;

    let state = board.session.board();
    assert_eq!(state.len(), 1);
    assert_eq!(ids(state.tasks_for_status(&TaskStatus::Completed)), ["T9"]);
    let active = board.session.active_project();
    assert_eq!(active.as_ref().map(|p| p.name()), Some("Borealis"));
    assert_eq!(board.view.render_count(), 2);
    Ok(())
}

#[rstest]
fn created_task_appears_after_reload(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
) -> TestResult {
    let rt = runtime?;
    seed_workspace(&store)?;
    let board = open_board(&store, "V", BoardConfig::default())?;
    rt.block_on(board.session.start())?;
    store.insert(
        "project_tasks",
        record(json!({
            "task_id": "T4",
            "task_name": "Write release notes",
            "status": 4,
            "project_id": "P1",
            "modified_on": "2026-04-01T09:00:00Z",
        })),
    )?;
    board
        .creator
        .push_result(Ok(CreateOutcome::Created(TaskId::new("T4"))));

    let outcome = rt.block_on(board.session.create_task(TaskStatus::InReview))?;

    assert_eq!(outcome, CreateOutcome::Created(TaskId::new("T4")));
    let state = board.session.board();
    assert_eq!(ids(state.tasks_for_status(&TaskStatus::InReview)), ["T4"]);
    Ok(())
}

#[rstest]
fn snapshot_lists_columns_with_links(
    runtime: io::Result<Runtime>,
    store: InMemoryRecordStore,
) -> TestResult {
    let rt = runtime?;
    seed_workspace(&store)?;
    let config = BoardConfig {
        client_url: Some("https://org.example.com/".to_owned()),
        ..BoardConfig::default()
    };
    let board = open_board(&store, "V", config.clone())?;
    rt.block_on(board.session.start())?;

    let snapshot = BoardSnapshot::from_board(&board.session.board(), &config);

    let labels: Vec<&str> = snapshot
        .columns
        .iter()
        .filter_map(|column| column.label)
        .collect();
    assert_eq!(labels, ["Not Started", "In Progress", "In Review", "Completed"]);
    let not_started = snapshot
        .column(&TaskStatus::NotStarted)
        .ok_or("missing column")?;
    assert_eq!(not_started.task_ids(), ["T1", "T3"]);
    assert_eq!(
        not_started.cards.first().and_then(|card| card.link.as_deref()),
        Some(
            "https://org.example.com/main.aspx?etn=project_tasks&pagetype=entityrecord&id=T1"
        )
    );
    Ok(())
}
