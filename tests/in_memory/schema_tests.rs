//! Boards over store layouts named through [`BoardConfig`].

use crate::in_memory::helpers::{open_board, record, runtime};
use rstest::{fixture, rstest};
use serde_json::json;
use std::io;
use taskboard::{
    board::{
        adapters::memory::InMemoryRecordStore,
        domain::{DropEvent, TaskStatus},
        services::MoveOutcome,
    },
    config::{BoardConfig, ConfigError, ProjectOrdering},
};
use tokio::runtime::Runtime;

const PROJECT_GUID: &str = "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f";

#[fixture]
fn config() -> BoardConfig {
    BoardConfig::from_json_str(
        r#"{
            "project_ordering": "store_order",
            "write_failure_notice": "Could not save the new status.",
            "schema": {
                "resource_collection": "bookableresources",
                "resource_id_field": "bookableresourceid",
                "resource_viewer_field": "_userid_value",
                "membership_collection": "msdyn_projectteams",
                "membership_resource_field": "_msdyn_bookableresourceid_value",
                "membership_project_field": "_msdyn_project_value",
                "project_collection": "msdyn_projects",
                "project_id_field": "msdyn_projectid",
                "project_name_field": "msdyn_subject",
                "task_collection": "cr_projecttasks",
                "task_id_field": "cr_projecttaskid",
                "task_name_field": "cr_name",
                "task_status_field": "cr_status",
                "task_project_field": "_cr_project_value",
                "task_assignee_field": "_createdby_value",
                "task_reference_field": "cr_reference",
                "task_modified_field": "modifiedon"
            }
        }"#,
    )
    .expect("valid board config")
}

fn seed(store: &InMemoryRecordStore) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    store.insert(
        "bookableresources",
        record(json!({"bookableresourceid": "res-1", "_userid_value": "viewer-1"})),
    )?;
    store.insert(
        "msdyn_projectteams",
        record(json!({
            "_msdyn_bookableresourceid_value": "res-1",
            "_msdyn_project_value": PROJECT_GUID,
        })),
    )?;
    store.insert(
        "msdyn_projects",
        record(json!({"msdyn_projectid": PROJECT_GUID, "msdyn_subject": "Website relaunch"})),
    )?;
    store.insert(
        "cr_projecttasks",
        record(json!({
            "cr_projecttaskid": "task-1",
            "cr_name": "Draft sitemap",
            "cr_reference": "WEB-7",
            "cr_status": 2,
            "_cr_project_value": PROJECT_GUID,
            "_createdby_value": "user-1",
            "_createdby_value@OData.Community.Display.V1.FormattedValue": "Grace Hopper",
            "modifiedon": "2026-05-01T12:00:00Z",
        })),
    )?;
    Ok(())
}

#[rstest]
fn config_document_overrides_defaults(config: BoardConfig) {
    assert_eq!(config.project_ordering, ProjectOrdering::StoreOrder);
    assert_eq!(config.schema.task_collection, "cr_projecttasks");
    assert_eq!(
        config.schema.formatted_value_suffix,
        "@OData.Community.Display.V1.FormattedValue"
    );
}

#[rstest]
fn custom_schema_drives_the_whole_board(
    runtime: io::Result<Runtime>,
    config: BoardConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let store = InMemoryRecordStore::new(&config.schema);
    seed(&store)?;
    let board = open_board(&store, "{viewer-1}", config)?;

    rt.block_on(board.session.start())?;

    let state = board.session.board();
    let in_progress = state.tasks_for_status(&TaskStatus::InProgress);
    let task = in_progress.first().ok_or("task not loaded")?;
    assert_eq!(task.title(), "WEB-7 - Draft sitemap");
    assert_eq!(task.assignee(), Some("Grace Hopper"));

    store.fail_updates_for("task-1", "locked");
    let outcome = rt.block_on(board.session.handle_drop(&DropEvent::new("task-1", "2", "3")));

    assert!(matches!(outcome, MoveOutcome::RolledBack { .. }));
    let notices = board.view.notices();
    assert_eq!(
        notices.first().map(|notice| notice.message.as_str()),
        Some("Could not save the new status.")
    );
    Ok(())
}

#[rstest]
#[case(r#"{"schema": {"task_status_field": "  "}}"#)]
#[case(r#"{"schema": {"task_collection": ""}}"#)]
fn empty_names_are_rejected(#[case] document: &str) {
    assert!(matches!(
        BoardConfig::from_json_str(document),
        Err(ConfigError::Invalid(_))
    ));
}
