//! Given steps for board move BDD scenarios.

use std::sync::Arc;

use super::world::{BoardMoveWorld, record, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use taskboard::board::{domain::ViewerId, services::BoardSession};

#[given(r#"viewer "{viewer}" works as "{resource}" on project "{project}" named "{name}""#)]
fn viewer_on_project(
    world: &mut BoardMoveWorld,
    viewer: String,
    resource: String,
    project: String,
    name: String,
) -> Result<(), eyre::Report> {
    let schema = world.schema().clone();
    world
        .store
        .insert(
            &schema.resource_collection,
            record([
                (schema.resource_id_field.as_str(), json!(resource)),
                (schema.resource_viewer_field.as_str(), json!(viewer)),
            ]),
        )
        .wrap_err("seed resource")?;
    world
        .store
        .insert(
            &schema.membership_collection,
            record([
                (schema.membership_resource_field.as_str(), json!(resource)),
                (schema.membership_project_field.as_str(), json!(project)),
            ]),
        )
        .wrap_err("seed membership")?;
    world
        .store
        .insert(
            &schema.project_collection,
            record([
                (schema.project_id_field.as_str(), json!(project)),
                (schema.project_name_field.as_str(), json!(name)),
            ]),
        )
        .wrap_err("seed project")?;
    Ok(())
}

#[given(r#"project "{project}" has task "{task}" with status code {code:i64}"#)]
fn project_has_task(
    world: &mut BoardMoveWorld,
    project: String,
    task: String,
    code: i64,
) -> Result<(), eyre::Report> {
    let schema = world.schema().clone();
    world
        .store
        .insert(
            &schema.task_collection,
            record([
                (schema.task_id_field.as_str(), json!(task)),
                (schema.task_name_field.as_str(), json!(format!("Task {task}"))),
                (schema.task_status_field.as_str(), json!(code)),
                (schema.task_project_field.as_str(), json!(project)),
            ]),
        )
        .wrap_err("seed task")?;
    Ok(())
}

#[given(r#"the board is opened for viewer "{viewer}""#)]
fn board_opened(world: &mut BoardMoveWorld, viewer: String) -> Result<(), eyre::Report> {
    let session = BoardSession::new(
        ViewerId::new(viewer)?,
        Arc::new(world.store.clone()),
        Arc::clone(&world.view),
        Arc::clone(&world.creator),
        Arc::clone(&world.config),
    );
    run_async(session.start()).wrap_err("open board for scenario")?;
    world.session = Some(session);
    Ok(())
}

#[given(r#"the store rejects writes to task "{task}""#)]
fn store_rejects_writes(world: &mut BoardMoveWorld, task: String) {
    world.store.fail_updates_for(task, "write rejected by scenario");
}
