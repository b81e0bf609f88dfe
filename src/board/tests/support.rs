//! Fixtures shared by the board unit tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::{Value, json};

use crate::board::{
    adapters::memory::InMemoryRecordStore,
    domain::{BoardState, ProjectId, Task, TaskId, TaskStatus},
    ports::{RawRecord, RecordQuery, RecordStore, RecordStoreResult},
};
use crate::config::StoreSchema;

mock! {
    pub Store {}

    #[async_trait]
    impl RecordStore for Store {
        async fn query(&self, query: &RecordQuery) -> RecordStoreResult<Vec<RawRecord>>;
        async fn update(
            &self,
            collection: &str,
            record_id: &str,
            fields: RawRecord,
        ) -> RecordStoreResult<()>;
    }
}

/// Converts a JSON object literal into a raw record.
pub fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => RawRecord::new(),
    }
}

pub fn store() -> InMemoryRecordStore {
    InMemoryRecordStore::new(&StoreSchema::default())
}

pub fn seed_resource(store: &InMemoryRecordStore, viewer: &str, resource: &str) {
    store
        .insert("resources", record(json!({"resource_id": resource, "user_id": viewer})))
        .expect("seed resource");
}

pub fn seed_membership(store: &InMemoryRecordStore, resource: &str, project: Option<&str>) {
    store
        .insert(
            "project_team_members",
            record(json!({"resource_id": resource, "project_id": project})),
        )
        .expect("seed membership");
}

pub fn seed_project(store: &InMemoryRecordStore, project: &str, name: &str) {
    store
        .insert("projects", record(json!({"project_id": project, "name": name})))
        .expect("seed project");
}

pub fn seed_task(
    store: &InMemoryRecordStore,
    project: &str,
    task: &str,
    status: i64,
    modified_on: &str,
) {
    store
        .insert(
            "project_tasks",
            record(json!({
                "task_id": task,
                "task_name": format!("Task {task}"),
                "status": status,
                "project_id": project,
                "created_by": "user-guid",
                "created_by@OData.Community.Display.V1.FormattedValue": "Ada Lovelace",
                "modified_on": modified_on,
            })),
        )
        .expect("seed task");
}

/// Board for project `p1` with the given `(id, status)` tasks in order.
pub fn board(tasks: &[(&str, TaskStatus)]) -> BoardState {
    BoardState::from_tasks(
        ProjectId::new("p1"),
        tasks.iter().map(|(id, status)| {
            Task::new(TaskId::new(*id), format!("Task {id}"), status.clone())
        }),
    )
}

/// Identifiers of a status group, in order.
pub fn group_ids(board: &BoardState, status: &TaskStatus) -> Vec<String> {
    board
        .tasks_for_status(status)
        .iter()
        .map(|task| task.id().to_string())
        .collect()
}
