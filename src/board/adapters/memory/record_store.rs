//! In-memory record store.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::board::ports::{
    OrderBy, RawRecord, RecordQuery, RecordStore, RecordStoreError, RecordStoreResult,
};
use crate::config::StoreSchema;

/// Thread-safe in-memory record store.
///
/// Records are addressed through a per-collection key field (`id` for
/// collections the schema gives no key). Collections
/// with a registered timestamp field get it stamped from the clock on every
/// update.
pub struct InMemoryRecordStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    collections: HashMap<String, Vec<RawRecord>>,
    key_fields: HashMap<String, String>,
    stamp_fields: HashMap<String, String>,
    failing_updates: HashMap<String, String>,
    failing_queries: HashMap<String, String>,
    update_calls: usize,
}

fn transport_error(err: impl ToString) -> RecordStoreError {
    RecordStoreError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryRecordStore {
    /// Creates a store laid out per `schema`, using the system clock.
    #[must_use]
    pub fn new(schema: &StoreSchema) -> Self {
        Self::with_clock(schema, DefaultClock)
    }
}

impl<C> InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store laid out per `schema` with the given clock.
    #[must_use]
    pub fn with_clock(schema: &StoreSchema, clock: C) -> Self {
        let key_fields = [
            (&schema.resource_collection, &schema.resource_id_field),
            (&schema.project_collection, &schema.project_id_field),
            (&schema.task_collection, &schema.task_id_field),
        ]
        .into_iter()
        .map(|(collection, field)| (collection.clone(), field.clone()))
        .collect();
        let stamp_fields = HashMap::from([(
            schema.task_collection.clone(),
            schema.task_modified_field.clone(),
        )]);
        let state = InMemoryStoreState {
            key_fields,
            stamp_fields,
            ..InMemoryStoreState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            clock: Arc::new(clock),
        }
    }

    /// Adds a record and returns its key.
    ///
    /// A record without a key gets a fresh UUID.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Transport`] when the store lock is
    /// poisoned.
    pub fn insert(&self, collection: &str, mut record: RawRecord) -> RecordStoreResult<String> {
        let mut state = self.state.write().map_err(transport_error)?;
        let key_field = state
            .key_fields
            .get(collection)
            .cloned()
            .unwrap_or_else(|| "id".to_owned());
        let key = match record.get(&key_field).and_then(Value::as_str) {
            Some(existing) => existing.to_owned(),
            None => {
                let generated = Uuid::new_v4().to_string();
                record.insert(key_field, Value::String(generated.clone()));
                generated
            }
        };
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .push(record);
        Ok(key)
    }

    /// Returns a copy of a collection's records in insertion order.
    #[must_use]
    pub fn records(&self, collection: &str) -> Vec<RawRecord> {
        self.state
            .read()
            .map(|state| state.collections.get(collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Returns a copy of one record.
    #[must_use]
    pub fn get(&self, collection: &str, record_id: &str) -> Option<RawRecord> {
        let state = self.state.read().ok()?;
        let key_field = state.key_fields.get(collection)?;
        state
            .collections
            .get(collection)?
            .iter()
            .find(|record| has_key(record, key_field, record_id))
            .cloned()
    }

    /// Makes every update of `record_id` fail with a rejection.
    pub fn fail_updates_for(&self, record_id: impl Into<String>, message: impl Into<String>) {
        if let Ok(mut state) = self.state.write() {
            state.failing_updates.insert(record_id.into(), message.into());
        }
    }

    /// Makes every query of `collection` fail with a transport error.
    pub fn fail_queries_on(&self, collection: impl Into<String>, message: impl Into<String>) {
        if let Ok(mut state) = self.state.write() {
            state.failing_queries.insert(collection.into(), message.into());
        }
    }

    /// Removes all scripted failures.
    pub fn clear_failures(&self) {
        if let Ok(mut state) = self.state.write() {
            state.failing_updates.clear();
            state.failing_queries.clear();
        }
    }

    /// Returns how many updates were attempted, failed ones included.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.state.read().map(|state| state.update_calls).unwrap_or_default()
    }
}

fn has_key(record: &RawRecord, key_field: &str, record_id: &str) -> bool {
    record.get(key_field).and_then(Value::as_str) == Some(record_id)
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(left)), Some(Value::Number(right))) => {
            match (left.as_i64(), right.as_i64()) {
                (Some(left), Some(right)) => left.cmp(&right),
                _ => left.to_string().cmp(&right.to_string()),
            }
        }
        (Some(Value::String(left)), Some(Value::String(right))) => left.cmp(right),
        (Some(left), Some(right)) => left.to_string().cmp(&right.to_string()),
    }
}

fn sort_records(records: &mut [RawRecord], order_by: &OrderBy) {
    records.sort_by(|left, right| {
        let ordering = compare_values(left.get(&order_by.field), right.get(&order_by.field));
        if order_by.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Keeps selected fields and their `@`-annotations.
fn project_fields(record: &RawRecord, select: &[String]) -> RawRecord {
    if select.is_empty() {
        return record.clone();
    }
    record
        .iter()
        .filter(|(name, _)| {
            select.iter().any(|field| {
                name.strip_prefix(field.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('@'))
            })
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[async_trait]
impl<C> RecordStore for InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    async fn query(&self, query: &RecordQuery) -> RecordStoreResult<Vec<RawRecord>> {
        let state = self.state.read().map_err(transport_error)?;
        if let Some(message) = state.failing_queries.get(&query.collection) {
            return Err(transport_error(message));
        }
        let mut matched: Vec<RawRecord> = state
            .collections
            .get(&query.collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| query.filter.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(order_by) = &query.order_by {
            sort_records(&mut matched, order_by);
        }
        Ok(matched
            .iter()
            .map(|record| project_fields(record, &query.select))
            .collect())
    }

    async fn update(
        &self,
        collection: &str,
        record_id: &str,
        fields: RawRecord,
    ) -> RecordStoreResult<()> {
        let mut state = self.state.write().map_err(transport_error)?;
        state.update_calls += 1;
        if let Some(message) = state.failing_updates.get(record_id) {
            return Err(RecordStoreError::Rejected(message.clone()));
        }
        let not_found = || RecordStoreError::NotFound {
            collection: collection.to_owned(),
            id: record_id.to_owned(),
        };
        let key_field = state.key_fields.get(collection).cloned().ok_or_else(not_found)?;
        let stamp_field = state.stamp_fields.get(collection).cloned();
        let record = state
            .collections
            .get_mut(collection)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|record| has_key(record, &key_field, record_id))
            })
            .ok_or_else(not_found)?;
        record.extend(fields);
        if let Some(stamp_field) = stamp_field {
            record.insert(stamp_field, Value::String(self.clock.utc().to_rfc3339()));
        }
        Ok(())
    }
}
