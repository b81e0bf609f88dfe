//! Record store port: untyped query and update access to record collections.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// An untyped record as returned by the store.
pub type RawRecord = Map<String, Value>;

/// Result type for record store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

/// Generic record store contract.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the records of a collection matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when the store cannot answer.
    async fn query(&self, query: &RecordQuery) -> RecordStoreResult<Vec<RawRecord>>;

    /// Writes field values onto an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] when the record does not exist,
    /// [`RecordStoreError::Rejected`] when the store refuses the change, or
    /// [`RecordStoreError::Transport`] when the store is unreachable.
    async fn update(
        &self,
        collection: &str,
        record_id: &str,
        fields: RawRecord,
    ) -> RecordStoreResult<()>;
}

/// Errors returned by record store implementations.
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    /// The addressed record does not exist.
    #[error("record not found: {collection}/{id}")]
    NotFound {
        /// Collection that was addressed.
        collection: String,
        /// Identifier that was addressed.
        id: String,
    },

    /// The store refused the operation (validation, permission, conflict).
    #[error("store rejected the operation: {0}")]
    Rejected(String),

    /// The store could not be reached or answered with garbage.
    #[error("store transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordStoreError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Record predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Every record.
    #[default]
    All,
    /// Records whose field equals the value.
    Eq {
        /// Field name.
        field: String,
        /// Value to compare with.
        value: Value,
    },
    /// Records whose field equals any of the values. Repeated values are
    /// allowed; an empty list matches nothing.
    AnyOf {
        /// Field name.
        field: String,
        /// Accepted values.
        values: Vec<Value>,
    },
}

impl Filter {
    /// Builds an equality filter.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds a disjunction of equality clauses on one field.
    #[must_use]
    pub fn any_of<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::AnyOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluates the predicate against a record.
    #[must_use]
    pub fn matches(&self, record: &RawRecord) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => record.get(field) == Some(value),
            Self::AnyOf { field, values } => record
                .get(field)
                .is_some_and(|actual| values.contains(actual)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("true"),
            Self::Eq { field, value } => write!(f, "{field} eq {}", Literal(value)),
            Self::AnyOf { values, .. } if values.is_empty() => f.write_str("false"),
            Self::AnyOf { field, values } => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "({field} eq {})", Literal(value))?;
                }
                Ok(())
            }
        }
    }
}

/// Literal rendering for query strings: GUIDs, numbers and booleans bare,
/// other strings single-quoted.
struct Literal<'a>(&'a Value);

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("null"),
            Value::String(text) if Uuid::parse_str(text).is_ok() => f.write_str(text),
            Value::String(text) => write!(f, "'{}'", text.replace('\'', "''")),
            other => write!(f, "{other}"),
        }
    }
}

/// Sort order requested from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to sort on.
    pub field: String,
    /// `true` for descending order.
    pub descending: bool,
}

impl OrderBy {
    /// Sorts descending on a field.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Query over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    /// Collection to read.
    pub collection: String,
    /// Fields the caller needs; empty means all.
    pub select: Vec<String>,
    /// Record predicate.
    pub filter: Filter,
    /// Requested order, if any.
    pub order_by: Option<OrderBy>,
}

impl RecordQuery {
    /// Creates a query returning every record of a collection.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            select: Vec::new(),
            filter: Filter::All,
            order_by: None,
        }
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the record predicate.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the requested order.
    #[must_use]
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Renders the query options in OData form, e.g.
    /// `?$select=a,b&$filter=a eq 1&$orderby=b desc`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut options = Vec::new();
        if !self.select.is_empty() {
            options.push(format!("$select={}", self.select.join(",")));
        }
        if self.filter != Filter::All {
            options.push(format!("$filter={}", self.filter));
        }
        if let Some(order_by) = &self.order_by {
            let mut option = format!("$orderby={}", order_by.field);
            if order_by.descending {
                option.push_str(" desc");
            }
            options.push(option);
        }
        if options.is_empty() {
            return String::new();
        }
        format!("?{}", options.join("&"))
    }
}
