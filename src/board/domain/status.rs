//! Task status enumeration and its store codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw store value of a status outside the enumeration, kept as text.
///
/// Only [`TaskStatus::from_code`] and [`TaskStatus::from_value`] build one,
/// so a known code never hides behind [`TaskStatus::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawStatus(String);

impl RawStatus {
    /// Returns the stored value as text; empty when the value was missing.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Board column a task belongs to.
///
/// Variants are declared in column order, so the derived ordering sorts
/// groups the way the board lays them out. Values outside the fixed
/// enumeration are kept as [`TaskStatus::Unrecognized`] instead of failing.
///
/// Serializes as the store value: the numeric code for known statuses and
/// the raw text otherwise. Deserialization maps through
/// [`TaskStatus::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum TaskStatus {
    /// Work has not started.
    NotStarted,
    /// Work is underway.
    InProgress,
    /// Work is awaiting review.
    InReview,
    /// Work is finished.
    Completed,
    /// A raw store value outside the enumeration.
    Unrecognized(RawStatus),
}

impl TaskStatus {
    /// Known statuses in board column order.
    pub const COLUMNS: [Self; 4] = [
        Self::NotStarted,
        Self::InProgress,
        Self::InReview,
        Self::Completed,
    ];

    /// Maps a raw store code to a status.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::NotStarted,
            2 => Self::InProgress,
            3 => Self::Completed,
            4 => Self::InReview,
            other => Self::Unrecognized(RawStatus(other.to_string())),
        }
    }

    /// Maps a raw store value to a status. Never fails.
    ///
    /// Integer codes and numeric strings go through [`TaskStatus::from_code`].
    /// Anything else is kept verbatim as [`TaskStatus::Unrecognized`]; a
    /// missing or null value keeps empty text.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        let raw = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(code) => return Self::from_code(code),
                None => number.to_string(),
            },
            Some(Value::String(text)) => match text.trim().parse::<i64>() {
                Ok(code) => return Self::from_code(code),
                Err(_) => text.clone(),
            },
            Some(other) => other.to_string(),
        };
        Self::Unrecognized(RawStatus(raw))
    }

    /// Returns the numeric store code, if there is one.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::NotStarted => Some(1),
            Self::InProgress => Some(2),
            Self::Completed => Some(3),
            Self::InReview => Some(4),
            Self::Unrecognized(raw) => raw.as_str().trim().parse().ok(),
        }
    }

    /// Returns the raw text of an unrecognized status.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Unrecognized(raw) => Some(raw.as_str()),
            _ => None,
        }
    }

    /// Returns the column heading, or `None` for unlabeled groups.
    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::NotStarted => Some("Not Started"),
            Self::InProgress => Some("In Progress"),
            Self::InReview => Some("In Review"),
            Self::Completed => Some("Completed"),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns `true` for the four enumerated statuses.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Returns the key a drag source attaches to this status's group.
    #[must_use]
    pub fn group_key(&self) -> String {
        match self {
            Self::Unrecognized(raw) => raw.as_str().to_owned(),
            known => known.code().map(|code| code.to_string()).unwrap_or_default(),
        }
    }

    /// Parses a group key echoed back by a drag source.
    ///
    /// Only keys naming one of the four known columns are accepted.
    #[must_use]
    pub fn from_group_key(key: &str) -> Option<Self> {
        let code = key.trim().parse::<i64>().ok()?;
        let status = Self::from_code(code);
        status.is_known().then_some(status)
    }
}

impl From<Value> for TaskStatus {
    fn from(value: Value) -> Self {
        Self::from_value(Some(&value))
    }
}

impl From<TaskStatus> for Value {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Unrecognized(raw) => Self::String(raw.0),
            known => known.code().map_or(Self::Null, Self::from),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.label(), self.raw()) {
            (Some(label), _) => f.write_str(label),
            (None, Some(raw)) if !raw.is_empty() => write!(f, "unrecognized ({raw})"),
            (None, _) => f.write_str("unrecognized"),
        }
    }
}
