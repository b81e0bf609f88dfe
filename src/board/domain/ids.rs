//! Identifier types for the board domain.
//!
//! Record identifiers are opaque strings owned by the backing store; the
//! newtypes only keep the different record kinds from being mixed up.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the person viewing the board.
///
/// Platform identities often arrive wrapped in braces (`{GUID}`); those are
/// stripped so the value can be used directly as a lookup key.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::ViewerId;
///
/// let viewer = ViewerId::new("{6F9619FF-8B86-D011-B42D-00C04FC964FF}").unwrap();
/// assert_eq!(viewer.as_str(), "6F9619FF-8B86-D011-B42D-00C04FC964FF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerId(String);

impl ViewerId {
    /// Creates a normalized viewer identity.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyViewerId`] when nothing remains after
    /// trimming whitespace and braces.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        let normalized = value
            .as_ref()
            .trim()
            .trim_start_matches('{')
            .trim_end_matches('}')
            .trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyViewerId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identity as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a store-assigned identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a resource record linking a viewer to team memberships.
    ResourceId
);

record_id!(
    /// Identifier of a project record.
    ProjectId
);

record_id!(
    /// Identifier of a task record.
    TaskId
);
