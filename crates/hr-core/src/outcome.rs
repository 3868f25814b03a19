//! # Outcome Module
//!
//! Result shapes returned by the directory operations.
//!
//! - [`Lookup`] for reads: the payload, or a value carrying an `error` message
//! - [`WriteOutcome`] for role updates and deletes: a status message
//! - [`Created`] for adds: message plus the new record
//! - [`EmployeeMetrics`]: the reduced view returned by `get_metrics`

use crate::employee::{Employee, Timestamp};
use serde::{Deserialize, Serialize, Serializer};

/// Message carried by a read that matched no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFound {
    pub error: String,
}

/// Result of a read operation.
///
/// Serializes untagged: `Found` is the bare payload, `NotFound` is
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    NotFound(NotFound),
}

impl<T> Lookup<T> {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(NotFound {
            error: message.into(),
        })
    }

    /// Check whether a record matched.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The payload, if found.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) => None,
        }
    }

    /// The error message, if not found.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(not_found) => Some(&not_found.error),
        }
    }
}

/// Result of a write operation addressed by id.
///
/// Serializes as the bare message string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record existed and was changed.
    Applied(String),
    /// No record matched.
    Rejected(String),
}

impl WriteOutcome {
    /// The human-readable status message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Applied(message) | Self::Rejected(message) => message,
        }
    }

    /// Check whether the write took effect.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

impl Serialize for WriteOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Result of adding an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub employee: Employee,
}

/// Reduced view of an employee: pay, leave and freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeMetrics {
    pub name: String,
    pub department: String,
    #[serde(serialize_with = "crate::employee::serialize_salary")]
    pub salary: f64,
    pub leave_balance: i64,
    pub last_updated: Timestamp,
}

impl From<&Employee> for EmployeeMetrics {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            department: employee.department.clone(),
            salary: employee.salary,
            leave_balance: employee.leave_balance,
            last_updated: employee.last_updated,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
