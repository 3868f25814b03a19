//! # Employee Records
//!
//! The record type held by the directory, its identifier, the input used to
//! create one, and the wall-clock timestamp stamped on every mutation.

use crate::error::{Error, Result};
use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Leave balance given to a new employee when none is supplied.
pub const DEFAULT_LEAVE_BALANCE: i64 = 10;

/// Largest magnitude at which every whole `f64` is an exact integer (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Textual form of [`Timestamp`]: ISO-8601 local time with microseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// =============================================================================
// EMPLOYEE ID
// =============================================================================

/// Identifier of an employee within the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Local wall-clock time, truncated to microseconds.
///
/// Serializes as `YYYY-MM-DDTHH:MM:SS.ffffff` with no offset. Parsing also
/// accepts the form without fractional seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current local time.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local().trunc_subsecs(6))
    }

    /// Parse an ISO-8601 local timestamp.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse::<NaiveDateTime>()
            .map(|dt| Self(dt.trunc_subsecs(6)))
            .map_err(|source| Error::InvalidTimestamp {
                value: value.to_string(),
                source,
            })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SALARY
// =============================================================================

/// Write whole-number salaries as JSON integers (`80000`, not `80000.0`).
///
/// Fractional, non-finite and out-of-range values are written as floats.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub(crate) fn serialize_salary<S: Serializer>(
    salary: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if salary.fract() == 0.0 && salary.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*salary as i64)
    } else {
        serializer.serialize_f64(*salary)
    }
}

// =============================================================================
// EMPLOYEE
// =============================================================================

/// One employee's attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: String,
    #[serde(serialize_with = "serialize_salary")]
    pub salary: f64,
    pub leave_balance: i64,
    pub last_updated: Timestamp,
}

impl Employee {
    /// Build a record from creation input, stamped with `now`.
    #[must_use]
    pub fn from_new(id: EmployeeId, new: NewEmployee, now: Timestamp) -> Self {
        Self {
            id,
            name: new.name,
            role: new.role,
            department: new.department,
            email: new.email,
            salary: new.salary,
            leave_balance: new.leave_balance,
            last_updated: now,
        }
    }
}

/// Input for creating an employee.
///
/// Deserializes straight from tool arguments; `leave_balance` falls back to
/// [`DEFAULT_LEAVE_BALANCE`] when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: String,
    #[serde(serialize_with = "serialize_salary")]
    pub salary: f64,
    #[serde(default = "default_leave_balance")]
    pub leave_balance: i64,
}

fn default_leave_balance() -> i64 {
    DEFAULT_LEAVE_BALANCE
}

impl NewEmployee {
    /// Create input with the default leave balance.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            department: department.into(),
            email: email.into(),
            salary,
            leave_balance: DEFAULT_LEAVE_BALANCE,
        }
    }

    /// Override the leave balance.
    #[must_use]
    pub fn with_leave_balance(mut self, leave_balance: i64) -> Self {
        self.leave_balance = leave_balance;
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
