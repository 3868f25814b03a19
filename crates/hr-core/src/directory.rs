//! # Employee Directory
//!
//! The ordered, in-memory sequence of employee records and the six
//! operations over it.
//!
//! Order is insertion order. Every lookup is a linear scan returning the
//! first match. Mutations take `&mut self`; callers that share a directory
//! across tasks wrap it in a single lock.

use crate::employee::{Employee, EmployeeId, NewEmployee, Timestamp};
use crate::error::Error;
use crate::outcome::{Created, EmployeeMetrics, Lookup, WriteOutcome};
use crate::seed;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Message returned by writes that matched no record.
const EMPLOYEE_NOT_FOUND: &str = "❌ Employee not found.";

// =============================================================================
// ID POLICY
// =============================================================================

/// How `add` picks the identifier of a new record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// A counter owned by the directory, never reused.
    ///
    /// Starts one past the highest seeded id and advances once per add.
    #[default]
    Monotonic,

    /// Current length plus one.
    ///
    /// After a delete this can hand out an id that is still in use; lookups
    /// then see the older record first.
    LengthPlusOne,
}

impl IdPolicy {
    /// The configuration name of this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::LengthPlusOne => "length-plus-one",
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "length-plus-one" | "length_plus_one" => Ok(Self::LengthPlusOne),
            other => Err(Error::UnknownIdPolicy(other.to_string())),
        }
    }
}

// =============================================================================
// DIRECTORY
// =============================================================================

/// The employee directory.
#[derive(Debug, Clone)]
pub struct Directory {
    /// Records in insertion order.
    employees: Vec<Employee>,

    /// Next id handed out under [`IdPolicy::Monotonic`]; `None` once the
    /// counter has passed `i64::MAX`.
    next_id: Option<i64>,

    id_policy: IdPolicy,
}

impl Directory {
    /// Create an empty directory.
    #[must_use]
    pub fn new(id_policy: IdPolicy) -> Self {
        Self::with_employees(Vec::new(), id_policy)
    }

    /// Create a directory holding the three sample employees.
    #[must_use]
    pub fn seeded(id_policy: IdPolicy) -> Self {
        Self::with_employees(seed::sample_employees(Timestamp::now()), id_policy)
    }

    /// Create a directory from existing records, kept in the given order.
    ///
    /// The monotonic counter starts one past the highest id present.
    #[must_use]
    pub fn with_employees(employees: Vec<Employee>, id_policy: IdPolicy) -> Self {
        let next_id = match employees.iter().map(|e| e.id.0).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };

        Self {
            employees,
            next_id,
            id_policy,
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Check if the directory holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[Employee] {
        &self.employees
    }

    /// The first record with the given id.
    #[must_use]
    pub fn get_by_id(&self, id: EmployeeId) -> Lookup<Employee> {
        match self.find(id) {
            Some(employee) => Lookup::Found(employee.clone()),
            None => Lookup::not_found(format!("Employee with ID {id} not found")),
        }
    }

    /// Replace an employee's role and stamp the record.
    ///
    /// Any string is accepted as the new role, including the empty string.
    pub fn update_role(&mut self, id: EmployeeId, new_role: impl Into<String>) -> WriteOutcome {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            return WriteOutcome::Rejected(EMPLOYEE_NOT_FOUND.to_string());
        };

        let new_role = new_role.into();
        let old_role = std::mem::replace(&mut employee.role, new_role.clone());
        employee.last_updated = Timestamp::now();

        WriteOutcome::Applied(format!(
            "✅ Updated {}'s role from '{}' to '{}'.",
            employee.name, old_role, new_role
        ))
    }

    /// Append a new employee and return it.
    pub fn add(&mut self, new: NewEmployee) -> Created {
        let id = self.allocate_id();
        let employee = Employee::from_new(id, new, Timestamp::now());
        self.employees.push(employee.clone());

        Created {
            message: "✅ Employee added successfully!".to_string(),
            employee,
        }
    }

    /// Remove the first record with the given id.
    pub fn delete(&mut self, id: EmployeeId) -> WriteOutcome {
        let Some(index) = self.employees.iter().position(|e| e.id == id) else {
            return WriteOutcome::Rejected(EMPLOYEE_NOT_FOUND.to_string());
        };

        let removed = self.employees.remove(index);
        WriteOutcome::Applied(format!(
            "🗑️ Employee {} (ID: {}) deleted successfully.",
            removed.name, id
        ))
    }

    /// Pay, leave and freshness for one employee.
    #[must_use]
    pub fn get_metrics(&self, id: EmployeeId) -> Lookup<EmployeeMetrics> {
        match self.find(id) {
            Some(employee) => Lookup::Found(EmployeeMetrics::from(employee)),
            None => Lookup::not_found(format!("Metrics not found for employee ID {id}")),
        }
    }

    fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Under [`IdPolicy::Monotonic`] ids are never reused until the counter
    /// passes `i64::MAX`; after that the lowest free positive id is taken.
    fn allocate_id(&mut self) -> EmployeeId {
        match self.id_policy {
            IdPolicy::Monotonic => match self.next_id {
                Some(id) => {
                    self.next_id = id.checked_add(1);
                    EmployeeId(id)
                }
                None => self.lowest_free_id(),
            },
            IdPolicy::LengthPlusOne => EmployeeId(self.employees.len() as i64 + 1),
        }
    }

    fn lowest_free_id(&self) -> EmployeeId {
        let used: BTreeSet<i64> = self.employees.iter().map(|e| e.id.0).collect();
        // At most `len` ids are taken, so this stops within `len + 1` steps.
        let mut candidate = 1;
        while used.contains(&candidate) {
            candidate += 1;
        }
        EmployeeId(candidate)
    }
}

// =============================================================================
// TESTS
// =============================================================================
