//! Sample records loaded into every new process.

use crate::employee::{Employee, EmployeeId, Timestamp};

/// The three fixed sample employees, all stamped with `now`.
#[must_use]
pub fn sample_employees(now: Timestamp) -> Vec<Employee> {
    let rows = [
        (1, "Alice Johnson", "Software Engineer", "Engineering", "alice@company.com", 80000.0, 12),
        (2, "Bob Smith", "HR Manager", "Human Resources", "bob@company.com", 90000.0, 8),
        (3, "Charlie Brown", "Data Analyst", "Analytics", "charlie@company.com", 75000.0, 15),
    ];

    rows.into_iter()
        .map(|(id, name, role, department, email, salary, leave_balance)| Employee {
            id: EmployeeId(id),
            name: name.to_string(),
            role: role.to_string(),
            department: department.to_string(),
            email: email.to_string(),
            salary,
            leave_balance,
            last_updated: now,
        })
        .collect()
}
