//! # HR Core
//!
//! The in-memory employee directory.
//!
//! This crate holds the records, the [`Directory`] that owns them, and the
//! result types the six directory operations return. It performs no I/O and
//! has no notion of transport: the app layer (`apps/hr`) decides how the
//! operations are exposed and how the directory is shared.
//!
//! ## Failure styles
//!
//! Two styles coexist and both are part of the wire contract:
//! - read operations report a missing record as a [`Lookup::NotFound`] value
//! - write operations report it as a [`WriteOutcome::Rejected`] message

pub mod directory;
pub mod employee;
pub mod error;
pub mod outcome;
pub mod seed;

pub use directory::{Directory, IdPolicy};
pub use employee::{DEFAULT_LEAVE_BALANCE, Employee, EmployeeId, NewEmployee, Timestamp};
pub use error::{Error, Result};
pub use outcome::{Created, EmployeeMetrics, Lookup, NotFound, WriteOutcome};
