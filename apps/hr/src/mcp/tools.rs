//! The six directory tools: definitions and dispatch.
//!
//! Each tool deserializes its arguments, runs one directory operation, and
//! hands back either a status message or a JSON payload. "Not found" is a
//! normal output here; only unknown tools and malformed arguments are errors.

use hr_core::{Directory, EmployeeId, NewEmployee};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

pub const GET_ALL_EMPLOYEES: &str = "get_all_employees";
pub const GET_EMPLOYEE_BY_ID: &str = "get_employee_by_id";
pub const UPDATE_EMPLOYEE_ROLE: &str = "update_employee_role";
pub const ADD_EMPLOYEE: &str = "add_employee";
pub const DELETE_EMPLOYEE: &str = "delete_employee";
pub const GET_EMPLOYEE_METRICS: &str = "get_employee_metrics";

/// Errors from a tool call. Reported to the caller as `isError: true`.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode result of {tool}: {source}")]
    Serialization {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// What a tool produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A status message, sent verbatim.
    Message(String),
    /// A structured payload.
    Json(Value),
}

impl ToolOutput {
    /// Render as the text carried in a tool result.
    pub fn into_text(self) -> Result<String, serde_json::Error> {
        match self {
            Self::Message(message) => Ok(message),
            Self::Json(value) => serde_json::to_string_pretty(&value),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmployeeIdArgs {
    emp_id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateRoleArgs {
    emp_id: i64,
    new_role: String,
}

fn emp_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "emp_id": { "type": "integer", "description": "Employee ID" }
        },
        "required": ["emp_id"]
    })
}

/// Definitions of every tool, in a stable order.
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_ALL_EMPLOYEES,
            description: "Fetch a list of all employees.",
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: GET_EMPLOYEE_BY_ID,
            description: "Retrieve employee details by ID.",
            input_schema: emp_id_schema(),
        },
        ToolDefinition {
            name: UPDATE_EMPLOYEE_ROLE,
            description: "Update an employee's role/title.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "emp_id": { "type": "integer", "description": "Employee ID" },
                    "new_role": { "type": "string", "description": "New job title" }
                },
                "required": ["emp_id", "new_role"]
            }),
        },
        ToolDefinition {
            name: ADD_EMPLOYEE,
            description: "Add a new employee record.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Full name" },
                    "role": { "type": "string", "description": "Job title" },
                    "department": { "type": "string", "description": "Department name" },
                    "email": { "type": "string", "description": "Company email" },
                    "salary": { "type": "number", "description": "Annual salary" },
                    "leave_balance": {
                        "type": "integer",
                        "description": "Remaining leave days",
                        "default": hr_core::DEFAULT_LEAVE_BALANCE
                    }
                },
                "required": ["name", "role", "department", "email", "salary"]
            }),
        },
        ToolDefinition {
            name: DELETE_EMPLOYEE,
            description: "Delete an employee by ID.",
            input_schema: emp_id_schema(),
        },
        ToolDefinition {
            name: GET_EMPLOYEE_METRICS,
            description: "Retrieve performance metrics like salary and leave balance.",
            input_schema: emp_id_schema(),
        },
    ]
}

/// Run one tool against the directory.
pub fn call_tool(directory: &mut Directory, name: &str, args: Value) -> Result<ToolOutput, ToolError> {
    match name {
        GET_ALL_EMPLOYEES => structured(name, directory.list_all()),
        GET_EMPLOYEE_BY_ID => {
            let EmployeeIdArgs { emp_id } = parse_args(name, args)?;
            let lookup = directory.get_by_id(EmployeeId(emp_id));
            if !lookup.is_found() {
                debug!(tool = name, emp_id, "no matching employee");
            }
            structured(name, &lookup)
        }
        UPDATE_EMPLOYEE_ROLE => {
            let UpdateRoleArgs { emp_id, new_role } = parse_args(name, args)?;
            let outcome = directory.update_role(EmployeeId(emp_id), new_role);
            if !outcome.is_applied() {
                debug!(tool = name, emp_id, "no matching employee");
            }
            Ok(ToolOutput::Message(outcome.message().to_string()))
        }
        ADD_EMPLOYEE => {
            let new: NewEmployee = parse_args(name, args)?;
            let created = directory.add(new);
            debug!(tool = name, emp_id = created.employee.id.0, "employee added");
            structured(name, &created)
        }
        DELETE_EMPLOYEE => {
            let EmployeeIdArgs { emp_id } = parse_args(name, args)?;
            let outcome = directory.delete(EmployeeId(emp_id));
            if !outcome.is_applied() {
                debug!(tool = name, emp_id, "no matching employee");
            }
            Ok(ToolOutput::Message(outcome.message().to_string()))
        }
        GET_EMPLOYEE_METRICS => {
            let EmployeeIdArgs { emp_id } = parse_args(name, args)?;
            let lookup = directory.get_metrics(EmployeeId(emp_id));
            if !lookup.is_found() {
                debug!(tool = name, emp_id, "no matching employee");
            }
            structured(name, &lookup)
        }
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn structured<T: Serialize + ?Sized>(tool: &str, value: &T) -> Result<ToolOutput, ToolError> {
    serde_json::to_value(value)
        .map(ToolOutput::Json)
        .map_err(|source| ToolError::Serialization {
            tool: tool.to_string(),
            source,
        })
}
