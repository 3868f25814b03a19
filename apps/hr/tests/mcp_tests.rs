//! Integration tests for the MCP server.
//!
//! Drives `McpServer::serve` with in-memory buffers standing in for stdio.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use hr::config::Config;
use hr::hr_core::IdPolicy;
use hr::mcp::McpServer;
use serde_json::{Value, json};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Feed `messages` (one per line) through a fresh server; return the responses.
async fn exchange(server: &McpServer, messages: &[Value]) -> Vec<Value> {
    let input: String = messages
        .iter()
        .map(|m| format!("{}\n", m))
        .collect();
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    })
}

/// Text of the first content item of a tools/call response.
fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

fn tool_json(response: &Value) -> Value {
    serde_json::from_str(tool_text(response)).unwrap()
}

fn is_error(response: &Value) -> bool {
    response["result"]["isError"].as_bool().unwrap()
}

fn server() -> McpServer {
    McpServer::seeded(Config::default())
}

// =============================================================================
// HANDSHAKE
// =============================================================================

#[tokio::test]
async fn test_initialize_handshake() {
    let responses = exchange(
        &server(),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}),
        ],
    )
    .await;

    // The notification is not answered.
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "HRManagement");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_tools_list_advertises_six_tools() {
    let responses = exchange(
        &server(),
        &[json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})],
    )
    .await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "get_all_employees",
            "get_employee_by_id",
            "update_employee_role",
            "add_employee",
            "delete_employee",
            "get_employee_metrics",
        ]
    );
    assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
}

// =============================================================================
// TOOL CALLS
// =============================================================================

#[tokio::test]
async fn test_get_all_employees() {
    let responses = exchange(&server(), &[call(1, "get_all_employees", json!({}))]).await;

    let employees = tool_json(&responses[0]);
    let names: Vec<&str> = employees
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice Johnson", "Bob Smith", "Charlie Brown"]);
}

#[tokio::test]
async fn test_get_employee_by_id_found_and_missing() {
    let responses = exchange(
        &server(),
        &[
            call(1, "get_employee_by_id", json!({"emp_id": 3})),
            call(2, "get_employee_by_id", json!({"emp_id": 99})),
        ],
    )
    .await;

    let charlie = tool_json(&responses[0]);
    assert_eq!(charlie["email"], "charlie@company.com");
    assert_eq!(charlie["leave_balance"], 15);

    assert!(!is_error(&responses[1]));
    assert_eq!(
        tool_json(&responses[1]),
        json!({"error": "Employee with ID 99 not found"})
    );
}

#[tokio::test]
async fn test_update_then_get_reflects_new_role() {
    let responses = exchange(
        &server(),
        &[
            call(1, "update_employee_role", json!({"emp_id": 1, "new_role": "CTO"})),
            call(2, "get_employee_by_id", json!({"emp_id": 1})),
            call(3, "update_employee_role", json!({"emp_id": 42, "new_role": "CTO"})),
        ],
    )
    .await;

    assert_eq!(
        tool_text(&responses[0]),
        "✅ Updated Alice Johnson's role from 'Software Engineer' to 'CTO'."
    );
    assert_eq!(tool_json(&responses[1])["role"], "CTO");
    assert_eq!(tool_text(&responses[2]), "❌ Employee not found.");
    assert!(!is_error(&responses[2]));
}

#[tokio::test]
async fn test_add_then_get_returns_same_record() {
    let responses = exchange(
        &server(),
        &[
            call(
                1,
                "add_employee",
                json!({
                    "name": "Dana Scully",
                    "role": "Agent",
                    "department": "Investigations",
                    "email": "dana@company.com",
                    "salary": 65000.5,
                    "leave_balance": 20
                }),
            ),
            call(2, "get_employee_by_id", json!({"emp_id": 4})),
        ],
    )
    .await;

    let created = tool_json(&responses[0]);
    assert_eq!(created["message"], "✅ Employee added successfully!");
    assert_eq!(created["employee"]["id"], 4);
    assert_eq!(tool_json(&responses[1]), created["employee"]);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let responses = exchange(
        &server(),
        &[
            call(1, "delete_employee", json!({"emp_id": 2})),
            call(2, "get_employee_by_id", json!({"emp_id": 2})),
            call(3, "delete_employee", json!({"emp_id": 2})),
            call(4, "get_all_employees", json!({})),
        ],
    )
    .await;

    assert_eq!(
        tool_text(&responses[0]),
        "🗑️ Employee Bob Smith (ID: 2) deleted successfully."
    );
    assert_eq!(
        tool_json(&responses[1]),
        json!({"error": "Employee with ID 2 not found"})
    );
    assert_eq!(tool_text(&responses[2]), "❌ Employee not found.");
    assert_eq!(tool_json(&responses[3]).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_employee_metrics() {
    let responses = exchange(
        &server(),
        &[
            call(1, "get_employee_metrics", json!({"emp_id": 2})),
            call(2, "get_employee_metrics", json!({"emp_id": 5})),
        ],
    )
    .await;

    let metrics = tool_json(&responses[0]);
    assert_eq!(metrics["name"], "Bob Smith");
    assert_eq!(metrics["department"], "Human Resources");
    // Whole-number salaries go out as JSON integers.
    assert_eq!(metrics["salary"], json!(90000));
    assert!(metrics["salary"].is_u64());
    assert_eq!(metrics["leave_balance"], 8);
    assert!(metrics["last_updated"].is_string());
    assert_eq!(metrics.as_object().unwrap().len(), 5);

    assert_eq!(
        tool_json(&responses[1]),
        json!({"error": "Metrics not found for employee ID 5"})
    );
}

// =============================================================================
// ID POLICY THROUGH THE PROTOCOL
// =============================================================================

async fn delete_two_then_add(policy: IdPolicy) -> Value {
    let server = McpServer::seeded(Config::with_id_policy(policy));
    let responses = exchange(
        &server,
        &[
            call(1, "delete_employee", json!({"emp_id": 2})),
            call(
                2,
                "add_employee",
                json!({"name": "X", "role": "Y", "department": "Z", "email": "x@z.com", "salary": 1000}),
            ),
        ],
    )
    .await;
    tool_json(&responses[1])["employee"]["id"].clone()
}

#[tokio::test]
async fn test_add_after_delete_monotonic() {
    assert_eq!(delete_two_then_add(IdPolicy::Monotonic).await, 4);
}

#[tokio::test]
async fn test_add_after_delete_length_plus_one() {
    assert_eq!(delete_two_then_add(IdPolicy::LengthPlusOne).await, 3);
}

// =============================================================================
// PROTOCOL ERRORS
// =============================================================================

#[tokio::test]
async fn test_unknown_tool_is_tool_error() {
    let responses = exchange(&server(), &[call(1, "give_raise", json!({}))]).await;
    assert!(is_error(&responses[0]));
    assert_eq!(tool_text(&responses[0]), "Unknown tool: give_raise");
}

#[tokio::test]
async fn test_bad_arguments_are_tool_error() {
    let responses = exchange(
        &server(),
        &[call(1, "get_employee_by_id", json!({"emp_id": "one"}))],
    )
    .await;
    assert!(is_error(&responses[0]));
    assert!(tool_text(&responses[0]).starts_with("Invalid arguments for get_employee_by_id"));
}

#[tokio::test]
async fn test_missing_tool_name_is_invalid_params() {
    let responses = exchange(
        &server(),
        &[json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": {}})],
    )
    .await;
    assert_eq!(responses[0]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_unknown_method() {
    let responses = exchange(
        &server(),
        &[json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"})],
    )
    .await;
    assert_eq!(responses[0]["id"], 9);
    assert_eq!(responses[0]["error"]["code"], -32601);
}

#[tokio::test]
async fn test_parse_error_and_blank_lines() {
    let server = server();
    let input = "\n   \n{not json}\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 1);
}

/// Run raw bytes through a fresh server; return the responses.
async fn exchange_raw(input: &[u8]) -> Vec<Value> {
    let mut output = Vec::new();
    server().serve(input, &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_stop_the_server() {
    let responses =
        exchange_raw(b"\xff\xfe\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n").await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_request_without_method_is_invalid_request() {
    let responses = exchange(
        &server(),
        &[
            json!({"jsonrpc": "2.0", "id": 5}),
            json!({"jsonrpc": "2.0", "id": 6, "method": "ping"}),
        ],
    )
    .await;

    assert_eq!(responses[0]["id"], 5);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[1]["id"], 6);
}

#[tokio::test]
async fn test_cancelled_notification_is_not_answered() {
    let responses = exchange(
        &server(),
        &[
            json!({
                "jsonrpc": "2.0",
                "method": "notifications/cancelled",
                "params": {"requestId": 1, "reason": "user aborted"}
            }),
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 2);
}

#[tokio::test]
async fn test_omitted_or_null_arguments_default_to_empty() {
    let responses = exchange(
        &server(),
        &[
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {"name": "get_all_employees"}
            }),
            call(2, "get_all_employees", Value::Null),
            call(3, "get_employee_by_id", Value::Null),
        ],
    )
    .await;

    assert!(!is_error(&responses[0]));
    assert_eq!(tool_json(&responses[0]).as_array().unwrap().len(), 3);
    assert!(!is_error(&responses[1]));
    assert_eq!(tool_json(&responses[1]).as_array().unwrap().len(), 3);

    // A tool that needs arguments still reports what is missing.
    assert!(is_error(&responses[2]));
    assert!(tool_text(&responses[2]).contains("emp_id"));
}

#[tokio::test]
async fn test_state_persists_across_messages_not_servers() {
    let first = server();
    exchange(&first, &[call(1, "delete_employee", json!({"emp_id": 1}))]).await;
    assert_eq!(first.directory().lock().await.len(), 2);

    let second = server();
    assert_eq!(second.directory().lock().await.len(), 3);
}
