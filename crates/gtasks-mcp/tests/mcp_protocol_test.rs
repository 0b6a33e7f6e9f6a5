//! MCP protocol integration test.
//!
//! Verifies the protocol round-trip against the real server handler: tool
//! discovery via `list_tools` and tool invocation via `call_tool`. The
//! server points at an unroutable upstream, so calls that would hit Google
//! exercise the structured error path instead.

use rmcp::model::{CallToolRequestParams, ClientInfo};
use rmcp::{ClientHandler, ServiceExt};

use gtasks_client::TokenManager;
use gtasks_mcp::server::GtasksMcpServer;
use gtasks_shared::config::GoogleConfig;
use gtasks_shared::GtasksConfig;

#[derive(Debug, Clone, Default)]
struct DummyClient;

impl ClientHandler for DummyClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

fn test_server() -> GtasksMcpServer {
    let config = GtasksConfig {
        google: GoogleConfig {
            tasks_base_url: "http://127.0.0.1:1/tasks/v1".to_string(),
            gmail_base_url: "http://127.0.0.1:1/gmail/v1".to_string(),
            ..GoogleConfig::default()
        },
        ..GtasksConfig::default()
    };
    GtasksMcpServer::with_tokens(&config, TokenManager::static_token("t"))
}

#[tokio::test]
async fn test_mcp_protocol_list_tools() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let tools = client.list_tools(None).await?;
    let tool_names: Vec<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();

    for expected in [
        "get_task_lists",
        "get_task_list",
        "create_task_list",
        "update_task_list",
        "delete_task_list",
        "get_tasks",
        "get_task",
        "create_task",
        "update_task",
        "delete_task",
        "complete_task",
        "uncomplete_task",
        "clear_completed_tasks",
        "search_tasks",
        "create_multiple_tasks",
        "send_email",
        "read_email",
        "search_emails",
        "filter_emails",
        "get_unread_emails",
    ] {
        assert!(
            tool_names.contains(&expected),
            "Expected {expected} in tool list, got: {tool_names:?}"
        );
    }

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_call_tool_surfaces_upstream_failure() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let result = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: "get_task_lists".into(),
            arguments: None,
            task: None,
        })
        .await?;

    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("Expected text content");

    // Upstream is unreachable, so the tool reports a structured error.
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    assert!(parsed["error"].is_string());
    assert!(parsed["message"].is_string());

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_call_tool_rejects_bad_due_date() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let result = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: "create_task".into(),
            arguments: Some(
                serde_json::json!({
                    "task_list_id": "l1",
                    "title": "Water plants",
                    "due": "next tuesday",
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            task: None,
        })
        .await?;

    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("Expected text content");

    let parsed: serde_json::Value = serde_json::from_str(text)?;
    assert_eq!(parsed["error"], "invalid_due_date");

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}
