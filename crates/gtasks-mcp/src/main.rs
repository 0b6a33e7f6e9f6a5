//! Google Tasks & Gmail MCP server binary (stdio transport).

mod server;
mod tools;

use rmcp::ServiceExt;

use gtasks_shared::GtasksConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    gtasks_shared::logging::init_stderr_tracing("gtasks_mcp=info");

    tracing::info!("gtasks-mcp starting (stdio transport)");

    let config = GtasksConfig::load();
    let server = server::GtasksMcpServer::from_config(&config)?;
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
