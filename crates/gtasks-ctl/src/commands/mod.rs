//! Command handlers for the gtasks CLI
//!
//! Each module handles a specific command group, delegating to `gtasks-client`
//! for the Google API operations.

pub(crate) mod auth;
pub(crate) mod email;
pub(crate) mod search;
pub(crate) mod task;
pub(crate) mod tasklist;

pub(crate) use auth::handle_auth_command;
pub(crate) use email::handle_email_command;
pub(crate) use search::handle_search_command;
pub(crate) use task::handle_task_command;
pub(crate) use tasklist::handle_tasklist_command;

use gtasks_client::{GmailApiClient, GmailService, TasksApiClient, TasksService, TokenManager};
use gtasks_shared::errors::ClientResult;
use gtasks_shared::GtasksConfig;

use crate::output;

/// Build a token manager from the configured credentials file, reporting
/// resolution failures to the user.
pub(crate) fn token_manager(config: &GtasksConfig) -> ClientResult<TokenManager> {
    let credentials = config.credentials_path().inspect_err(|e| {
        output::error(format!("{e}"));
        output::muted("Place an authorized-user JSON file at ~/.config/gtasks/credentials.json");
        output::muted("or set credentials_path in gtasks.toml / GTASKS_CREDENTIALS");
    })?;

    TokenManager::from_credentials_file(&credentials, &config.google.token_url)
        .inspect_err(|e| output::error(format!("{e}")))
}

pub(crate) fn tasks_service(config: &GtasksConfig) -> ClientResult<TasksService> {
    let tokens = token_manager(config)?;
    let api = TasksApiClient::new(&config.google.tasks_base_url, tokens);
    Ok(TasksService::new(api))
}

pub(crate) fn gmail_service(config: &GtasksConfig) -> ClientResult<GmailService> {
    let tokens = token_manager(config)?;
    let api = GmailApiClient::new(&config.google.gmail_base_url, tokens);
    Ok(GmailService::new(api))
}

/// Print a value as pretty JSON for `--json` scripting output.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> ClientResult<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    output::plain(rendered);
    Ok(())
}
