//! Shared request state.

use std::sync::Arc;

use gtasks_client::{GmailApiClient, GmailService, TasksApiClient, TasksService, TokenManager};
use gtasks_shared::errors::ClientResult;
use gtasks_shared::GtasksConfig;

/// Services shared by every handler. Wrapped in an `Arc` by the router.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tasks: TasksService,
    pub gmail: GmailService,
}

impl AppState {
    /// Build services from config, loading credentials from disk.
    pub fn from_config(config: &GtasksConfig) -> ClientResult<Self> {
        let credentials = config.credentials_path()?;
        let tokens = TokenManager::from_credentials_file(&credentials, &config.google.token_url)?;
        Ok(Self::with_tokens(config, tokens))
    }

    /// Build services with an existing token manager. Used by tests with
    /// `TokenManager::static_token`.
    pub fn with_tokens(config: &GtasksConfig, tokens: TokenManager) -> Self {
        let tasks_api = TasksApiClient::new(&config.google.tasks_base_url, tokens.clone());
        let gmail_api = GmailApiClient::new(&config.google.gmail_base_url, tokens);
        Self {
            tasks: TasksService::new(tasks_api),
            gmail: GmailService::new(gmail_api),
        }
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
