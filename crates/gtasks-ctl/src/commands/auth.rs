//! Authentication command handlers for the gtasks CLI

use gtasks_client::TokenManager;
use gtasks_shared::errors::ClientResult;
use gtasks_shared::GtasksConfig;

use crate::output;
use crate::AuthCommands;

pub(crate) async fn handle_auth_command(
    cmd: AuthCommands,
    config: &GtasksConfig,
) -> ClientResult<()> {
    match cmd {
        AuthCommands::Status => auth_status(config).await,
    }
}

/// Report whether credentials resolve and a token can be minted. The token
/// itself is never printed.
async fn auth_status(config: &GtasksConfig) -> ClientResult<()> {
    output::header("Authentication status");

    let credentials = match config.credentials_path() {
        Ok(path) => {
            output::status_icon(true, format!("Credentials file: {}", path.display()));
            path
        }
        Err(e) => {
            output::status_icon(false, format!("Credentials file: {e}"));
            output::muted("Place an authorized-user JSON file at ~/.config/gtasks/credentials.json");
            output::muted("or set credentials_path in gtasks.toml / GTASKS_CREDENTIALS");
            return Err(e);
        }
    };

    let tokens = match TokenManager::from_credentials_file(&credentials, &config.google.token_url) {
        Ok(tokens) => {
            output::status_icon(true, "Credentials parsed (client id + refresh token present)");
            tokens
        }
        Err(e) => {
            output::status_icon(false, format!("Credentials unusable: {e}"));
            return Err(e);
        }
    };

    if tokens.has_fresh_token().await {
        output::status_icon(true, "Cached access token is still fresh");
        return Ok(());
    }

    output::muted("  Requesting a fresh access token from Google...");
    match tokens.access_token().await {
        Ok(_) => {
            output::status_icon(true, "Access token minted successfully");
            Ok(())
        }
        Err(e) => {
            output::status_icon(false, format!("Token refresh failed: {e}"));
            Err(e)
        }
    }
}
