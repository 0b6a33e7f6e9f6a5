//! Email operations built on [`GmailApiClient`].

use validator::Validate;

use gtasks_shared::errors::{ClientError, ClientResult};
use gtasks_shared::models::{
    EmailContent, EmailSearchResults, FilterCriteria, MessageSummary, OutgoingEmail, SendOutcome,
};

use crate::gmail_api::GmailApiClient;

const DEFAULT_MAX_RESULTS: u32 = 10;
const MAX_RESULTS_CAP: u32 = 100;

/// Validated email operations. List-style calls fetch the id page first and
/// then hydrate each id into a summary, skipping messages that vanish
/// between the two calls.
#[derive(Debug, Clone)]
pub struct GmailService {
    api: GmailApiClient,
}

impl GmailService {
    pub fn new(api: GmailApiClient) -> Self {
        Self { api }
    }

    /// Unread messages.
    pub async fn unread_emails(&self, max_results: Option<u32>) -> ClientResult<Vec<MessageSummary>> {
        let max = clamp_max(max_results)?;
        let refs = self.api.list_messages(None, &["UNREAD"], max).await?;
        self.hydrate(refs).await
    }

    /// Messages matching a raw Gmail search query.
    ///
    /// With `include_content` the matches are hydrated into summaries;
    /// without it the bare id/thread references come back directly, saving a
    /// per-message fetch.
    pub async fn search_emails(
        &self,
        query: &str,
        max_results: Option<u32>,
        include_content: bool,
    ) -> ClientResult<EmailSearchResults> {
        if query.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Search query must not be empty".to_string(),
            ));
        }
        let max = clamp_max(max_results)?;
        let refs = self.api.list_messages(Some(query), &[], max).await?;
        if !include_content {
            return Ok(EmailSearchResults::Refs(refs));
        }
        Ok(EmailSearchResults::Summaries(self.hydrate(refs).await?))
    }

    /// Summaries of messages matching structured criteria, translated to a
    /// query string.
    pub async fn filter_emails(
        &self,
        criteria: &FilterCriteria,
        max_results: Option<u32>,
    ) -> ClientResult<Vec<MessageSummary>> {
        if criteria.is_empty() {
            return Err(ClientError::InvalidInput(
                "At least one filter criterion is required".to_string(),
            ));
        }
        let max = clamp_max(max_results)?;
        let refs = self
            .api
            .list_messages(Some(&criteria.to_query()), &[], max)
            .await?;
        self.hydrate(refs).await
    }

    /// Full content of one message. `None` when the id does not exist.
    pub async fn read_email(&self, message_id: &str) -> ClientResult<Option<EmailContent>> {
        self.api.get_content(message_id).await
    }

    /// Validate and send an email from the authorized account.
    pub async fn send_email(&self, email: &OutgoingEmail) -> ClientResult<SendOutcome> {
        email
            .validate()
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        self.api.send(email).await
    }

    async fn hydrate(
        &self,
        refs: Vec<gtasks_shared::models::MessageRef>,
    ) -> ClientResult<Vec<MessageSummary>> {
        let mut summaries = Vec::with_capacity(refs.len());
        for message in refs {
            match self.api.get_summary(&message.id).await? {
                Some(summary) => summaries.push(summary),
                None => {
                    tracing::debug!(message_id = %message.id, "Message disappeared during hydration");
                }
            }
        }
        Ok(summaries)
    }
}

fn clamp_max(max_results: Option<u32>) -> ClientResult<u32> {
    match max_results {
        None => Ok(DEFAULT_MAX_RESULTS),
        Some(0) => Err(ClientError::InvalidInput(
            "max_results must be at least 1".to_string(),
        )),
        Some(n) => Ok(n.min(MAX_RESULTS_CAP)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_max_defaults() {
        assert_eq!(clamp_max(None).unwrap(), DEFAULT_MAX_RESULTS);
        assert_eq!(clamp_max(Some(5)).unwrap(), 5);
    }

    #[test]
    fn test_clamp_max_caps_large_values() {
        assert_eq!(clamp_max(Some(5000)).unwrap(), MAX_RESULTS_CAP);
    }

    #[test]
    fn test_clamp_max_rejects_zero() {
        assert!(matches!(
            clamp_max(Some(0)),
            Err(ClientError::InvalidInput(_))
        ));
    }
}
