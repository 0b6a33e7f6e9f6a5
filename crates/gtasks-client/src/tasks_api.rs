//! HTTP client for the Google Tasks v1 API.

use serde::Deserialize;

use gtasks_shared::errors::{ClientError, ClientResult};
use gtasks_shared::models::{Task, TaskCreate, TaskList, TaskListCreate, TaskListPatch, TaskPatch};

use crate::auth::TokenManager;

/// Paged collection wrapper used by the upstream list endpoints.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
}

/// Thin wrapper over the Tasks v1 REST endpoints. All calls authenticate
/// through the shared [`TokenManager`].
#[derive(Debug, Clone)]
pub struct TasksApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
}

impl TasksApiClient {
    pub fn new(base_url: &str, tokens: TokenManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// All task lists for the authorized user.
    pub async fn list_task_lists(&self) -> ClientResult<Vec<TaskList>> {
        let url = format!("{}/users/@me/lists", self.base_url);
        let response = self.get(&url, &[]).await?;
        let collection: Collection<TaskList> = decode(response).await?;
        Ok(collection.items)
    }

    /// A single task list, or `None` when the id does not exist.
    pub async fn get_task_list(&self, list_id: &str) -> ClientResult<Option<TaskList>> {
        let url = format!("{}/users/@me/lists/{list_id}", self.base_url);
        let response = self.get(&url, &[]).await?;
        decode_optional(response).await
    }

    pub async fn create_task_list(&self, body: &TaskListCreate) -> ClientResult<TaskList> {
        let url = format!("{}/users/@me/lists", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// Full update of a task list. Returns `None` when the id does not exist.
    pub async fn update_task_list(
        &self,
        list_id: &str,
        body: &TaskListPatch,
    ) -> ClientResult<Option<TaskList>> {
        // Upstream PUT replaces the resource, so fetch and merge first.
        let Some(mut current) = self.get_task_list(list_id).await? else {
            return Ok(None);
        };
        if let Some(title) = &body.title {
            current.title = title.clone();
        }

        let url = format!("{}/users/@me/lists/{list_id}", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&current)
            .send()
            .await?;
        decode_optional(response).await
    }

    /// Delete a task list. Returns `false` when the id does not exist.
    pub async fn delete_task_list(&self, list_id: &str) -> ClientResult<bool> {
        let url = format!("{}/users/@me/lists/{list_id}", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self.http.delete(&url).bearer_auth(token).send().await?;
        accept_deleted(response).await
    }

    /// Tasks in a list. `completed` filters by completion state:
    /// `Some(true)` asks upstream to include completed and hidden tasks,
    /// `Some(false)` excludes them, `None` keeps the upstream defaults.
    pub async fn list_tasks(
        &self,
        list_id: &str,
        completed: Option<bool>,
    ) -> ClientResult<Vec<Task>> {
        let url = format!("{}/lists/{list_id}/tasks", self.base_url);
        let query: &[(&str, &str)] = match completed {
            Some(true) => &[("showCompleted", "true")],
            Some(false) => &[("showCompleted", "false"), ("showHidden", "false")],
            None => &[],
        };
        let response = self.get(&url, query).await?;
        let collection: Collection<Task> = decode(response).await?;
        Ok(collection.items)
    }

    /// A single task, or `None` when either id does not exist.
    pub async fn get_task(&self, list_id: &str, task_id: &str) -> ClientResult<Option<Task>> {
        let url = format!("{}/lists/{list_id}/tasks/{task_id}", self.base_url);
        let response = self.get(&url, &[]).await?;
        decode_optional(response).await
    }

    /// Create a task. Positioning hints (`parent`, `previous`) travel as
    /// query parameters; the rest is the request body.
    pub async fn create_task(&self, list_id: &str, body: &TaskCreate) -> ClientResult<Task> {
        let url = format!("{}/lists/{list_id}/tasks", self.base_url);
        let mut query = Vec::new();
        if let Some(parent) = &body.parent {
            query.push(("parent", parent.as_str()));
        }
        if let Some(previous) = &body.previous {
            query.push(("previous", previous.as_str()));
        }

        let payload = serde_json::json!({
            "title": body.title,
            "notes": body.notes,
            "due": body.due,
        });

        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(&url)
            .query(&query)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;
        decode(response).await
    }

    /// Merge the patch into the current task and PUT it back. Returns `None`
    /// when the task does not exist.
    pub async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> ClientResult<Option<Task>> {
        let Some(mut current) = self.get_task(list_id, task_id).await? else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            current.title = title.clone();
        }
        if let Some(notes) = &patch.notes {
            current.notes = Some(notes.clone());
        }
        if let Some(due) = patch.due {
            current.due = Some(due);
        }
        if let Some(status) = patch.status {
            current.status = status;
            // Clearing completion requires dropping the completed timestamp.
            if status == gtasks_shared::models::TaskStatus::NeedsAction {
                current.completed = None;
            }
        }

        let url = format!("{}/lists/{list_id}/tasks/{task_id}", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&current)
            .send()
            .await?;
        decode_optional(response).await
    }

    /// Delete a task. Returns `false` when it does not exist.
    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> ClientResult<bool> {
        let url = format!("{}/lists/{list_id}/tasks/{task_id}", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self.http.delete(&url).bearer_auth(token).send().await?;
        accept_deleted(response).await
    }

    /// Permanently remove all completed tasks from a list.
    pub async fn clear_completed(&self, list_id: &str) -> ClientResult<bool> {
        let url = format!("{}/lists/{list_id}/clear", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self.http.post(&url).bearer_auth(token).send().await?;
        accept_deleted(response).await
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> ClientResult<reqwest::Response> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(response)
    }
}

/// Decode a body, mapping non-success statuses to [`ClientError::Api`].
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error_from(status, response).await);
    }
    Ok(response.json().await?)
}

/// Like [`decode`] but treats 404 as `None`.
async fn decode_optional<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<Option<T>> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(api_error_from(status, response).await);
    }
    Ok(Some(response.json().await?))
}

/// Success (including empty 204 bodies) maps to `true`; 404 maps to `false`.
async fn accept_deleted(response: reqwest::Response) -> ClientResult<bool> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(false);
    }
    if !status.is_success() {
        return Err(api_error_from(status, response).await);
    }
    Ok(true)
}

async fn api_error_from(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
    let message = match response.json::<GoogleErrorEnvelope>().await {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    ClientError::api_error(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TasksApiClient::new(
            "https://tasks.googleapis.com/tasks/v1/",
            TokenManager::static_token("t"),
        );
        assert_eq!(client.base_url, "https://tasks.googleapis.com/tasks/v1");
    }

    #[test]
    fn test_collection_defaults_empty_items() {
        // Upstream omits "items" entirely for empty lists.
        let collection: Collection<TaskList> = serde_json::from_str("{}").unwrap();
        assert!(collection.items.is_empty());
    }

    #[test]
    fn test_google_error_envelope_shape() {
        let json = r#"{"error": {"code": 403, "message": "Rate limit exceeded"}}"#;
        let envelope: GoogleErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.message, "Rate limit exceeded");
    }
}
