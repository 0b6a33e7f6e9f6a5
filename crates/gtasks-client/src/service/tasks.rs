//! Task operations built on [`TasksApiClient`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use gtasks_shared::errors::{ClientError, ClientResult};
use gtasks_shared::models::{
    BatchOutcome, Task, TaskCreate, TaskList, TaskListCreate, TaskListPatch, TaskPatch, TaskStatus,
};

use crate::tasks_api::TasksApiClient;

/// A task found by cross-list search, annotated with its list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSearchHit {
    pub list_id: String,
    pub list_title: String,
    #[serde(flatten)]
    pub task: Task,
}

/// Validated task operations, including the derived ones the upstream API
/// has no endpoint for.
#[derive(Debug, Clone)]
pub struct TasksService {
    api: TasksApiClient,
}

impl TasksService {
    pub fn new(api: TasksApiClient) -> Self {
        Self { api }
    }

    pub async fn list_task_lists(&self) -> ClientResult<Vec<TaskList>> {
        self.api.list_task_lists().await
    }

    pub async fn get_task_list(&self, list_id: &str) -> ClientResult<Option<TaskList>> {
        self.api.get_task_list(list_id).await
    }

    pub async fn create_task_list(&self, body: &TaskListCreate) -> ClientResult<TaskList> {
        validate(body)?;
        self.api.create_task_list(body).await
    }

    pub async fn update_task_list(
        &self,
        list_id: &str,
        body: &TaskListPatch,
    ) -> ClientResult<Option<TaskList>> {
        validate(body)?;
        self.api.update_task_list(list_id, body).await
    }

    pub async fn delete_task_list(&self, list_id: &str) -> ClientResult<bool> {
        self.api.delete_task_list(list_id).await
    }

    pub async fn list_tasks(
        &self,
        list_id: &str,
        completed: Option<bool>,
    ) -> ClientResult<Vec<Task>> {
        self.api.list_tasks(list_id, completed).await
    }

    pub async fn get_task(&self, list_id: &str, task_id: &str) -> ClientResult<Option<Task>> {
        self.api.get_task(list_id, task_id).await
    }

    pub async fn create_task(&self, list_id: &str, body: &TaskCreate) -> ClientResult<Task> {
        validate(body)?;
        self.api.create_task(list_id, body).await
    }

    pub async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> ClientResult<Option<Task>> {
        validate(patch)?;
        self.api.update_task(list_id, task_id, patch).await
    }

    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> ClientResult<bool> {
        self.api.delete_task(list_id, task_id).await
    }

    /// Mark a task completed.
    pub async fn complete_task(&self, list_id: &str, task_id: &str) -> ClientResult<Option<Task>> {
        self.api
            .update_task(list_id, task_id, &TaskPatch::status_only(TaskStatus::Completed))
            .await
    }

    /// Flip a completed task back to needing action.
    pub async fn uncomplete_task(
        &self,
        list_id: &str,
        task_id: &str,
    ) -> ClientResult<Option<Task>> {
        self.api
            .update_task(
                list_id,
                task_id,
                &TaskPatch::status_only(TaskStatus::NeedsAction),
            )
            .await
    }

    pub async fn clear_completed_tasks(&self, list_id: &str) -> ClientResult<bool> {
        self.api.clear_completed(list_id).await
    }

    /// Case-insensitive substring search over task titles and notes, in one
    /// list or across every list. Lists that cannot be read are skipped with
    /// a warning so one bad list does not sink the whole search.
    pub async fn search_tasks(
        &self,
        query: &str,
        task_list_id: Option<&str>,
    ) -> ClientResult<Vec<TaskSearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ClientError::InvalidInput(
                "Search query must not be empty".to_string(),
            ));
        }

        let lists = match task_list_id {
            Some(list_id) => match self.api.get_task_list(list_id).await? {
                Some(list) => vec![list],
                None => {
                    return Err(ClientError::api_error(
                        404,
                        format!("Task list {list_id} not found"),
                    ))
                }
            },
            None => self.api.list_task_lists().await?,
        };

        let mut hits = Vec::new();
        for list in lists {
            let tasks = match self.api.list_tasks(&list.id, Some(true)).await {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!(list_id = %list.id, error = %e, "Skipping unreadable list during search");
                    continue;
                }
            };
            for task in tasks {
                if task_matches(&task, &needle) {
                    hits.push(TaskSearchHit {
                        list_id: list.id.clone(),
                        list_title: list.title.clone(),
                        task,
                    });
                }
            }
        }
        Ok(hits)
    }

    /// Create several tasks in one list, collecting per-item failures
    /// instead of aborting on the first.
    pub async fn create_many_tasks(
        &self,
        list_id: &str,
        items: &[TaskCreate],
    ) -> ClientResult<BatchOutcome> {
        if items.is_empty() {
            return Err(ClientError::InvalidInput(
                "Batch must contain at least one task".to_string(),
            ));
        }

        let mut created_tasks = Vec::new();
        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.create_task(list_id, item).await {
                Ok(task) => created_tasks.push(task),
                Err(e) => errors.push(format!("task {index}: {e}")),
            }
        }

        Ok(BatchOutcome {
            created_count: created_tasks.len(),
            success: errors.is_empty(),
            created_tasks,
            errors,
        })
    }
}

fn task_matches(task: &Task, needle: &str) -> bool {
    if task.title.to_lowercase().contains(needle) {
        return true;
    }
    task.notes
        .as_deref()
        .is_some_and(|notes| notes.to_lowercase().contains(needle))
}

fn validate<T: Validate>(body: &T) -> ClientResult<()> {
    body.validate()
        .map_err(|e| ClientError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, notes: Option<&str>) -> Task {
        Task {
            id: "t".to_string(),
            title: title.to_string(),
            notes: notes.map(str::to_string),
            status: TaskStatus::NeedsAction,
            due: None,
            updated: None,
            completed: None,
            parent: None,
            position: None,
            hidden: None,
            deleted: None,
            self_link: None,
            kind: None,
            etag: None,
            links: None,
        }
    }

    #[test]
    fn test_task_matches_title_case_insensitive() {
        let t = task("Buy MILK and eggs", None);
        assert!(task_matches(&t, "milk"));
        assert!(!task_matches(&t, "bread"));
    }

    #[test]
    fn test_task_matches_notes() {
        let t = task("Errand", Some("pick up the Dry Cleaning"));
        assert!(task_matches(&t, "dry cleaning"));
    }

    #[test]
    fn test_validate_maps_to_invalid_input() {
        let bad = TaskListCreate {
            title: String::new(),
        };
        let err = validate(&bad).unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_search_hit_serializes_flat() {
        let hit = TaskSearchHit {
            list_id: "l1".to_string(),
            list_title: "Groceries".to_string(),
            task: task("Buy milk", None),
        };
        let value = serde_json::to_value(&hit).unwrap();
        // Task fields sit alongside the list annotation, not nested.
        assert_eq!(value["list_id"], "l1");
        assert_eq!(value["title"], "Buy milk");
        assert!(value.get("task").is_none());
    }
}
