//! Parameter structs for all MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

// ── task list tools ──

/// Parameters for the `get_task_list` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTaskListParams {
    #[schemars(description = "ID of the task list")]
    pub task_list_id: String,
}

/// Parameters for the `create_task_list` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTaskListParams {
    #[schemars(description = "Title of the new task list (1-100 characters)")]
    pub title: String,
}

/// Parameters for the `update_task_list` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskListParams {
    #[schemars(description = "ID of the task list to update")]
    pub task_list_id: String,
    #[schemars(description = "New title for the task list (1-100 characters)")]
    pub title: String,
}

/// Parameters for the `delete_task_list` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteTaskListParams {
    #[schemars(description = "ID of the task list to delete")]
    pub task_list_id: String,
}

// ── task tools ──

/// Parameters for the `get_tasks` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTasksParams {
    #[schemars(description = "ID of the task list to read")]
    pub task_list_id: String,
    #[schemars(
        description = "true to include completed tasks, false to exclude them; omit for upstream defaults"
    )]
    pub completed: Option<bool>,
}

/// Parameters for the `get_task` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTaskParams {
    #[schemars(description = "ID of the task list containing the task")]
    pub task_list_id: String,
    #[schemars(description = "ID of the task")]
    pub task_id: String,
}

/// Parameters for the `create_task` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "ID of the task list to add the task to")]
    pub task_list_id: String,
    #[schemars(description = "Task title (1-200 characters)")]
    pub title: String,
    #[schemars(description = "Optional notes (up to 8192 characters)")]
    pub notes: Option<String>,
    #[schemars(description = "Optional due date as an RFC 3339 timestamp")]
    pub due: Option<String>,
    #[schemars(description = "Optional parent task ID for creating a subtask")]
    pub parent: Option<String>,
    #[schemars(description = "Optional sibling task ID to position this task after")]
    pub previous: Option<String>,
}

/// Parameters for the `update_task` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(description = "ID of the task list containing the task")]
    pub task_list_id: String,
    #[schemars(description = "ID of the task to update")]
    pub task_id: String,
    #[schemars(description = "New title (1-200 characters)")]
    pub title: Option<String>,
    #[schemars(description = "New notes (up to 8192 characters)")]
    pub notes: Option<String>,
    #[schemars(description = "New due date as an RFC 3339 timestamp")]
    pub due: Option<String>,
    #[schemars(description = "New status: 'needsAction' or 'completed'")]
    pub status: Option<String>,
}

/// Parameters for the `delete_task` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteTaskParams {
    #[schemars(description = "ID of the task list containing the task")]
    pub task_list_id: String,
    #[schemars(description = "ID of the task to delete")]
    pub task_id: String,
}

/// Parameters for the `complete_task` and `uncomplete_task` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskStatusParams {
    #[schemars(description = "ID of the task list containing the task")]
    pub task_list_id: String,
    #[schemars(description = "ID of the task")]
    pub task_id: String,
}

/// Parameters for the `clear_completed_tasks` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClearCompletedParams {
    #[schemars(description = "ID of the task list to clear completed tasks from")]
    pub task_list_id: String,
}

// ── search / batch tools ──

/// Parameters for the `search_tasks` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchTasksParams {
    #[schemars(description = "Text to match against task titles and notes (case-insensitive)")]
    pub query: String,
    #[schemars(description = "Optional task list ID to limit the search to one list")]
    pub task_list_id: Option<String>,
}

/// One task in a `create_multiple_tasks` batch.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskSpecParam {
    #[schemars(description = "Task title (1-200 characters)")]
    pub title: String,
    #[schemars(description = "Optional notes")]
    pub notes: Option<String>,
    #[schemars(description = "Optional due date as an RFC 3339 timestamp")]
    pub due: Option<String>,
}

/// Parameters for the `create_multiple_tasks` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateMultipleTasksParams {
    #[schemars(description = "ID of the task list to add the tasks to")]
    pub task_list_id: String,
    #[schemars(description = "Tasks to create, in order")]
    pub tasks: Vec<TaskSpecParam>,
}

// ── email tools ──

/// Parameters for the `send_email` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SendEmailParams {
    #[schemars(description = "Recipient email addresses")]
    pub to: Vec<String>,
    #[schemars(description = "Email subject line")]
    pub subject: String,
    #[schemars(description = "Email body text")]
    pub body: String,
    #[schemars(description = "Optional CC addresses")]
    #[serde(default)]
    pub cc: Vec<String>,
    #[schemars(description = "Optional BCC addresses")]
    #[serde(default)]
    pub bcc: Vec<String>,
    #[schemars(description = "Send the body as HTML instead of plain text")]
    pub html: Option<bool>,
}

/// Parameters for the `read_email` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadEmailParams {
    #[schemars(description = "Gmail message ID to read")]
    pub message_id: String,
}

/// Parameters for the `search_emails` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchEmailsParams {
    #[schemars(description = "Gmail search query (supports operators like from:, subject:)")]
    pub query: String,
    #[schemars(description = "Maximum number of results (default 10, capped at 100)")]
    pub max_results: Option<u32>,
    #[schemars(
        description = "Fetch subject/sender/snippet per match instead of bare message references (default false)"
    )]
    pub include_content: Option<bool>,
}

/// Parameters for the `filter_emails` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FilterEmailsParams {
    #[schemars(description = "Only messages from this sender")]
    pub from: Option<String>,
    #[schemars(description = "Only messages whose subject contains this text")]
    pub subject: Option<String>,
    #[schemars(description = "Only messages with attachments")]
    pub has_attachment: Option<bool>,
    #[schemars(description = "Only messages after this date (YYYY/MM/DD)")]
    pub after: Option<String>,
    #[schemars(description = "Only messages before this date (YYYY/MM/DD)")]
    pub before: Option<String>,
    #[schemars(description = "true for read messages only, false for unread only")]
    pub is_read: Option<bool>,
    #[schemars(description = "Only messages carrying this label")]
    pub label: Option<String>,
    #[schemars(description = "Maximum number of results (default 10, capped at 100)")]
    pub max_results: Option<u32>,
}

/// Parameters for the `get_unread_emails` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetUnreadEmailsParams {
    #[schemars(description = "Maximum number of results (default 10, capped at 100)")]
    pub max_results: Option<u32>,
}
