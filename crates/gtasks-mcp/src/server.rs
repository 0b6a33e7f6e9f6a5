//! MCP ServerHandler implementation for the Google Tasks and Gmail bridge.
//!
//! **Task list tools**
//! - `get_task_lists` — List all task lists
//! - `get_task_list` — Get one task list by ID
//! - `create_task_list` / `update_task_list` / `delete_task_list`
//!
//! **Task tools**
//! - `get_tasks` — List tasks in a list, with completion filter
//! - `get_task` / `create_task` / `update_task` / `delete_task`
//! - `complete_task` / `uncomplete_task` — flip completion status
//! - `clear_completed_tasks` — purge completed tasks from a list
//!
//! **Search and batch**
//! - `search_tasks` — substring search over titles and notes
//! - `create_multiple_tasks` — sequential batch creation
//!
//! **Gmail tools**
//! - `send_email`, `read_email`, `search_emails`, `filter_emails`,
//!   `get_unread_emails`

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use gtasks_client::{
    GmailApiClient, GmailService, TasksApiClient, TasksService, TokenManager,
};
use gtasks_shared::errors::ClientResult;
use gtasks_shared::models::{
    FilterCriteria, OutgoingEmail, TaskCreate, TaskListCreate, TaskListPatch, TaskPatch,
};
use gtasks_shared::GtasksConfig;

use crate::tools::*;

/// MCP server handler bridging tool calls to the Google APIs.
#[derive(Debug, Clone)]
pub struct GtasksMcpServer {
    tool_router: ToolRouter<Self>,
    tasks: TasksService,
    gmail: GmailService,
}

impl GtasksMcpServer {
    /// Build from config, loading credentials from disk.
    pub fn from_config(config: &GtasksConfig) -> ClientResult<Self> {
        let credentials = config.credentials_path()?;
        let tokens = TokenManager::from_credentials_file(&credentials, &config.google.token_url)?;
        Ok(Self::with_tokens(config, tokens))
    }

    /// Build with an existing token manager. Used by tests.
    pub fn with_tokens(config: &GtasksConfig, tokens: TokenManager) -> Self {
        let tasks_api = TasksApiClient::new(&config.google.tasks_base_url, tokens.clone());
        let gmail_api = GmailApiClient::new(&config.google.gmail_base_url, tokens);
        Self {
            tool_router: Self::tool_router(),
            tasks: TasksService::new(tasks_api),
            gmail: GmailService::new(gmail_api),
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GtasksMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gtasks-mcp".to_string(),
                title: Some("Google Tasks & Gmail MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing Google Tasks CRUD, cross-list task search, \
                     and Gmail send/read/search operations"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage the user's Google Tasks and Gmail.\n\
                 Task lists: get_task_lists to discover list IDs, then get_tasks for \
                 their contents. create/update/delete tools mirror the upstream CRUD; \
                 complete_task and uncomplete_task flip a task's status; \
                 clear_completed_tasks permanently removes completed tasks from a list.\n\
                 search_tasks matches titles and notes case-insensitively across all \
                 lists (or one list via task_list_id). create_multiple_tasks adds \
                 several tasks in order and reports per-item failures.\n\
                 Email: search_emails takes a raw Gmail query, filter_emails takes \
                 structured criteria, get_unread_emails lists unread messages. Use \
                 read_email with a message ID for the full body. send_email sends \
                 from the authorized account.\n\
                 Due dates are RFC 3339 timestamps; statuses are 'needsAction' or \
                 'completed'. Tool failures return {\"error\", \"message\"} JSON."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl GtasksMcpServer {
    // ── task lists ──

    /// List all task lists for the authorized user.
    #[tool(
        name = "get_task_lists",
        description = "List all task lists for the authorized user. Returns list IDs, titles, and update timestamps. Start here to discover task_list_id values for the other tools."
    )]
    pub async fn get_task_lists(&self) -> String {
        match self.tasks.list_task_lists().await {
            Ok(lists) => ok_json(&lists),
            Err(e) => client_error_json(&e),
        }
    }

    /// Get a single task list by ID.
    #[tool(
        name = "get_task_list",
        description = "Get a single task list by ID, including its title and update timestamp."
    )]
    pub async fn get_task_list(
        &self,
        Parameters(params): Parameters<GetTaskListParams>,
    ) -> String {
        match self.tasks.get_task_list(&params.task_list_id).await {
            Ok(Some(list)) => ok_json(&list),
            Ok(None) => error_json(
                "not_found",
                &format!("Task list '{}' not found", params.task_list_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Create a new task list.
    #[tool(
        name = "create_task_list",
        description = "Create a new task list with the given title (1-100 characters). Returns the created list including its ID."
    )]
    pub async fn create_task_list(
        &self,
        Parameters(params): Parameters<CreateTaskListParams>,
    ) -> String {
        let body = TaskListCreate {
            title: params.title,
        };
        match self.tasks.create_task_list(&body).await {
            Ok(list) => ok_json(&list),
            Err(e) => client_error_json(&e),
        }
    }

    /// Rename a task list.
    #[tool(
        name = "update_task_list",
        description = "Rename an existing task list. Returns the updated list."
    )]
    pub async fn update_task_list(
        &self,
        Parameters(params): Parameters<UpdateTaskListParams>,
    ) -> String {
        let body = TaskListPatch {
            title: Some(params.title),
        };
        match self.tasks.update_task_list(&params.task_list_id, &body).await {
            Ok(Some(list)) => ok_json(&list),
            Ok(None) => error_json(
                "not_found",
                &format!("Task list '{}' not found", params.task_list_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Delete a task list and all its tasks.
    #[tool(
        name = "delete_task_list",
        description = "Delete a task list and every task in it. This is irreversible."
    )]
    pub async fn delete_task_list(
        &self,
        Parameters(params): Parameters<DeleteTaskListParams>,
    ) -> String {
        match self.tasks.delete_task_list(&params.task_list_id).await {
            Ok(true) => ok_json(&serde_json::json!({
                "success": true,
                "deleted_task_list_id": params.task_list_id,
            })),
            Ok(false) => error_json(
                "not_found",
                &format!("Task list '{}' not found", params.task_list_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    // ── tasks ──

    /// List tasks in a task list.
    #[tool(
        name = "get_tasks",
        description = "List tasks in a task list. Pass completed=true to include completed tasks, completed=false to exclude them, or omit it for the upstream defaults."
    )]
    pub async fn get_tasks(&self, Parameters(params): Parameters<GetTasksParams>) -> String {
        match self
            .tasks
            .list_tasks(&params.task_list_id, params.completed)
            .await
        {
            Ok(tasks) => ok_json(&tasks),
            Err(e) => client_error_json(&e),
        }
    }

    /// Get a single task.
    #[tool(
        name = "get_task",
        description = "Get a single task by list ID and task ID, including notes, status, and due date."
    )]
    pub async fn get_task(&self, Parameters(params): Parameters<GetTaskParams>) -> String {
        match self.tasks.get_task(&params.task_list_id, &params.task_id).await {
            Ok(Some(task)) => ok_json(&task),
            Ok(None) => error_json(
                "not_found",
                &format!("Task '{}' not found", params.task_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Create a task in a list.
    #[tool(
        name = "create_task",
        description = "Create a task in a list. Title is required (1-200 characters); notes, an RFC 3339 due date, a parent task ID (for subtasks), and a previous sibling ID (for ordering) are optional."
    )]
    pub async fn create_task(&self, Parameters(params): Parameters<CreateTaskParams>) -> String {
        let due = match parse_due(params.due.as_deref()) {
            Ok(due) => due,
            Err(e) => return e,
        };
        let body = TaskCreate {
            title: params.title,
            notes: params.notes,
            due,
            parent: params.parent,
            previous: params.previous,
        };
        match self.tasks.create_task(&params.task_list_id, &body).await {
            Ok(task) => ok_json(&task),
            Err(e) => client_error_json(&e),
        }
    }

    /// Update fields on an existing task.
    #[tool(
        name = "update_task",
        description = "Update an existing task. Any of title, notes, due (RFC 3339), and status ('needsAction' or 'completed') may be provided; omitted fields are left unchanged."
    )]
    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTaskParams>) -> String {
        let due = match parse_due(params.due.as_deref()) {
            Ok(due) => due,
            Err(e) => return e,
        };
        let status = match parse_status(params.status.as_deref()) {
            Ok(status) => status,
            Err(e) => return e,
        };
        let patch = TaskPatch {
            title: params.title,
            notes: params.notes,
            due,
            status,
        };
        if patch.is_empty() {
            return error_json("invalid_input", "No fields to update were provided");
        }

        match self
            .tasks
            .update_task(&params.task_list_id, &params.task_id, &patch)
            .await
        {
            Ok(Some(task)) => ok_json(&task),
            Ok(None) => error_json(
                "not_found",
                &format!("Task '{}' not found", params.task_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Delete a task.
    #[tool(
        name = "delete_task",
        description = "Delete a task from a list. This is irreversible."
    )]
    pub async fn delete_task(&self, Parameters(params): Parameters<DeleteTaskParams>) -> String {
        match self
            .tasks
            .delete_task(&params.task_list_id, &params.task_id)
            .await
        {
            Ok(true) => ok_json(&serde_json::json!({
                "success": true,
                "deleted_task_id": params.task_id,
            })),
            Ok(false) => error_json(
                "not_found",
                &format!("Task '{}' not found", params.task_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Mark a task as completed.
    #[tool(
        name = "complete_task",
        description = "Mark a task as completed. Returns the updated task."
    )]
    pub async fn complete_task(
        &self,
        Parameters(params): Parameters<TaskStatusParams>,
    ) -> String {
        match self
            .tasks
            .complete_task(&params.task_list_id, &params.task_id)
            .await
        {
            Ok(Some(task)) => ok_json(&task),
            Ok(None) => error_json(
                "not_found",
                &format!("Task '{}' not found", params.task_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Mark a completed task as needing action again.
    #[tool(
        name = "uncomplete_task",
        description = "Mark a completed task as needing action again. Returns the updated task."
    )]
    pub async fn uncomplete_task(
        &self,
        Parameters(params): Parameters<TaskStatusParams>,
    ) -> String {
        match self
            .tasks
            .uncomplete_task(&params.task_list_id, &params.task_id)
            .await
        {
            Ok(Some(task)) => ok_json(&task),
            Ok(None) => error_json(
                "not_found",
                &format!("Task '{}' not found", params.task_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Permanently remove all completed tasks from a list.
    #[tool(
        name = "clear_completed_tasks",
        description = "Permanently remove all completed tasks from a list. Open tasks are untouched. This is irreversible."
    )]
    pub async fn clear_completed_tasks(
        &self,
        Parameters(params): Parameters<ClearCompletedParams>,
    ) -> String {
        match self.tasks.clear_completed_tasks(&params.task_list_id).await {
            Ok(true) => ok_json(&serde_json::json!({
                "success": true,
                "task_list_id": params.task_list_id,
            })),
            Ok(false) => error_json(
                "not_found",
                &format!("Task list '{}' not found", params.task_list_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    // ── search / batch ──

    /// Search tasks by title and notes.
    #[tool(
        name = "search_tasks",
        description = "Search tasks by case-insensitive substring match over titles and notes. Searches every list unless task_list_id narrows it to one. Returns matches annotated with their list."
    )]
    pub async fn search_tasks(&self, Parameters(params): Parameters<SearchTasksParams>) -> String {
        match self
            .tasks
            .search_tasks(&params.query, params.task_list_id.as_deref())
            .await
        {
            Ok(hits) => ok_json(&serde_json::json!({
                "query": params.query,
                "result_count": hits.len(),
                "results": hits,
            })),
            Err(e) => client_error_json(&e),
        }
    }

    /// Create several tasks in one list.
    #[tool(
        name = "create_multiple_tasks",
        description = "Create several tasks in one list, in order. Failures on individual tasks do not abort the batch; the result reports created tasks and per-item errors."
    )]
    pub async fn create_multiple_tasks(
        &self,
        Parameters(params): Parameters<CreateMultipleTasksParams>,
    ) -> String {
        let mut specs = Vec::with_capacity(params.tasks.len());
        for spec in params.tasks {
            let due = match parse_due(spec.due.as_deref()) {
                Ok(due) => due,
                Err(e) => return e,
            };
            specs.push(TaskCreate {
                title: spec.title,
                notes: spec.notes,
                due,
                parent: None,
                previous: None,
            });
        }

        match self
            .tasks
            .create_many_tasks(&params.task_list_id, &specs)
            .await
        {
            Ok(outcome) => ok_json(&outcome),
            Err(e) => client_error_json(&e),
        }
    }

    // ── email ──

    /// Send an email from the authorized account.
    #[tool(
        name = "send_email",
        description = "Send an email from the authorized Gmail account. Requires at least one recipient, a subject, and a body; cc, bcc, and html are optional."
    )]
    pub async fn send_email(&self, Parameters(params): Parameters<SendEmailParams>) -> String {
        let email = OutgoingEmail {
            to: params.to,
            subject: params.subject,
            body: params.body,
            cc: params.cc,
            bcc: params.bcc,
            html: params.html.unwrap_or(false),
        };
        match self.gmail.send_email(&email).await {
            Ok(outcome) => ok_json(&outcome),
            Err(e) => client_error_json(&e),
        }
    }

    /// Read the full content of one email.
    #[tool(
        name = "read_email",
        description = "Read an email by message ID. Returns subject, sender, date, and the decoded plain-text body."
    )]
    pub async fn read_email(&self, Parameters(params): Parameters<ReadEmailParams>) -> String {
        match self.gmail.read_email(&params.message_id).await {
            Ok(Some(content)) => ok_json(&content),
            Ok(None) => error_json(
                "not_found",
                &format!("Message '{}' not found", params.message_id),
            ),
            Err(e) => client_error_json(&e),
        }
    }

    /// Search emails with a raw Gmail query.
    #[tool(
        name = "search_emails",
        description = "Search emails with a raw Gmail query string (supports operators like from:, subject:, has:attachment). Returns bare message references, or subject/sender summaries when include_content is true; use read_email for full bodies."
    )]
    pub async fn search_emails(
        &self,
        Parameters(params): Parameters<SearchEmailsParams>,
    ) -> String {
        match self
            .gmail
            .search_emails(
                &params.query,
                params.max_results,
                params.include_content.unwrap_or(false),
            )
            .await
        {
            Ok(results) => ok_json(&results),
            Err(e) => client_error_json(&e),
        }
    }

    /// Filter emails with structured criteria.
    #[tool(
        name = "filter_emails",
        description = "Filter emails with structured criteria (sender, subject, attachment presence, date range, read state, label). At least one criterion is required. Returns message summaries."
    )]
    pub async fn filter_emails(
        &self,
        Parameters(params): Parameters<FilterEmailsParams>,
    ) -> String {
        let criteria = FilterCriteria {
            from: params.from,
            subject: params.subject,
            has_attachment: params.has_attachment,
            after: params.after,
            before: params.before,
            is_read: params.is_read,
            label: params.label,
        };
        match self.gmail.filter_emails(&criteria, params.max_results).await {
            Ok(summaries) => ok_json(&summaries),
            Err(e) => client_error_json(&e),
        }
    }

    /// List unread emails.
    #[tool(
        name = "get_unread_emails",
        description = "List unread emails, most recent first. Returns message summaries with subject, sender, date, and snippet."
    )]
    pub async fn get_unread_emails(
        &self,
        Parameters(params): Parameters<GetUnreadEmailsParams>,
    ) -> String {
        match self.gmail.unread_emails(params.max_results).await {
            Ok(summaries) => ok_json(&summaries),
            Err(e) => client_error_json(&e),
        }
    }
}
