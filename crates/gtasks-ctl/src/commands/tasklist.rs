//! Task list command handlers for the gtasks CLI

use gtasks_shared::errors::ClientResult;
use gtasks_shared::models::task::{TaskListCreate, TaskListPatch};
use gtasks_shared::GtasksConfig;

use crate::commands::{print_json, tasks_service};
use crate::output;
use crate::TasklistCommands;

pub(crate) async fn handle_tasklist_command(
    cmd: TasklistCommands,
    config: &GtasksConfig,
) -> ClientResult<()> {
    let service = tasks_service(config)?;

    match cmd {
        TasklistCommands::List { json } => match service.list_task_lists().await {
            Ok(lists) => {
                if json {
                    return print_json(&lists);
                }
                if lists.is_empty() {
                    output::warning("No task lists found");
                    return Ok(());
                }
                output::header(format!("Task lists ({})", lists.len()));
                for list in &lists {
                    output::item(format!("{} ({})", list.title, list.id));
                }
            }
            Err(e) => {
                output::error(format!("Failed to list task lists: {e}"));
                return Err(e);
            }
        },
        TasklistCommands::Get { list_id, json } => match service.get_task_list(&list_id).await {
            Ok(Some(list)) => {
                if json {
                    return print_json(&list);
                }
                output::header("Task list");
                output::label("  ID", &list.id);
                output::label("  Title", &list.title);
                if let Some(updated) = list.updated {
                    output::label("  Updated", updated.to_rfc3339());
                }
            }
            Ok(None) => {
                output::error(format!("Task list {list_id} not found"));
                return Err(gtasks_shared::errors::ClientError::api_error(
                    404,
                    format!("Task list {list_id} not found"),
                ));
            }
            Err(e) => {
                output::error(format!("Failed to get task list: {e}"));
                return Err(e);
            }
        },
        TasklistCommands::Create { title } => {
            let body = TaskListCreate { title };
            match service.create_task_list(&body).await {
                Ok(list) => {
                    output::success("Task list created");
                    output::label("  ID", &list.id);
                    output::label("  Title", &list.title);
                }
                Err(e) => {
                    output::error(format!("Failed to create task list: {e}"));
                    return Err(e);
                }
            }
        }
        TasklistCommands::Update { list_id, title } => {
            let patch = TaskListPatch { title: Some(title) };
            match service.update_task_list(&list_id, &patch).await {
                Ok(Some(list)) => {
                    output::success("Task list updated");
                    output::label("  ID", &list.id);
                    output::label("  Title", &list.title);
                }
                Ok(None) => {
                    output::error(format!("Task list {list_id} not found"));
                    return Err(gtasks_shared::errors::ClientError::api_error(
                        404,
                        format!("Task list {list_id} not found"),
                    ));
                }
                Err(e) => {
                    output::error(format!("Failed to update task list: {e}"));
                    return Err(e);
                }
            }
        }
        TasklistCommands::Delete { list_id } => match service.delete_task_list(&list_id).await {
            Ok(true) => output::success(format!("Deleted task list {list_id}")),
            Ok(false) => {
                output::warning(format!("Task list {list_id} not found, nothing deleted"));
            }
            Err(e) => {
                output::error(format!("Failed to delete task list: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
