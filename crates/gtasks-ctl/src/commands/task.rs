//! Task command handlers for the gtasks CLI

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use gtasks_shared::errors::{ClientError, ClientResult};
use gtasks_shared::models::task::{Task, TaskCreate, TaskPatch, TaskStatus};
use gtasks_shared::GtasksConfig;

use crate::commands::{print_json, tasks_service};
use crate::output;
use crate::TaskCommands;

pub(crate) async fn handle_task_command(
    cmd: TaskCommands,
    config: &GtasksConfig,
) -> ClientResult<()> {
    let service = tasks_service(config)?;

    match cmd {
        TaskCommands::List {
            list_id,
            completed,
            json,
        } => match service.list_tasks(&list_id, completed).await {
            Ok(tasks) => {
                if json {
                    return print_json(&tasks);
                }
                if tasks.is_empty() {
                    output::warning("No tasks found");
                    return Ok(());
                }
                output::header(format!("Tasks in {list_id} ({})", tasks.len()));
                for task in &tasks {
                    print_task_line(task);
                }
            }
            Err(e) => {
                output::error(format!("Failed to list tasks: {e}"));
                return Err(e);
            }
        },
        TaskCommands::Get {
            list_id,
            task_id,
            json,
        } => match service.get_task(&list_id, &task_id).await {
            Ok(Some(task)) => {
                if json {
                    return print_json(&task);
                }
                print_task_details(&task);
            }
            Ok(None) => return Err(report_missing_task(&list_id, &task_id)),
            Err(e) => {
                output::error(format!("Failed to get task: {e}"));
                return Err(e);
            }
        },
        TaskCommands::Create {
            list_id,
            title,
            notes,
            due,
            parent,
            previous,
        } => {
            let due = parse_due_arg(due.as_deref())?;
            let body = TaskCreate {
                title,
                notes,
                due,
                parent,
                previous,
            };
            match service.create_task(&list_id, &body).await {
                Ok(task) => {
                    output::success("Task created");
                    print_task_details(&task);
                }
                Err(e) => {
                    output::error(format!("Failed to create task: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Update {
            list_id,
            task_id,
            title,
            notes,
            due,
            status,
        } => {
            let due = parse_due_arg(due.as_deref())?;
            let status = match status.as_deref() {
                Some(raw) => Some(TaskStatus::from_str(raw).map_err(|e| {
                    let err = ClientError::InvalidInput(e);
                    output::error(format!("{err}"));
                    err
                })?),
                None => None,
            };
            let patch = TaskPatch {
                title,
                notes,
                due,
                status,
            };
            if patch.is_empty() {
                let err = ClientError::InvalidInput(
                    "No fields to update were provided".to_string(),
                );
                output::error(format!("{err}"));
                output::muted("Pass at least one of --title, --notes, --due, --status");
                return Err(err);
            }
            match service.update_task(&list_id, &task_id, &patch).await {
                Ok(Some(task)) => {
                    output::success("Task updated");
                    print_task_details(&task);
                }
                Ok(None) => return Err(report_missing_task(&list_id, &task_id)),
                Err(e) => {
                    output::error(format!("Failed to update task: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Delete { list_id, task_id } => {
            match service.delete_task(&list_id, &task_id).await {
                Ok(true) => output::success(format!("Deleted task {task_id}")),
                Ok(false) => {
                    output::warning(format!("Task {task_id} not found, nothing deleted"));
                }
                Err(e) => {
                    output::error(format!("Failed to delete task: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Complete { list_id, task_id } => {
            match service.complete_task(&list_id, &task_id).await {
                Ok(Some(task)) => output::success(format!("Completed: {}", task.title)),
                Ok(None) => return Err(report_missing_task(&list_id, &task_id)),
                Err(e) => {
                    output::error(format!("Failed to complete task: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Uncomplete { list_id, task_id } => {
            match service.uncomplete_task(&list_id, &task_id).await {
                Ok(Some(task)) => output::success(format!("Reopened: {}", task.title)),
                Ok(None) => return Err(report_missing_task(&list_id, &task_id)),
                Err(e) => {
                    output::error(format!("Failed to uncomplete task: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Clear { list_id } => match service.clear_completed_tasks(&list_id).await {
            Ok(_) => output::success(format!("Cleared completed tasks from {list_id}")),
            Err(e) => {
                output::error(format!("Failed to clear completed tasks: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn report_missing_task(list_id: &str, task_id: &str) -> ClientError {
    output::error(format!("Task {task_id} not found in list {list_id}"));
    ClientError::api_error(404, format!("Task {task_id} not found"))
}

fn print_task_line(task: &Task) {
    let glyph = if task.is_completed() { "✓" } else { "○" };
    match &task.due {
        Some(due) => output::item(format!(
            "{glyph} {} ({}) due {}",
            task.title,
            task.id,
            due.format("%Y-%m-%d")
        )),
        None => output::item(format!("{glyph} {} ({})", task.title, task.id)),
    }
}

fn print_task_details(task: &Task) {
    output::label("  ID", &task.id);
    output::label("  Title", &task.title);
    output::label("  Status", task.status);
    if let Some(notes) = &task.notes {
        output::label("  Notes", notes);
    }
    if let Some(due) = task.due {
        output::label("  Due", due.to_rfc3339());
    }
    if let Some(completed) = task.completed {
        output::label("  Completed", completed.to_rfc3339());
    }
    if let Some(updated) = task.updated {
        output::label("  Updated", updated.to_rfc3339());
    }
    if let Some(parent) = &task.parent {
        output::label("  Parent", parent);
    }
}

/// Parse a `--due` argument as RFC 3339, falling back to a bare date at
/// midnight UTC. Reports the failure before returning it.
fn parse_due_arg(raw: Option<&str>) -> ClientResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match parse_due(raw) {
        Some(due) => Ok(Some(due)),
        None => {
            let err = ClientError::InvalidInput(format!(
                "Invalid due date '{raw}', expected RFC 3339 or YYYY-MM-DD"
            ));
            output::error(format!("{err}"));
            Err(err)
        }
    }
}

fn parse_due(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(DateTime::from_naive_utc_and_offset(
        date.and_hms_opt(0, 0, 0)?,
        Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_rfc3339() {
        let due = parse_due("2026-09-01T12:30:00Z").unwrap();
        assert_eq!(due.to_rfc3339(), "2026-09-01T12:30:00+00:00");
    }

    #[test]
    fn test_parse_due_offset_normalized_to_utc() {
        let due = parse_due("2026-09-01T12:30:00+02:00").unwrap();
        assert_eq!(due.to_rfc3339(), "2026-09-01T10:30:00+00:00");
    }

    #[test]
    fn test_parse_due_bare_date() {
        let due = parse_due("2026-09-01").unwrap();
        assert_eq!(due.to_rfc3339(), "2026-09-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_due_rejects_garbage() {
        assert!(parse_due("next tuesday").is_none());
        assert!(parse_due("").is_none());
    }
}
