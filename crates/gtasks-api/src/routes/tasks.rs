//! Task CRUD plus the derived completion and batch endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use gtasks_shared::models::{BatchOutcome, Task, TaskCreate, TaskPatch};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `true` includes completed tasks, `false` excludes them, absent keeps
    /// the upstream defaults.
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub tasks: Vec<TaskCreate>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.tasks.list_tasks(&list_id, params.completed).await?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks
        .get_task(&list_id, &task_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Task {task_id}")))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    Json(body): Json<TaskCreate>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = state.tasks.create_task(&list_id, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(body): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks
        .update_task(&list_id, &task_id, &body)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Task {task_id}")))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    if state.tasks.delete_task(&list_id, &task_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Task {task_id}")))
    }
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks
        .complete_task(&list_id, &task_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Task {task_id}")))
}

pub async fn uncomplete(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks
        .uncomplete_task(&list_id, &task_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Task {task_id}")))
}

pub async fn clear_completed(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.tasks.clear_completed_tasks(&list_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Task list {list_id}")))
    }
}

pub async fn batch(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    Json(body): Json<BatchBody>,
) -> Result<(StatusCode, Json<BatchOutcome>), ApiError> {
    let outcome = state.tasks.create_many_tasks(&list_id, &body.tasks).await?;
    // Only a clean batch is a 201; partial or total failure reports 200 with
    // the per-item errors in the body.
    let status = if outcome.errors.is_empty() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}
