//! Task list CRUD.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use gtasks_shared::models::{TaskList, TaskListCreate, TaskListPatch};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TaskList>>, ApiError> {
    Ok(Json(state.tasks.list_task_lists().await?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Result<Json<TaskList>, ApiError> {
    state
        .tasks
        .get_task_list(&list_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Task list {list_id}")))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TaskListCreate>,
) -> Result<(StatusCode, Json<TaskList>), ApiError> {
    let created = state.tasks.create_task_list(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    Json(body): Json<TaskListPatch>,
) -> Result<Json<TaskList>, ApiError> {
    state
        .tasks
        .update_task_list(&list_id, &body)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Task list {list_id}")))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.tasks.delete_task_list(&list_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Task list {list_id}")))
    }
}
