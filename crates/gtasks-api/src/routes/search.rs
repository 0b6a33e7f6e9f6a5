//! Cross-list task search.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub task_list_id: Option<String>,
}

pub async fn tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let hits = state
        .tasks
        .search_tasks(&params.query, params.task_list_id.as_deref())
        .await?;
    Ok(Json(json!({
        "query": params.query,
        "result_count": hits.len(),
        "results": hits,
    })))
}
