//! Gmail endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use gtasks_shared::models::{
    EmailContent, EmailSearchResults, FilterCriteria, MessageSummary, OutgoingEmail, SendOutcome,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub max_results: Option<u32>,
    /// Hydrate matches into summaries instead of returning bare references.
    #[serde(default)]
    pub include_content: bool,
}

#[derive(Debug, Deserialize)]
pub struct UnreadParams {
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FilterBody {
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    pub max_results: Option<u32>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EmailSearchResults>, ApiError> {
    Ok(Json(
        state
            .gmail
            .search_emails(&params.query, params.max_results, params.include_content)
            .await?,
    ))
}

pub async fn unread(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UnreadParams>,
) -> Result<Json<Vec<MessageSummary>>, ApiError> {
    Ok(Json(state.gmail.unread_emails(params.max_results).await?))
}

pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> Result<Json<EmailContent>, ApiError> {
    state
        .gmail
        .read_email(&message_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Message {message_id}")))
}

pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OutgoingEmail>,
) -> Result<(StatusCode, Json<SendOutcome>), ApiError> {
    let outcome = state.gmail.send_email(&body).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn filter(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilterBody>,
) -> Result<Json<Vec<MessageSummary>>, ApiError> {
    Ok(Json(
        state
            .gmail
            .filter_emails(&body.criteria, body.max_results)
            .await?,
    ))
}
