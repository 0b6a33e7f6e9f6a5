//! Router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod emails;
pub mod health;
pub mod search;
pub mod task_lists;
pub mod tasks;

pub fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/task-lists",
            get(task_lists::list).post(task_lists::create),
        )
        .route(
            "/task-lists/{list_id}",
            get(task_lists::get_one)
                .put(task_lists::update)
                .delete(task_lists::remove),
        )
        .route(
            "/task-lists/{list_id}/tasks",
            get(tasks::list).post(tasks::create),
        )
        .route("/task-lists/{list_id}/tasks/batch", post(tasks::batch))
        .route(
            "/task-lists/{list_id}/tasks/completed",
            delete(tasks::clear_completed),
        )
        .route(
            "/task-lists/{list_id}/tasks/{task_id}",
            get(tasks::get_one).put(tasks::update).delete(tasks::remove),
        )
        .route(
            "/task-lists/{list_id}/tasks/{task_id}/complete",
            patch(tasks::complete),
        )
        .route(
            "/task-lists/{list_id}/tasks/{task_id}/uncomplete",
            patch(tasks::uncomplete),
        )
        .route("/search/tasks", get(search::tasks))
        .route("/emails", get(emails::search))
        .route("/emails/unread", get(emails::unread))
        .route("/emails/send", post(emails::send))
        .route("/emails/filter", post(emails::filter))
        .route("/emails/{message_id}", get(emails::read))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
