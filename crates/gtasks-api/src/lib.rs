//! REST API server for the Google Tasks and Gmail bridge.
//!
//! Endpoints:
//!   GET    /
//!   GET    /health
//!   GET    /task-lists               POST /task-lists
//!   GET    /task-lists/{id}          PUT/DELETE /task-lists/{id}
//!   GET    /task-lists/{id}/tasks    POST /task-lists/{id}/tasks
//!   POST   /task-lists/{id}/tasks/batch
//!   DELETE /task-lists/{id}/tasks/completed
//!   GET    /task-lists/{id}/tasks/{task_id}   PUT/DELETE likewise
//!   PATCH  /task-lists/{id}/tasks/{task_id}/complete
//!   PATCH  /task-lists/{id}/tasks/{task_id}/uncomplete
//!   GET    /search/tasks
//!   POST   /emails/send   POST /emails/filter
//!   GET    /emails        GET  /emails/unread   GET /emails/{id}

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
