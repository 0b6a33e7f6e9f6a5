//! Typed clients for the Google Tasks and Gmail v1 APIs.
//!
//! [`TasksApiClient`] and [`GmailApiClient`] are thin wrappers over the
//! upstream REST endpoints. [`TokenManager`] supplies bearer tokens,
//! refreshing them from a stored OAuth refresh token when needed. The
//! [`service`] layer adds the derived operations (search, batch create,
//! status flips) the upstream does not offer directly.

pub mod auth;
pub mod gmail_api;
pub mod service;
pub mod tasks_api;

pub use auth::TokenManager;
pub use gmail_api::{GmailApiClient, MessageFormat};
pub use service::{GmailService, TasksService};
pub use tasks_api::TasksApiClient;
