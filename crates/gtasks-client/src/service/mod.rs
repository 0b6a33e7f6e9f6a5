//! Domain services layered over the raw API clients.
//!
//! The services add the operations the upstream APIs do not offer directly
//! (cross-list search, batch creation, structured email filters) and run
//! input validation before anything goes on the wire.

pub mod gmail;
pub mod tasks;

pub use gmail::GmailService;
pub use tasks::{TaskSearchHit, TasksService};
