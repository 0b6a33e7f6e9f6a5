//! Shared foundation for the gtasks bridge suite.
//!
//! Holds the data-transfer models mirroring the upstream Google Tasks and
//! Gmail resources, the unified [`ClientError`] type, configuration loading,
//! and the logging bootstrap used by every binary in the workspace.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;

pub use config::GtasksConfig;
pub use errors::{ClientError, ClientResult};
