//! Data-transfer models mirroring the upstream Google resources.
//!
//! These are passive records: deserialized from upstream responses, reshaped,
//! and re-serialized on our own REST and MCP surfaces. Write models carry
//! `validator` constraints so bad input is rejected before an upstream call.

pub mod gmail;
pub mod task;

pub use gmail::*;
pub use task::*;
