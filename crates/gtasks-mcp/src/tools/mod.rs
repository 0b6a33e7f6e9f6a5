//! Tool parameter types and shared helpers.

pub mod helpers;
pub mod params;

pub use helpers::*;
pub use params::*;
