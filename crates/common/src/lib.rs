//! Shared building blocks for the quiz portal workspace
//!
//! Holds the configuration error type used by service config loading and the
//! `Secret` wrapper that keeps session tokens and passwords out of logs.

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
