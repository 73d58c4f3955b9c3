//! Utility modules
//!
//! - **error**: Crate-level error type and `Result` alias
//! - **logging**: `tracing` subscriber setup

pub mod error;
pub mod logging;

pub use error::{FailoverError, Result};
pub use logging::init_logging;
