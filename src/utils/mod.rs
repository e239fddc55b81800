//! Utility functions

pub mod logging;
pub mod parse;

pub use logging::{init_tracing, LoggingConfig};
pub use parse::*;
