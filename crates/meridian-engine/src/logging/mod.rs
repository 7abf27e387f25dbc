//! Logger initialization.
//!
//! Centralizes logger setup behind the standard `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
