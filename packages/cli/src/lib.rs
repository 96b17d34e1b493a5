// ABOUTME: Library side of the `taskboard` binary
// ABOUTME: Environment configuration, logging setup, and the non-interactive commands

pub mod commands;
pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{init_logging, install_panic_hook, LogTarget};
