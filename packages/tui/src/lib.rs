//! Taskboard TUI - terminal front-end and session orchestration
//!
//! [`App`] wires storage, repositories, controllers and the task view
//! together, routes [`UiEvent`]s to them, and drives the ratatui event loop.

pub mod app;
pub mod debounce;
pub mod events;
pub mod keymap;
pub mod state;
pub mod ui;
pub mod view;

use std::path::PathBuf;
use taskboard_storage::{StorageConfig, StorageError};
use thiserror::Error;

pub use app::{App, AppParts, UiEvent};
pub use debounce::{SearchDebouncer, SEARCH_DEBOUNCE};
pub use state::UiState;
pub use view::{MessageKind, TaskView, View, ViewModel};

/// Failures that abort session start-up
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to open storage: {0}")]
    Storage(#[from] StorageError),
    #[error("Export path {} exists but is not a directory", .0.display())]
    ExportDir(PathBuf),
}

/// What [`App::initialize`] needs from the outside world
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export_dir: PathBuf,
}
