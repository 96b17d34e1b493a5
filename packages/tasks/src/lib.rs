// ABOUTME: Task management scoped to the logged-in user
// ABOUTME: Provides storage, filtering/sorting queries, and the task controller

pub mod controller;
pub mod query;
pub mod repository;

use taskboard_core::ValidationError;
use taskboard_storage::StorageError;
use thiserror::Error;

pub use controller::TaskController;
pub use query::{FilterCriteria, SortField, SortOrder, TaskQuery, TaskSort, TaskStats};
pub use repository::TaskRepository;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("No user is logged in")]
    NoCurrentUser,
    #[error("Task not found: {0}")]
    NotFound(String),
    #[error("Only the owner can delete task {0}")]
    NotOwner(String),
    #[error("Unknown assignee: {0}")]
    UnknownAssignee(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type TaskResult<T> = Result<T, TaskError>;
