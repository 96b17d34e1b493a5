// ABOUTME: User management for Taskboard
// ABOUTME: Repository over the `users` storage key plus the login/registration controller

pub mod controller;
pub mod repository;

use taskboard_core::ValidationError;
use taskboard_storage::StorageError;
use thiserror::Error;

pub use controller::{UserController, UserService};
pub use repository::{UserRepository, UserUpdateInput};

#[derive(Error, Debug)]
pub enum UserError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type UserResult<T> = Result<T, UserError>;
