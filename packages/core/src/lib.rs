// ABOUTME: Core types, constants, and utilities for Taskboard
// ABOUTME: Foundational package shared by storage, users, tasks, and the TUI

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    Outcome, Task, TaskCategory, TaskCreateInput, TaskPriority, TaskStatus, TaskUpdateInput, User,
    UserCreateInput,
};

// Re-export constants
pub use constants::{
    default_data_dir, store_file, CURRENT_USER_KEY, STORE_NAMESPACE, STORE_VERSION, TASKS_KEY,
    USERS_KEY,
};

// Re-export utilities
pub use utils::{backup_file_name, generate_id};

// Re-export validation
pub use validation::{
    require_username, truncate, validate_email, validate_full_name, validate_task_title, validate_username,
    ValidationError,
};
