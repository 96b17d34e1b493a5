use std::env;
use std::path::{Path, PathBuf};

/// Namespace written into the store document
pub const STORE_NAMESPACE: &str = "taskAppDay2";

/// Current version of the store document format
pub const STORE_VERSION: &str = "2.0";

/// Storage key holding the persisted session record
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Storage key holding all registered users
pub const USERS_KEY: &str = "users";

/// Storage key holding all tasks
pub const TASKS_KEY: &str = "tasks";

const STORE_FILE_NAME: &str = "store.json";

/// Get the default data directory (~/.taskboard)
pub fn default_data_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".taskboard")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".taskboard")
    }
}

/// Get the path to the store document inside a data directory
pub fn store_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_file_lives_in_data_dir() {
        let dir = PathBuf::from("/tmp/taskboard-test");
        assert_eq!(store_file(&dir), dir.join("store.json"));
    }

    #[test]
    fn test_default_data_dir_name() {
        assert!(default_data_dir().ends_with(".taskboard"));
    }
}
