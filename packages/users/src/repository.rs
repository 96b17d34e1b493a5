// ABOUTME: User repository backed by the storage manager
// ABOUTME: CRUD and lookup operations over the `users` key

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskboard_core::{generate_id, require_username, User, UserCreateInput, USERS_KEY};
use taskboard_storage::StorageManager;
use tracing::{debug, info};

use crate::{UserError, UserResult};

/// Profile fields that may change after registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateInput {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

pub struct UserRepository {
    storage: Arc<StorageManager>,
}

impl UserRepository {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self { storage }
    }

    fn read_all(&self) -> Vec<User> {
        self.storage.load(USERS_KEY, Vec::new())
    }

    fn write_all(&self, users: &[User]) -> UserResult<()> {
        self.storage.save(USERS_KEY, users)?;
        Ok(())
    }

    pub fn find_all(&self) -> Vec<User> {
        self.read_all()
    }

    pub fn count(&self) -> usize {
        self.read_all().len()
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.read_all().into_iter().find(|u| u.id == id)
    }

    /// Usernames compare case-insensitively
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let wanted = username.trim().to_lowercase();
        self.read_all()
            .into_iter()
            .find(|u| u.username.to_lowercase() == wanted)
    }

    pub fn create(&self, input: UserCreateInput) -> UserResult<User> {
        let username = require_username(&input.username)?.to_string();
        let mut users = self.read_all();

        if users
            .iter()
            .any(|u| u.username.to_lowercase() == username.to_lowercase())
        {
            return Err(UserError::DuplicateUsername(username));
        }

        let now = Utc::now();
        let user = User {
            id: generate_id(),
            username,
            full_name: non_blank(input.full_name),
            email: non_blank(input.email),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        users.push(user.clone());
        self.write_all(&users)?;

        info!("Created user '{}' with ID {}", user.username, user.id);
        Ok(user)
    }

    pub fn update(&self, id: &str, input: UserUpdateInput) -> UserResult<User> {
        self.modify(id, |user| {
            if let Some(email) = input.email {
                user.email = non_blank(Some(email));
            }
            if let Some(full_name) = input.full_name {
                user.full_name = non_blank(Some(full_name));
            }
        })
    }

    /// Stamp `last_login_at` with the current time
    pub fn touch_login(&self, id: &str) -> UserResult<User> {
        self.modify(id, |user| user.last_login_at = Some(Utc::now()))
    }

    pub fn delete(&self, id: &str) -> UserResult<bool> {
        let mut users = self.read_all();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Ok(false);
        }
        self.write_all(&users)?;
        info!("Deleted user {}", id);
        Ok(true)
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut User)) -> UserResult<User> {
        let mut users = self.read_all();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        change(user);
        user.updated_at = Utc::now();
        let updated = user.clone();

        self.write_all(&users)?;
        debug!("Updated user {}", id);
        Ok(updated)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::ValidationError;

    fn repository() -> UserRepository {
        UserRepository::new(Arc::new(StorageManager::in_memory()))
    }

    fn input(username: &str) -> UserCreateInput {
        UserCreateInput {
            username: username.to_string(),
            email: None,
            full_name: None,
        }
    }

    #[test]
    fn test_create_and_find() {
        let repo = repository();
        let user = repo
            .create(UserCreateInput {
                username: "demo".to_string(),
                email: Some("demo@example.com".to_string()),
                full_name: Some("Demo User".to_string()),
            })
            .unwrap();

        assert_eq!(repo.count(), 1);
        assert_eq!(repo.find_by_id(&user.id).unwrap().username, "demo");
        assert_eq!(repo.find_by_username("DEMO").unwrap().id, user.id);
        assert!(repo.find_by_username("nobody").is_none());
    }

    #[test]
    fn test_duplicate_username_is_case_insensitive() {
        let repo = repository();
        repo.create(input("budi")).unwrap();
        match repo.create(input("Budi")) {
            Err(UserError::DuplicateUsername(name)) => assert_eq!(name, "Budi"),
            other => panic!("Expected DuplicateUsername, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_username_rejected() {
        let repo = repository();
        assert!(matches!(
            repo.create(input("  ")),
            Err(UserError::Validation(ValidationError::EmptyUsername))
        ));
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_blank_optional_fields_stored_as_none() {
        let repo = repository();
        let user = repo
            .create(UserCreateInput {
                username: "sari".to_string(),
                email: Some("   ".to_string()),
                full_name: Some(String::new()),
            })
            .unwrap();
        assert!(user.email.is_none());
        assert!(user.full_name.is_none());
    }

    #[test]
    fn test_update_and_touch_login() {
        let repo = repository();
        let user = repo.create(input("demo")).unwrap();

        let updated = repo
            .update(
                &user.id,
                UserUpdateInput {
                    email: None,
                    full_name: Some("Demo Person".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.full_name.as_deref(), Some("Demo Person"));

        let logged_in = repo.touch_login(&user.id).unwrap();
        assert!(logged_in.last_login_at.is_some());

        assert!(matches!(
            repo.touch_login("missing"),
            Err(UserError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let repo = repository();
        let user = repo.create(input("demo")).unwrap();
        assert!(repo.delete(&user.id).unwrap());
        assert!(!repo.delete(&user.id).unwrap());
        assert_eq!(repo.count(), 0);
    }
}
