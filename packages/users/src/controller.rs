// ABOUTME: User controller: login, logout, registration, and listing
// ABOUTME: Validates input and turns repository results into outcomes with messages

use std::sync::Arc;
use taskboard_core::{
    require_username, validate_email, validate_full_name, validate_username, Outcome, User,
    UserCreateInput,
};
use tracing::{debug, info};

use crate::{UserRepository, UserResult};

/// Account operations the session layer depends on
pub trait UserService: Send + Sync {
    /// Fetch the user by username, creating it when absent
    fn login(&self, username: &str) -> UserResult<Outcome<User>>;

    /// Logging out always succeeds; only the message is meaningful
    fn logout(&self) -> Outcome<()>;

    fn register(&self, input: UserCreateInput) -> UserResult<Outcome<User>>;

    fn get_all_users(&self) -> UserResult<Outcome<Vec<User>>>;
}

pub struct UserController {
    repository: Arc<UserRepository>,
}

impl UserController {
    pub fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }
}

impl UserService for UserController {
    fn login(&self, username: &str) -> UserResult<Outcome<User>> {
        let username = require_username(username)?;

        if let Some(existing) = self.repository.find_by_username(username) {
            let user = self.repository.touch_login(&existing.id)?;
            info!("User '{}' logged in", user.username);
            let message = format!("Welcome back, {}!", user.display_name());
            return Ok(Outcome::new(user, message));
        }

        validate_username(username)?;
        let created = self.repository.create(UserCreateInput {
            username: username.to_string(),
            email: None,
            full_name: None,
        })?;
        let user = self.repository.touch_login(&created.id)?;
        info!("Created and logged in new user '{}'", user.username);
        let message = format!("Account created for {}. Welcome!", user.username);
        Ok(Outcome::new(user, message))
    }

    fn logout(&self) -> Outcome<()> {
        debug!("User logged out");
        Outcome::new((), "You have been logged out")
    }

    fn register(&self, input: UserCreateInput) -> UserResult<Outcome<User>> {
        validate_username(&input.username)?;
        if let Some(email) = &input.email {
            validate_email(email)?;
        }
        if let Some(full_name) = &input.full_name {
            validate_full_name(full_name)?;
        }

        let user = self.repository.create(input)?;
        let message = format!("Registration successful! Log in as {}", user.username);
        Ok(Outcome::new(user, message))
    }

    fn get_all_users(&self) -> UserResult<Outcome<Vec<User>>> {
        let users = self.repository.find_all();
        let message = format!("Found {} users", users.len());
        Ok(Outcome::new(users, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserError;
    use taskboard_core::ValidationError;
    use taskboard_storage::StorageManager;

    fn controller() -> (UserController, Arc<UserRepository>) {
        let repository = Arc::new(UserRepository::new(Arc::new(StorageManager::in_memory())));
        (UserController::new(Arc::clone(&repository)), repository)
    }

    #[test]
    fn test_login_creates_missing_user() {
        let (controller, repository) = controller();
        let outcome = controller.login("  demo ").unwrap();

        assert_eq!(outcome.data.username, "demo");
        assert!(outcome.data.last_login_at.is_some());
        assert!(outcome.message.contains("demo"));
        assert_eq!(repository.count(), 1);
    }

    #[test]
    fn test_login_is_idempotent() {
        let (controller, repository) = controller();
        let first = controller.login("demo").unwrap();
        let second = controller.login("Demo").unwrap();

        assert_eq!(first.data.id, second.data.id);
        assert_eq!(repository.count(), 1);
        assert!(second.message.starts_with("Welcome back"));
    }

    #[test]
    fn test_login_rejects_blank_and_invalid_names() {
        let (controller, repository) = controller();
        assert!(matches!(
            controller.login("   "),
            Err(UserError::Validation(ValidationError::EmptyUsername))
        ));
        assert!(matches!(
            controller.login("no spaces allowed"),
            Err(UserError::Validation(ValidationError::UsernameCharacters))
        ));
        assert_eq!(repository.count(), 0);
    }

    #[test]
    fn test_register_validates_fields() {
        let (controller, _) = controller();
        let err = controller
            .register(UserCreateInput {
                username: "sari".to_string(),
                email: Some("broken".to_string()),
                full_name: None,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email address: broken");
    }

    #[test]
    fn test_register_then_duplicate() {
        let (controller, _) = controller();
        let input = UserCreateInput {
            username: "sari".to_string(),
            email: Some("sari@example.com".to_string()),
            full_name: Some("Sari Dewi".to_string()),
        };
        let outcome = controller.register(input.clone()).unwrap();
        assert_eq!(outcome.data.full_name.as_deref(), Some("Sari Dewi"));

        let err = controller.register(input).unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }

    #[test]
    fn test_get_all_users() {
        let (controller, _) = controller();
        controller.login("demo").unwrap();
        controller.login("budi").unwrap();
        let outcome = controller.get_all_users().unwrap();
        assert_eq!(outcome.data.len(), 2);
    }
}
