// ABOUTME: Task controller scoped to the currently logged-in user
// ABOUTME: Every operation fails with NoCurrentUser until a user is set

use chrono::NaiveDate;
use std::sync::{Arc, RwLock};
use taskboard_core::{Outcome, Task, TaskCreateInput, TaskStatus, TaskUpdateInput};
use taskboard_users::UserRepository;
use tracing::{debug, info};

use crate::query::{TaskQuery, TaskStats};
use crate::{TaskError, TaskRepository, TaskResult};

pub struct TaskController {
    repository: Arc<TaskRepository>,
    users: Arc<UserRepository>,
    current_user: RwLock<Option<String>>,
}

impl TaskController {
    pub fn new(repository: Arc<TaskRepository>, users: Arc<UserRepository>) -> Self {
        Self {
            repository,
            users,
            current_user: RwLock::new(None),
        }
    }

    /// Re-scope to `user_id`, or clear the scope with `None`
    pub fn set_current_user(&self, user_id: Option<&str>) {
        let mut current = self
            .current_user
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = user_id.map(str::to_string);
        debug!("Task scope set to {:?}", *current);
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.current_user
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn require_user(&self) -> TaskResult<String> {
        self.current_user_id().ok_or(TaskError::NoCurrentUser)
    }

    /// Fetch a task the current user can see
    fn visible_task(&self, user_id: &str, task_id: &str) -> TaskResult<Task> {
        self.repository
            .find_by_id(task_id)
            .filter(|t| t.involves(user_id))
            .ok_or_else(|| TaskError::NotFound(task_id.to_string()))
    }

    pub fn create_task(&self, input: TaskCreateInput) -> TaskResult<Outcome<Task>> {
        let user_id = self.require_user()?;
        if let Some(assignee) = input.assignee_id.as_deref().filter(|a| !a.trim().is_empty()) {
            if self.users.find_by_id(assignee).is_none() {
                return Err(TaskError::UnknownAssignee(assignee.to_string()));
            }
        }

        let task = self.repository.create(&user_id, input)?;
        let message = format!("Task \"{}\" created", task.title);
        Ok(Outcome::new(task, message))
    }

    pub fn list_tasks(&self, query: &TaskQuery) -> TaskResult<Vec<Task>> {
        let user_id = self.require_user()?;
        Ok(self.repository.query(&user_id, query))
    }

    /// Cycle pending → in-progress → completed → pending
    pub fn toggle_status(&self, task_id: &str) -> TaskResult<Outcome<Task>> {
        let user_id = self.require_user()?;
        let task = self.visible_task(&user_id, task_id)?;
        let next = match task.status {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        };

        let updated = self.repository.update(
            task_id,
            TaskUpdateInput {
                status: Some(next),
                ..TaskUpdateInput::default()
            },
        )?;
        let message = format!("Task \"{}\" is now {}", updated.title, updated.status);
        Ok(Outcome::new(updated, message))
    }

    pub fn update_task(&self, task_id: &str, input: TaskUpdateInput) -> TaskResult<Outcome<Task>> {
        let user_id = self.require_user()?;
        self.visible_task(&user_id, task_id)?;
        let updated = self.repository.update(task_id, input)?;
        Ok(Outcome::new(updated, "Task updated"))
    }

    /// Only the owner may delete; assignees get NotOwner
    pub fn delete_task(&self, task_id: &str) -> TaskResult<Outcome<()>> {
        let user_id = self.require_user()?;
        let task = self.visible_task(&user_id, task_id)?;
        if task.owner_id != user_id {
            return Err(TaskError::NotOwner(task_id.to_string()));
        }

        self.repository.delete(task_id)?;
        info!("User {} deleted task {}", user_id, task_id);
        Ok(Outcome::new((), format!("Task \"{}\" deleted", task.title)))
    }

    pub fn stats(&self, today: NaiveDate) -> TaskResult<TaskStats> {
        let user_id = self.require_user()?;
        let tasks: Vec<Task> = self
            .repository
            .find_all()
            .into_iter()
            .filter(|t| t.involves(&user_id))
            .collect();
        Ok(TaskStats::from_tasks(&tasks, today))
    }
}
