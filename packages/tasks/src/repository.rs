// ABOUTME: Task repository backed by the storage manager
// ABOUTME: CRUD over the `tasks` key plus per-user queries

use chrono::Utc;
use std::sync::Arc;
use taskboard_core::{
    generate_id, truncate, validate_task_title, Task, TaskCreateInput, TaskStatus,
    TaskUpdateInput, TASKS_KEY,
};
use taskboard_storage::StorageManager;
use tracing::{debug, info};

use crate::query::TaskQuery;
use crate::{TaskError, TaskResult};

const DESCRIPTION_MAX_LEN: usize = 2000;

pub struct TaskRepository {
    storage: Arc<StorageManager>,
}

impl TaskRepository {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self { storage }
    }

    fn read_all(&self) -> Vec<Task> {
        self.storage.load(TASKS_KEY, Vec::new())
    }

    fn write_all(&self, tasks: &[Task]) -> TaskResult<()> {
        self.storage.save(TASKS_KEY, tasks)?;
        Ok(())
    }

    pub fn find_all(&self) -> Vec<Task> {
        self.read_all()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Task> {
        self.read_all().into_iter().find(|t| t.id == id)
    }

    /// Tasks owned by or assigned to `user_id`, shaped by `query`
    pub fn query(&self, user_id: &str, query: &TaskQuery) -> Vec<Task> {
        let tasks = self
            .read_all()
            .into_iter()
            .filter(|t| t.involves(user_id))
            .collect();
        query.apply(tasks)
    }

    pub fn create(&self, owner_id: &str, input: TaskCreateInput) -> TaskResult<Task> {
        validate_task_title(&input.title)?;

        let now = Utc::now();
        let task = Task {
            id: generate_id(),
            title: input.title.trim().to_string(),
            description: clean_description(input.description),
            status: TaskStatus::Pending,
            priority: input.priority.unwrap_or_default(),
            category: input.category.unwrap_or_default(),
            due_date: input.due_date,
            owner_id: owner_id.to_string(),
            assignee_id: input.assignee_id.filter(|a| !a.trim().is_empty()),
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        let mut tasks = self.read_all();
        tasks.push(task.clone());
        self.write_all(&tasks)?;

        info!("Created task '{}' with ID {}", task.title, task.id);
        Ok(task)
    }

    pub fn update(&self, id: &str, input: TaskUpdateInput) -> TaskResult<Task> {
        if let Some(title) = &input.title {
            validate_task_title(title)?;
        }

        let mut tasks = self.read_all();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        let now = Utc::now();
        if let Some(title) = input.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = input.description {
            task.description = clean_description(Some(description));
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(category) = input.category {
            task.category = category;
        }
        if let Some(due_date) = input.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(assignee_id) = input.assignee_id {
            task.assignee_id = Some(assignee_id).filter(|a| !a.trim().is_empty());
        }
        if let Some(status) = input.status {
            task.completed_at = match status {
                TaskStatus::Completed if task.status != TaskStatus::Completed => Some(now),
                TaskStatus::Completed => task.completed_at,
                _ => None,
            };
            task.status = status;
        }
        task.updated_at = now;
        let updated = task.clone();

        self.write_all(&tasks)?;
        debug!("Updated task {}", id);
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> TaskResult<bool> {
        let mut tasks = self.read_all();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.write_all(&tasks)?;
        info!("Deleted task {}", id);
        Ok(true)
    }

    /// Remove every task owned by `owner_id`, returning how many went
    pub fn delete_by_owner(&self, owner_id: &str) -> TaskResult<usize> {
        let mut tasks = self.read_all();
        let before = tasks.len();
        tasks.retain(|t| t.owner_id != owner_id);
        let removed = before - tasks.len();
        if removed > 0 {
            self.write_all(&tasks)?;
            info!("Deleted {} tasks owned by {}", removed, owner_id);
        }
        Ok(removed)
    }
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| truncate(d.trim(), DESCRIPTION_MAX_LEN))
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterCriteria, SortField, SortOrder, TaskSort};
    use taskboard_core::{TaskCategory, TaskPriority, ValidationError};

    fn repository() -> TaskRepository {
        TaskRepository::new(Arc::new(StorageManager::in_memory()))
    }

    fn input(title: &str) -> TaskCreateInput {
        TaskCreateInput {
            title: title.to_string(),
            ..TaskCreateInput::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let repo = repository();
        let task = repo.create("u1", input("  Write report  ")).unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.category, TaskCategory::Other);
        assert_eq!(task.owner_id, "u1");
        assert_eq!(repo.find_by_id(&task.id).unwrap(), task);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let repo = repository();
        assert!(matches!(
            repo.create("u1", input("   ")),
            Err(TaskError::Validation(ValidationError::EmptyTitle))
        ));
        assert!(repo.find_all().is_empty());
    }

    #[test]
    fn test_update_tracks_completion_time() {
        let repo = repository();
        let task = repo.create("u1", input("Pay rent")).unwrap();

        let done = repo
            .update(
                &task.id,
                TaskUpdateInput {
                    status: Some(TaskStatus::Completed),
                    ..TaskUpdateInput::default()
                },
            )
            .unwrap();
        assert!(done.completed_at.is_some());

        let reopened = repo
            .update(
                &task.id,
                TaskUpdateInput {
                    status: Some(TaskStatus::Pending),
                    ..TaskUpdateInput::default()
                },
            )
            .unwrap();
        assert!(reopened.completed_at.is_none());
    }

    #[test]
    fn test_update_missing_task() {
        let repo = repository();
        assert!(matches!(
            repo.update("nope", TaskUpdateInput::default()),
            Err(TaskError::NotFound(_))
        ));
    }

    #[test]
    fn test_query_scopes_to_owner_and_assignee() {
        let repo = repository();
        repo.create("u1", input("Mine")).unwrap();
        repo.create(
            "u2",
            TaskCreateInput {
                title: "Shared".to_string(),
                assignee_id: Some("u1".to_string()),
                ..TaskCreateInput::default()
            },
        )
        .unwrap();
        repo.create("u2", input("Theirs")).unwrap();

        let query = TaskQuery {
            sort: TaskSort::new(SortField::Title, SortOrder::Asc),
            ..TaskQuery::default()
        };
        let titles: Vec<String> = repo.query("u1", &query).into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Mine", "Shared"]);

        let pending_only = TaskQuery {
            filter: FilterCriteria::status(TaskStatus::Completed),
            ..TaskQuery::default()
        };
        assert!(repo.query("u1", &pending_only).is_empty());
    }

    #[test]
    fn test_delete_and_delete_by_owner() {
        let repo = repository();
        let first = repo.create("u1", input("One")).unwrap();
        repo.create("u1", input("Two")).unwrap();
        repo.create("u2", input("Three")).unwrap();

        assert!(repo.delete(&first.id).unwrap());
        assert!(!repo.delete(&first.id).unwrap());
        assert_eq!(repo.delete_by_owner("u1").unwrap(), 1);
        assert_eq!(repo.find_all().len(), 1);
    }
}
