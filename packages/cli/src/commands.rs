use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskboard_core::{backup_file_name, truncate, Outcome, Task, TaskCreateInput, User};
use taskboard_storage::{StorageConfig, StorageManager};
use taskboard_tasks::{TaskController, TaskQuery, TaskRepository};
use taskboard_users::UserRepository;
use tracing::{debug, info};

/// Store plus the repositories and task controller the commands act through
pub struct Workspace {
    storage: Arc<StorageManager>,
    users: Arc<UserRepository>,
    tasks: TaskController,
}

impl Workspace {
    pub fn open(config: StorageConfig) -> Result<Self> {
        let storage = Arc::new(StorageManager::open(config).context("Failed to open the store")?);
        let users = Arc::new(UserRepository::new(Arc::clone(&storage)));
        let tasks = TaskController::new(
            Arc::new(TaskRepository::new(Arc::clone(&storage))),
            Arc::clone(&users),
        );
        Ok(Self {
            storage,
            users,
            tasks,
        })
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    /// Write a dated backup into `dir`; `None` when there is nothing to export
    pub fn export(&self, dir: &Path, today: NaiveDate) -> Result<Option<PathBuf>> {
        let Some(snapshot) = self.storage.export_data() else {
            return Ok(None);
        };
        let path = dir.join(backup_file_name(today));
        snapshot
            .write_to(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported data to {}", path.display());
        Ok(Some(path))
    }

    pub fn users(&self) -> Vec<User> {
        self.users.find_all()
    }

    fn act_as(&self, username: &str) -> Result<User> {
        let user = self
            .users
            .find_by_username(username.trim())
            .ok_or_else(|| anyhow!("No user named '{}'", username.trim()))?;
        self.tasks.set_current_user(Some(&user.id));
        debug!("Acting as {}", user.username);
        Ok(user)
    }

    /// Create a task owned by `username`, optionally assigned to `assignee`
    pub fn add_task(
        &self,
        username: &str,
        assignee: Option<&str>,
        mut input: TaskCreateInput,
    ) -> Result<Outcome<Task>> {
        self.act_as(username)?;
        if let Some(name) = assignee {
            let user = self
                .users
                .find_by_username(name.trim())
                .ok_or_else(|| anyhow!("No user named '{}' to assign", name.trim()))?;
            input.assignee_id = Some(user.id);
        }
        Ok(self.tasks.create_task(input)?)
    }

    /// Tasks `username` owns or is assigned, filtered and sorted by `query`
    pub fn list_tasks(&self, username: &str, query: &TaskQuery) -> Result<Vec<Task>> {
        self.act_as(username)?;
        Ok(self.tasks.list_tasks(query)?)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Username", "Name", "Email", "Joined", "Last login"]);
    for user in users {
        table.add_row(vec![
            user.username.clone(),
            user.display_name().to_string(),
            user.email.clone().unwrap_or_else(|| "-".to_string()),
            local_time(user.created_at),
            user.last_login_at
                .map(local_time)
                .unwrap_or_else(|| "never".to_string()),
        ]);
    }
    table
}

pub fn tasks_table(tasks: &[Task], today: NaiveDate) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Status", "Priority", "Category", "Due"]);
    for task in tasks {
        let due = match task.due_date {
            Some(date) if task.is_overdue(today) => format!("{} (overdue)", date),
            Some(date) => date.to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![
            task.id.clone(),
            truncate(&task.title, 40),
            task.status.to_string(),
            task.priority.to_string(),
            task.category.to_string(),
            due,
        ]);
    }
    table
}
