use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum_macros::{Display, EnumString};
use taskboard_core::{Task, TaskCreateInput, User};
use taskboard_tasks::{FilterCriteria, TaskController, TaskQuery, TaskSort, TaskStats};
use tracing::{debug, warn};

/// Toasts kept in the queue; older ones are dropped first
pub const MAX_TOASTS: usize = 4;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: MessageKind,
    pub shown_at: Instant,
}

/// Everything the renderer reads from the view
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub filter: FilterCriteria,
    pub search: String,
    pub sort: TaskSort,
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub assignees: Vec<User>,
    pub selected: usize,
    pub toasts: VecDeque<Toast>,
    pub last_refresh: Option<DateTime<Local>>,
}

impl ViewModel {
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Toasts younger than [`TOAST_TTL`]
    pub fn live_toasts(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts
            .iter()
            .filter(move |t| now.saturating_duration_since(t.shown_at) < TOAST_TTL)
    }
}

/// Rendering side of the session: the orchestrator only talks to this trait
pub trait View {
    /// Re-query tasks and stats for the current user
    fn refresh(&mut self);
    /// Merge `criteria` into the active filter, then refresh
    fn filter_tasks(&mut self, criteria: FilterCriteria);
    /// Reset filter and search, then refresh
    fn clear_filters(&mut self);
    fn handle_search(&mut self, text: &str);
    fn handle_sort(&mut self, sort: TaskSort);
    fn show_message(&mut self, message: &str, kind: MessageKind);
    fn set_assignees(&mut self, users: Vec<User>);

    fn select_next(&mut self);
    fn select_previous(&mut self);
    /// Advance the selected task to its next status
    fn toggle_selected(&mut self);
    fn delete_selected(&mut self);
    fn quick_add(&mut self, title: &str);
    /// Create a task from a full form; true when it was stored
    fn create_task(&mut self, input: TaskCreateInput) -> bool;

    fn model(&self) -> &ViewModel;
}

/// [`View`] backed by the task controller
pub struct TaskView {
    tasks: Arc<TaskController>,
    model: ViewModel,
}

impl TaskView {
    pub fn new(tasks: Arc<TaskController>) -> Self {
        Self {
            tasks,
            model: ViewModel::default(),
        }
    }

    fn query(&self) -> TaskQuery {
        TaskQuery {
            filter: self.model.filter.clone(),
            search: Some(self.model.search.clone()).filter(|s| !s.trim().is_empty()),
            sort: self.model.sort,
            today: Local::now().date_naive(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.model.tasks.len();
        if self.model.selected >= len {
            self.model.selected = len.saturating_sub(1);
        }
    }
}

impl View for TaskView {
    fn refresh(&mut self) {
        let query = self.query();
        match self.tasks.list_tasks(&query) {
            Ok(tasks) => {
                self.model.stats = self.tasks.stats(query.today).unwrap_or_default();
                debug!("View refreshed with {} tasks", tasks.len());
                self.model.tasks = tasks;
            }
            Err(e) => {
                warn!("Failed to refresh tasks: {}", e);
                self.model.tasks.clear();
                self.model.stats = TaskStats::default();
            }
        }
        self.model.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    fn filter_tasks(&mut self, criteria: FilterCriteria) {
        self.model.filter.merge(criteria);
        self.refresh();
    }

    fn clear_filters(&mut self) {
        self.model.filter = FilterCriteria::default();
        self.model.search.clear();
        self.refresh();
    }

    fn handle_search(&mut self, text: &str) {
        self.model.search = text.to_string();
        self.refresh();
    }

    fn handle_sort(&mut self, sort: TaskSort) {
        self.model.sort = sort;
        self.refresh();
    }

    fn show_message(&mut self, message: &str, kind: MessageKind) {
        debug!("[{}] {}", kind, message);
        if self.model.toasts.len() == MAX_TOASTS {
            self.model.toasts.pop_front();
        }
        self.model.toasts.push_back(Toast {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }

    fn set_assignees(&mut self, users: Vec<User>) {
        self.model.assignees = users;
    }

    fn select_next(&mut self) {
        if self.model.selected + 1 < self.model.tasks.len() {
            self.model.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        self.model.selected = self.model.selected.saturating_sub(1);
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.model.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        match self.tasks.toggle_status(&id) {
            Ok(outcome) => self.show_message(&outcome.message, MessageKind::Success),
            Err(e) => self.show_message(&e.to_string(), MessageKind::Error),
        }
        self.refresh();
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.model.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        match self.tasks.delete_task(&id) {
            Ok(outcome) => self.show_message(&outcome.message, MessageKind::Success),
            Err(e) => self.show_message(&e.to_string(), MessageKind::Error),
        }
        self.refresh();
    }

    fn quick_add(&mut self, title: &str) {
        self.create_task(TaskCreateInput {
            title: title.to_string(),
            ..TaskCreateInput::default()
        });
    }

    fn create_task(&mut self, input: TaskCreateInput) -> bool {
        match self.tasks.create_task(input) {
            Ok(outcome) => {
                self.show_message(&outcome.message, MessageKind::Success);
                self.refresh();
                true
            }
            Err(e) => {
                self.show_message(&e.to_string(), MessageKind::Error);
                false
            }
        }
    }

    fn model(&self) -> &ViewModel {
        &self.model
    }
}
