use crate::ui::widgets::ConfirmationDialog;
use chrono::NaiveDate;
use strum::IntoEnumIterator;
use taskboard_core::{TaskCategory, TaskCreateInput, TaskPriority, User, UserCreateInput};
use tui_input::Input;

/// Filter buttons in display order; the value doubles as the button label
pub const FILTER_BUTTONS: [&str; 8] = [
    "all",
    "pending",
    "in-progress",
    "completed",
    "urgent",
    "high",
    "medium",
    "low",
];

/// Values offered by the sort selector, cycled in this order
pub const SORT_OPTIONS: [&str; 8] = [
    "createdAt-desc",
    "createdAt-asc",
    "dueDate-asc",
    "dueDate-desc",
    "priority-desc",
    "priority-asc",
    "title-asc",
    "title-desc",
];

/// Active markers for the filter and category button groups.
///
/// At most one button across both groups is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    active_filter: Option<String>,
    active_category: Option<TaskCategory>,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self {
            active_filter: Some("all".to_string()),
            active_category: None,
        }
    }
}

impl FilterBar {
    pub fn select_filter(&mut self, value: &str) {
        self.active_category = None;
        self.active_filter = Some(value.to_string());
    }

    pub fn select_category(&mut self, category: TaskCategory) {
        self.active_filter = None;
        self.active_category = Some(category);
    }

    /// Drops the active marker from the `all` button only
    pub fn deactivate_all(&mut self) {
        if self.active_filter.as_deref() == Some("all") {
            self.active_filter = None;
        }
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.active_filter.as_deref()
    }

    pub fn active_category(&self) -> Option<TaskCategory> {
        self.active_category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    FullName,
}

impl RegisterField {
    pub const ALL: [RegisterField; 3] = [Self::Username, Self::Email, Self::FullName];

    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::FullName => "Full name",
        }
    }
}

/// Registration overlay fields
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: Input,
    pub email: Input,
    pub full_name: Input,
    pub focus: RegisterField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: Input::default(),
            email: Input::default(),
            full_name: Input::default(),
            focus: RegisterField::Username,
        }
    }
}

impl RegisterForm {
    pub fn input(&self, field: RegisterField) -> &Input {
        match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::FullName => &self.full_name,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut Input {
        match self.focus {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::FullName => &mut self.full_name,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::FullName,
            RegisterField::FullName => RegisterField::Username,
        };
    }

    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::FullName,
            RegisterField::Email => RegisterField::Username,
            RegisterField::FullName => RegisterField::Email,
        };
    }

    /// Field values, each trimmed
    pub fn to_input(&self) -> UserCreateInput {
        UserCreateInput {
            username: self.username.value().trim().to_string(),
            email: Some(self.email.value().trim().to_string()),
            full_name: Some(self.full_name.value().trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Priority,
    Category,
    Due,
    Assignee,
}

impl TaskField {
    pub const ALL: [TaskField; 5] = [
        Self::Title,
        Self::Priority,
        Self::Category,
        Self::Due,
        Self::Assignee,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Priority => "Priority",
            Self::Category => "Category",
            Self::Due => "Due (YYYY-MM-DD)",
            Self::Assignee => "Assignee",
        }
    }

    /// Fields edited by typing; the others cycle through fixed choices
    pub fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Due)
    }
}

/// New-task overlay. `assignee` indexes the assignee choices, where 0 is
/// the current user and `n` is the n-th entry of the offered list.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: Input,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub due: Input,
    pub assignee: usize,
    pub focus: TaskField,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: Input::default(),
            priority: TaskPriority::default(),
            category: TaskCategory::default(),
            due: Input::default(),
            assignee: 0,
            focus: TaskField::Title,
        }
    }
}

fn step<T: IntoEnumIterator + PartialEq + Copy>(current: T, forward: bool) -> T {
    let all: Vec<T> = T::iter().collect();
    let i = all.iter().position(|x| *x == current).unwrap_or(0);
    let next = if forward {
        (i + 1) % all.len()
    } else {
        (i + all.len() - 1) % all.len()
    };
    all[next]
}

impl TaskForm {
    pub fn focused_input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            TaskField::Title => Some(&mut self.title),
            TaskField::Due => Some(&mut self.due),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        let i = TaskField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = TaskField::ALL[(i + 1) % TaskField::ALL.len()];
    }

    pub fn previous_field(&mut self) {
        let i = TaskField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = TaskField::ALL[(i + TaskField::ALL.len() - 1) % TaskField::ALL.len()];
    }

    /// Move the focused choice field to its next or previous value.
    /// `assignees` is the number of users offered besides the current one.
    pub fn cycle(&mut self, forward: bool, assignees: usize) {
        match self.focus {
            TaskField::Priority => self.priority = step(self.priority, forward),
            TaskField::Category => self.category = step(self.category, forward),
            TaskField::Assignee => {
                let choices = assignees + 1;
                self.assignee = if forward {
                    (self.assignee + 1) % choices
                } else {
                    (self.assignee + choices - 1) % choices
                };
            }
            TaskField::Title | TaskField::Due => {}
        }
    }

    /// Label of the selected assignee choice
    pub fn assignee_label(&self, assignees: &[User]) -> String {
        match self.assignee.checked_sub(1).and_then(|i| assignees.get(i)) {
            Some(user) => user.display_name().to_string(),
            None => "Myself".to_string(),
        }
    }

    /// Build the create request. A due date that is not `YYYY-MM-DD` is rejected.
    pub fn to_input(&self, assignees: &[User]) -> Result<TaskCreateInput, String> {
        let due = self.due.value().trim();
        let due_date = if due.is_empty() {
            None
        } else {
            let date = NaiveDate::parse_from_str(due, "%Y-%m-%d")
                .map_err(|_| format!("Invalid due date '{}', expected YYYY-MM-DD", due))?;
            Some(date)
        };
        let assignee_id = self
            .assignee
            .checked_sub(1)
            .and_then(|i| assignees.get(i))
            .map(|u| u.id.clone());

        Ok(TaskCreateInput {
            title: self.title.value().trim().to_string(),
            priority: Some(self.priority),
            category: Some(self.category),
            due_date,
            assignee_id,
            ..TaskCreateInput::default()
        })
    }
}

/// Where typed characters go on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainFocus {
    #[default]
    Tasks,
    Search,
    QuickAdd,
}

/// Presentation state owned by the session
#[derive(Debug, Default)]
pub struct UiState {
    pub login_visible: bool,
    pub user_info_visible: bool,
    pub main_visible: bool,
    pub welcome: String,

    pub username_input: Input,
    pub username_focused: bool,
    pub register: Option<RegisterForm>,
    pub task_form: Option<TaskForm>,

    pub filter_bar: FilterBar,
    pub search_input: Input,
    pub quick_add_input: Input,
    pub focus: MainFocus,
    pub sort_index: usize,

    pub confirmation: Option<ConfirmationDialog>,
    pub should_quit: bool,
}

impl UiState {
    /// Next value from [`SORT_OPTIONS`], wrapping around
    pub fn next_sort(&mut self) -> &'static str {
        self.sort_index = (self.sort_index + 1) % SORT_OPTIONS.len();
        SORT_OPTIONS[self.sort_index]
    }

    pub fn current_sort(&self) -> &'static str {
        SORT_OPTIONS[self.sort_index % SORT_OPTIONS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_tasks::TaskSort;

    #[test]
    fn test_filter_and_category_are_exclusive() {
        let mut bar = FilterBar::default();
        assert_eq!(bar.active_filter(), Some("all"));

        bar.select_category(TaskCategory::Work);
        assert_eq!(bar.active_filter(), None);
        assert_eq!(bar.active_category(), Some(TaskCategory::Work));

        bar.select_filter("urgent");
        assert_eq!(bar.active_filter(), Some("urgent"));
        assert_eq!(bar.active_category(), None);
    }

    #[test]
    fn test_deactivate_all_only_touches_all() {
        let mut bar = FilterBar::default();
        bar.deactivate_all();
        assert_eq!(bar.active_filter(), None);

        bar.select_filter("pending");
        bar.deactivate_all();
        assert_eq!(bar.active_filter(), Some("pending"));
    }

    #[test]
    fn test_register_form_trims_and_cycles() {
        let mut form = RegisterForm::default();
        form.username = Input::new("  sari ".to_string());
        form.email = Input::new(" sari@example.com".to_string());

        let input = form.to_input();
        assert_eq!(input.username, "sari");
        assert_eq!(input.email.as_deref(), Some("sari@example.com"));
        assert_eq!(input.full_name.as_deref(), Some(""));

        form.next_field();
        assert_eq!(form.focus, RegisterField::Email);
        form.previous_field();
        form.previous_field();
        assert_eq!(form.focus, RegisterField::FullName);
    }

    #[test]
    fn test_task_form_cycles_choices_and_wraps() {
        let mut form = TaskForm::default();
        form.focus = TaskField::Priority;
        form.cycle(true, 0);
        assert_eq!(form.priority, TaskPriority::High);
        form.cycle(false, 0);
        form.cycle(false, 0);
        form.cycle(false, 0);
        assert_eq!(form.priority, TaskPriority::Urgent);

        form.focus = TaskField::Assignee;
        form.cycle(true, 2);
        form.cycle(true, 2);
        assert_eq!(form.assignee, 2);
        form.cycle(true, 2);
        assert_eq!(form.assignee, 0);

        form.focus = TaskField::Title;
        form.previous_field();
        assert_eq!(form.focus, TaskField::Assignee);
    }

    #[test]
    fn test_task_form_to_input() {
        let mut form = TaskForm::default();
        form.title = Input::new(" Call bank ".to_string());
        let input = form.to_input(&[]).unwrap();
        assert_eq!(input.title, "Call bank");
        assert_eq!(input.priority, Some(TaskPriority::Medium));
        assert_eq!(input.category, Some(TaskCategory::Other));
        assert_eq!(input.due_date, None);
        assert_eq!(input.assignee_id, None);

        form.due = Input::new("2024-02-30".to_string());
        assert!(form.to_input(&[]).unwrap_err().contains("2024-02-30"));
    }

    #[test]
    fn test_sort_options_all_parse() {
        let mut ui = UiState::default();
        assert_eq!(ui.current_sort(), "createdAt-desc");
        for _ in 0..SORT_OPTIONS.len() {
            let value = ui.next_sort();
            assert!(value.parse::<TaskSort>().is_ok(), "{} should parse", value);
        }
        assert_eq!(ui.current_sort(), "createdAt-desc");
    }
}
