use crate::debounce::SearchDebouncer;
use crate::events::{AppEvent, EventHandler};
use crate::state::UiState;
use crate::ui;
use crate::ui::widgets::ConfirmationDialog;
use crate::view::{MessageKind, TaskView, View};
use crate::{AppConfig, InitError};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use ratatui::{backend::Backend, Terminal};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskboard_core::{
    backup_file_name, TaskCategory, TaskPriority, TaskStatus, User, UserCreateInput,
    ValidationError, CURRENT_USER_KEY, USERS_KEY,
};
use taskboard_storage::StorageManager;
use taskboard_tasks::{FilterCriteria, TaskController, TaskRepository, TaskSort};
use taskboard_users::{UserController, UserRepository, UserService};
use tracing::{debug, error, info, warn};
use tui_input::Input;

/// Accounts created on an empty store: (username, email, full name)
const DEMO_USERS: [(&str, &str, &str); 2] = [
    ("demo", "demo@example.com", "Demo User"),
    ("budi", "budi@kantor.com", "Budi Santoso"),
];

/// Everything the user can do, as routed by [`App::dispatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Submit the username field
    LoginSubmit,
    Logout,
    OpenRegister,
    CloseRegister,
    RegisterSubmit,
    /// A filter button: `all`, a priority, or a status
    FilterSelected(String),
    CategorySelected(TaskCategory),
    /// Raw search field contents after an edit
    SearchInput(String),
    /// Sort selector value such as `dueDate-asc`
    SortChanged(String),
    ShowOverdue,
    Export,
    Refresh,
    ClearAllRequested,
    ClearAllConfirmed,
    ClearAllCancelled,
    SelectNext,
    SelectPrevious,
    ToggleSelected,
    DeleteSelected,
    QuickAdd(String),
    OpenTaskForm,
    CloseTaskForm,
    TaskFormSubmit,
    Quit,
}

/// Pre-built components for [`App::from_parts`]
pub struct AppParts {
    pub storage: Arc<StorageManager>,
    pub user_repository: Arc<UserRepository>,
    pub users: Arc<dyn UserService>,
    pub tasks: Arc<TaskController>,
    pub view: Box<dyn View>,
    pub export_dir: PathBuf,
}

/// The session: owns every component plus presentation state
pub struct App {
    storage: Arc<StorageManager>,
    user_repository: Arc<UserRepository>,
    users: Arc<dyn UserService>,
    tasks: Arc<TaskController>,
    view: Box<dyn View>,
    export_dir: PathBuf,

    pub current_user: Option<User>,
    pub ui: UiState,
    search: SearchDebouncer,
    listeners_bound: bool,
}

impl App {
    /// Build every component in dependency order, then start the session.
    ///
    /// Any failure aborts; the caller decides how to report it.
    pub fn initialize(config: AppConfig) -> Result<Self, InitError> {
        info!("Initializing taskboard session");

        if config.export_dir.exists() && !config.export_dir.is_dir() {
            return Err(InitError::ExportDir(config.export_dir));
        }

        let storage = Arc::new(StorageManager::open(config.storage)?);
        info!("Storage manager initialized");

        let user_repository = Arc::new(UserRepository::new(Arc::clone(&storage)));
        let task_repository = Arc::new(TaskRepository::new(Arc::clone(&storage)));
        info!("Repositories initialized");

        let users: Arc<dyn UserService> =
            Arc::new(UserController::new(Arc::clone(&user_repository)));
        let tasks = Arc::new(TaskController::new(
            task_repository,
            Arc::clone(&user_repository),
        ));
        info!("Controllers initialized");

        let view = Box::new(TaskView::new(Arc::clone(&tasks)));
        info!("View initialized");

        let mut app = Self::from_parts(AppParts {
            storage,
            user_repository,
            users,
            tasks,
            view,
            export_dir: config.export_dir,
        });
        app.start();

        info!("Taskboard session initialized");
        Ok(app)
    }

    /// Assemble without starting; listeners stay unbound until [`start`](Self::start)
    pub fn from_parts(parts: AppParts) -> Self {
        Self {
            storage: parts.storage,
            user_repository: parts.user_repository,
            users: parts.users,
            tasks: parts.tasks,
            view: parts.view,
            export_dir: parts.export_dir,
            current_user: None,
            ui: UiState::default(),
            search: SearchDebouncer::default(),
            listeners_bound: false,
        }
    }

    /// Bind listeners, seed demo users, then restore or request a session
    pub fn start(&mut self) {
        self.setup_event_listeners();
        self.create_demo_users_if_needed();
        self.restore_session();
    }

    pub fn setup_event_listeners(&mut self) {
        self.listeners_bound = true;
        debug!("Event listeners bound");
    }

    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub fn task_controller(&self) -> &TaskController {
        &self.tasks
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn restore_session(&mut self) {
        match self.storage.load::<Option<User>>(CURRENT_USER_KEY, None) {
            Some(user) => {
                info!("Restoring session for '{}'", user.username);
                self.begin_session(user);
                self.show_main_content();
                self.load_user_list_for_assign();
                self.view.refresh();
            }
            None => self.show_login_section(),
        }
    }

    /// Session and task scope always change together
    fn begin_session(&mut self, user: User) {
        self.tasks.set_current_user(Some(&user.id));
        self.current_user = Some(user);
    }

    fn end_session(&mut self) {
        self.tasks.set_current_user(None);
        self.current_user = None;
    }

    /// Route one event to its handler. Events before binding are dropped.
    pub fn dispatch(&mut self, event: UiEvent) {
        if !self.listeners_bound {
            debug!("Dropping {:?}: listeners not bound yet", event);
            return;
        }

        match event {
            UiEvent::LoginSubmit => self.handle_login(),
            UiEvent::Logout => self.handle_logout(),
            UiEvent::OpenRegister => self.show_register_modal(),
            UiEvent::CloseRegister => self.hide_register_modal(),
            UiEvent::RegisterSubmit => self.handle_register(),
            UiEvent::FilterSelected(value) => self.select_filter(&value),
            UiEvent::CategorySelected(category) => {
                self.ui.filter_bar.select_category(category);
                self.view.filter_tasks(FilterCriteria::category(category));
            }
            UiEvent::SearchInput(text) => self.search.schedule(text, Instant::now()),
            UiEvent::SortChanged(value) => match TaskSort::from_str(&value) {
                Ok(sort) => self.view.handle_sort(sort),
                Err(e) => {
                    warn!("Ignoring sort value '{}': {}", value, e);
                    self.view.show_message(&e, MessageKind::Error);
                }
            },
            UiEvent::ShowOverdue => {
                self.ui.filter_bar.deactivate_all();
                self.view.filter_tasks(FilterCriteria::overdue());
                self.view
                    .show_message("Showing overdue tasks", MessageKind::Warning);
            }
            UiEvent::Export => {
                self.export_app_data(Utc::now().date_naive());
            }
            UiEvent::Refresh => self.view.refresh(),
            UiEvent::ClearAllRequested => {
                self.ui.confirmation = Some(
                    ConfirmationDialog::new(
                        "Clear all tasks",
                        "Are you sure you want to delete ALL tasks?",
                    )
                    .dangerous()
                    .with_buttons("Clear", "Cancel"),
                );
            }
            UiEvent::ClearAllConfirmed => {
                // Bulk delete is not offered; confirming only reloads the list
                self.ui.confirmation = None;
                self.view.refresh();
            }
            UiEvent::ClearAllCancelled => self.ui.confirmation = None,
            UiEvent::SelectNext => self.view.select_next(),
            UiEvent::SelectPrevious => self.view.select_previous(),
            UiEvent::ToggleSelected => self.view.toggle_selected(),
            UiEvent::DeleteSelected => self.view.delete_selected(),
            UiEvent::QuickAdd(title) => self.view.quick_add(&title),
            UiEvent::OpenTaskForm => self.ui.task_form = Some(Default::default()),
            UiEvent::CloseTaskForm => self.ui.task_form = None,
            UiEvent::TaskFormSubmit => self.handle_task_form(),
            UiEvent::Quit => self.ui.should_quit = true,
        }
    }

    /// Periodic work: deliver a due search to the view
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.search.poll(now) {
            self.view.handle_search(&text);
        }
    }

    fn select_filter(&mut self, value: &str) {
        self.ui.filter_bar.select_filter(value);

        if value == "all" {
            // A search still waiting on the debounce would undo the reset
            self.search.cancel();
            self.ui.search_input.reset();
            self.view.clear_filters();
        } else if let Ok(priority) = TaskPriority::from_str(value) {
            self.view.filter_tasks(FilterCriteria::priority(priority));
        } else {
            match TaskStatus::from_str(value) {
                Ok(status) => self.view.filter_tasks(FilterCriteria::status(status)),
                Err(_) => warn!("Unknown filter value '{}'", value),
            }
        }
    }

    pub fn handle_login(&mut self) {
        let username = self.ui.username_input.value().trim().to_string();
        if username.is_empty() {
            self.view
                .show_message(&ValidationError::EmptyUsername.to_string(), MessageKind::Error);
            return;
        }

        match self.users.login(&username) {
            Ok(outcome) => {
                if let Err(e) = self.storage.save(CURRENT_USER_KEY, &outcome.data) {
                    warn!("Failed to persist session: {}", e);
                }
                self.begin_session(outcome.data);
                self.show_main_content();
                self.load_user_list_for_assign();
                self.view.refresh();
                self.view.show_message(&outcome.message, MessageKind::Success);
            }
            Err(e) => {
                debug!("Login failed for '{}': {}", username, e);
                self.view.show_message(&e.to_string(), MessageKind::Error);
            }
        }
    }

    pub fn handle_logout(&mut self) {
        let outcome = self.users.logout();

        self.end_session();
        if let Err(e) = self.storage.remove(CURRENT_USER_KEY) {
            warn!("Failed to clear persisted session: {}", e);
        }
        self.search.cancel();

        self.hide_main_content();
        self.show_login_section();
        self.view.show_message(&outcome.message, MessageKind::Info);
    }

    pub fn handle_register(&mut self) {
        let Some(form) = &self.ui.register else {
            return;
        };
        let input: UserCreateInput = form.to_input();
        let username = input.username.clone();

        match self.users.register(input) {
            Ok(outcome) => {
                self.hide_register_modal();
                self.view.show_message(&outcome.message, MessageKind::Success);
                self.ui.username_input = Input::new(username);
            }
            Err(e) => self.view.show_message(&e.to_string(), MessageKind::Error),
        }
    }

    /// Submit the new-task overlay; it stays open when the task is rejected
    pub fn handle_task_form(&mut self) {
        let Some(form) = &self.ui.task_form else {
            return;
        };
        let input = match form.to_input(&self.view.model().assignees) {
            Ok(input) => input,
            Err(message) => {
                self.view.show_message(&message, MessageKind::Error);
                return;
            }
        };
        if self.view.create_task(input) {
            self.ui.task_form = None;
        }
    }

    pub fn show_register_modal(&mut self) {
        self.ui.register = Some(Default::default());
    }

    /// Closing also discards whatever was typed
    pub fn hide_register_modal(&mut self) {
        self.ui.register = None;
    }

    pub fn show_login_section(&mut self) {
        self.ui.login_visible = true;
        self.ui.user_info_visible = false;
        self.ui.main_visible = false;
        self.ui.username_input.reset();
        self.ui.username_focused = true;
    }

    pub fn show_main_content(&mut self) {
        self.ui.login_visible = false;
        self.ui.username_focused = false;
        self.ui.user_info_visible = true;
        self.ui.main_visible = true;
        if let Some(user) = &self.current_user {
            self.ui.welcome = format!("Hi, {}!", user.display_name());
        }
    }

    pub fn hide_main_content(&mut self) {
        self.ui.main_visible = false;
    }

    /// Offer every user except the current one as an assignee
    pub fn load_user_list_for_assign(&mut self) {
        let Some(current_id) = self.current_user.as_ref().map(|u| u.id.clone()) else {
            return;
        };
        match self.users.get_all_users() {
            Ok(outcome) => {
                let others = outcome
                    .data
                    .into_iter()
                    .filter(|u| u.id != current_id)
                    .collect();
                self.view.set_assignees(others);
            }
            Err(e) => warn!("Failed to load assignable users: {}", e),
        }
    }

    /// Write a backup named for `today` into the export directory
    pub fn export_app_data(&mut self, today: NaiveDate) -> Option<PathBuf> {
        let Some(snapshot) = self.storage.export_data() else {
            self.view
                .show_message("Failed to export data: nothing stored yet", MessageKind::Error);
            return None;
        };

        let path = self.export_dir.join(backup_file_name(today));
        match snapshot.write_to(&path) {
            Ok(()) => {
                info!("Exported data to {}", path.display());
                self.view.show_message(
                    &format!("Data exported to {}", path.display()),
                    MessageKind::Success,
                );
                Some(path)
            }
            Err(e) => {
                error!("Export to {} failed: {}", path.display(), e);
                self.view
                    .show_message(&format!("Failed to export data: {}", e), MessageKind::Error);
                None
            }
        }
    }

    pub fn create_demo_users_if_needed(&mut self) {
        let existing: Vec<User> = self.storage.load(USERS_KEY, Vec::new());
        if !existing.is_empty() {
            return;
        }

        for (username, email, full_name) in DEMO_USERS {
            let created = self.user_repository.create(UserCreateInput {
                username: username.to_string(),
                email: Some(email.to_string()),
                full_name: Some(full_name.to_string()),
            });
            if let Err(e) = created {
                error!("Failed to create demo users: {}", e);
                return;
            }
        }
        info!("Demo users created");
    }

    /// Draw and handle events until the user quits
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> Result<()> {
        let mut events = EventHandler::new(tick_rate);

        while !self.ui.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next().await {
                Some(AppEvent::Key(key)) => self.handle_key(key),
                Some(AppEvent::Tick) => self.tick(Instant::now()),
                Some(AppEvent::Resize) => {}
                Some(AppEvent::Quit) | None => self.ui.should_quit = true,
            }
        }

        info!("Leaving taskboard session");
        Ok(())
    }
}
