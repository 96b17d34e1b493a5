// Session lifecycle against a real on-disk store

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use taskboard_core::{User, CURRENT_USER_KEY, USERS_KEY};
use taskboard_storage::StorageConfig;
use taskboard_tui::{App, AppConfig, InitError, UiEvent};
use tempfile::TempDir;
use tui_input::Input;

fn config(data: &TempDir, export: &TempDir) -> AppConfig {
    AppConfig {
        storage: StorageConfig::in_dir(data.path()),
        export_dir: export.path().to_path_buf(),
    }
}

fn login(app: &mut App, username: &str) {
    app.ui.username_input = Input::new(username.to_string());
    app.dispatch(UiEvent::LoginSubmit);
}

#[test]
fn test_fresh_store_seeds_demo_users_and_shows_login() {
    let data = TempDir::new().unwrap();
    let export = TempDir::new().unwrap();
    let app = App::initialize(config(&data, &export)).unwrap();

    let users: Vec<User> = app.storage().load(USERS_KEY, Vec::new());
    assert_eq!(users.len(), 2);
    assert!(app.ui.login_visible);
    assert!(!app.ui.main_visible);
    assert!(app.current_user.is_none());
}

#[test]
fn test_login_survives_restart_and_logout_does_not() {
    let data = TempDir::new().unwrap();
    let export = TempDir::new().unwrap();

    {
        let mut app = App::initialize(config(&data, &export)).unwrap();
        login(&mut app, "demo");
        assert_eq!(app.current_user.as_ref().unwrap().username, "demo");
        assert!(app.view().model().last_refresh.is_some());
        app.dispatch(UiEvent::QuickAdd("Call the bank".to_string()));
    }

    let mut app = App::initialize(config(&data, &export)).unwrap();
    assert!(app.ui.main_visible);
    assert_eq!(app.ui.welcome, "Hi, Demo User!");
    assert_eq!(
        app.task_controller().current_user_id(),
        app.current_user.as_ref().map(|u| u.id.clone())
    );
    assert_eq!(app.view().model().tasks.len(), 1);
    let assignees: Vec<&str> = app
        .view()
        .model()
        .assignees
        .iter()
        .map(|u| u.username.as_str())
        .collect();
    assert_eq!(assignees, vec!["budi"]);

    app.dispatch(UiEvent::Logout);
    drop(app);

    let app = App::initialize(config(&data, &export)).unwrap();
    assert!(app.ui.login_visible);
    assert!(!app.storage().contains(CURRENT_USER_KEY));
}

#[test]
fn test_hand_written_session_record_is_trusted() {
    let data = TempDir::new().unwrap();
    let export = TempDir::new().unwrap();
    std::fs::write(
        data.path().join("store.json"),
        r#"{"namespace":"taskAppDay2","version":"2.0","entries":{"currentUser":{"id":"u1","username":"budi"}}}"#,
    )
    .unwrap();

    let app = App::initialize(config(&data, &export)).unwrap();
    assert!(app.ui.main_visible);
    assert_eq!(app.ui.welcome, "Hi, budi!");
    assert_eq!(app.task_controller().current_user_id().as_deref(), Some("u1"));
}

#[test]
fn test_export_writes_backup_file() {
    let data = TempDir::new().unwrap();
    let export = TempDir::new().unwrap();
    let mut app = App::initialize(config(&data, &export)).unwrap();

    let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let path = app.export_app_data(today).unwrap();

    assert_eq!(path.file_name().unwrap(), "task-app-backup-2025-01-31.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["app"], "taskAppDay2");
    assert!(json["data"]["users"].is_array());
}

#[test]
fn test_export_path_that_is_a_file_aborts_start() {
    let data = TempDir::new().unwrap();
    let export = TempDir::new().unwrap();
    let blocker = export.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let result = App::initialize(AppConfig {
        storage: StorageConfig::in_dir(data.path()),
        export_dir: blocker,
    });
    assert!(matches!(result, Err(InitError::ExportDir(_))));
}
