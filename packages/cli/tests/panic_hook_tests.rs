// Runs in its own process: installs the global subscriber and panic hook
use std::fs;
use std::panic;
use taskboard_cli::{init_logging, install_panic_hook, LogTarget};
use tempfile::TempDir;

#[test]
fn test_tui_panic_is_logged_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("taskboard.log");
    let target = LogTarget::File(path.clone());

    init_logging("info", target.clone()).unwrap();
    install_panic_hook(&target);

    let result = panic::catch_unwind(|| panic!("render loop exploded"));
    let _ = panic::take_hook();
    assert!(result.is_err());

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("Unhandled panic"));
    assert!(written.contains("render loop exploded"));
}
