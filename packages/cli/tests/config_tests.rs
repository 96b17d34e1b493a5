use rstest::rstest;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use taskboard_cli::{Config, ConfigError};

const VARS: [&str; 4] = [
    "TASKBOARD_DATA_DIR",
    "TASKBOARD_EXPORT_DIR",
    "TASKBOARD_TICK_RATE_MS",
    "TASKBOARD_LOG",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.data_dir, taskboard_core::default_data_dir());
    assert_eq!(config.export_dir, env::current_dir().unwrap());
    assert_eq!(config.tick_rate, Duration::from_millis(100));
    assert_eq!(config.log_filter, "info");
}

#[test]
#[serial]
fn test_config_from_env_with_all_custom() {
    clear_env();
    env::set_var("TASKBOARD_DATA_DIR", "/tmp/taskboard-data");
    env::set_var("TASKBOARD_EXPORT_DIR", "/tmp/taskboard-backups");
    env::set_var("TASKBOARD_TICK_RATE_MS", "250");
    env::set_var("TASKBOARD_LOG", "debug");

    let config = Config::from_env().unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/taskboard-data"));
    assert_eq!(config.export_dir, PathBuf::from("/tmp/taskboard-backups"));
    assert_eq!(config.tick_rate, Duration::from_millis(250));
    assert_eq!(config.log_filter, "debug");
    assert_eq!(
        config.log_file(),
        PathBuf::from("/tmp/taskboard-data/taskboard.log")
    );

    clear_env();
}

#[test]
#[serial]
fn test_config_blank_values_fall_back_to_defaults() {
    clear_env();
    env::set_var("TASKBOARD_LOG", "  ");
    env::set_var("TASKBOARD_TICK_RATE_MS", "");

    let config = Config::from_env().unwrap();

    assert_eq!(config.log_filter, "info");
    assert_eq!(config.tick_rate, Duration::from_millis(100));

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_tick_rate() {
    clear_env();
    env::set_var("TASKBOARD_TICK_RATE_MS", "fast");

    let result = Config::from_env();

    assert!(matches!(result.unwrap_err(), ConfigError::InvalidTickRate(_)));

    clear_env();
}

#[rstest]
#[case("0")]
#[case("9")]
#[case("5001")]
#[serial]
fn test_config_tick_rate_out_of_range(#[case] raw: &str) {
    clear_env();
    env::set_var("TASKBOARD_TICK_RATE_MS", raw);

    let result = Config::from_env();

    assert!(matches!(
        result.unwrap_err(),
        ConfigError::TickRateOutOfRange(_)
    ));

    clear_env();
}

#[test]
#[serial]
fn test_app_config_points_store_into_data_dir() {
    clear_env();
    env::set_var("TASKBOARD_DATA_DIR", "/tmp/taskboard-data");

    let config = Config::from_env().unwrap();
    let app_config = config.app_config();

    assert_eq!(
        app_config.storage.backend,
        taskboard_storage::StorageBackend::File {
            path: PathBuf::from("/tmp/taskboard-data/store.json")
        }
    );
    assert_eq!(app_config.export_dir, config.export_dir);

    clear_env();
}
