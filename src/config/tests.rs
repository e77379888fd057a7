use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::load_config;
use super::settings::Settings;
use crate::scheduler::SchedulerKind;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.scheduler.kind, SchedulerKind::Queue);
}

#[test]
#[serial]
fn test_load_config_without_sources_uses_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let cfg = temp_env::with_vars_unset(["TICKSUB_LOGGING_LEVEL", "TICKSUB_SCHEDULER_KIND"], || {
        load_config().expect("load_config failed")
    });
    assert_eq!(cfg, Settings::default());

    env::set_current_dir(orig).expect("restore cwd");
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    // load_config reads config/default.toml relative to the working directory.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [logging]
        level = "debug"

        [scheduler]
        kind = "local"
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = temp_env::with_vars_unset(["TICKSUB_LOGGING_LEVEL", "TICKSUB_SCHEDULER_KIND"], || {
        load_config().expect("load_config failed")
    });
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.scheduler.kind, SchedulerKind::Local);

    env::set_current_dir(orig).expect("restore cwd");
}

#[test]
#[serial]
fn test_load_config_env_overrides_partial() {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let cfg = temp_env::with_vars(
        [
            ("TICKSUB_LOGGING_LEVEL", Some("trace")),
            ("TICKSUB_SCHEDULER_KIND", None),
        ],
        || load_config().expect("load_config failed"),
    );
    assert_eq!(cfg.logging.level, "trace");
    assert_eq!(cfg.scheduler.kind, SchedulerKind::Queue);

    env::set_current_dir(orig).expect("restore cwd");
}
