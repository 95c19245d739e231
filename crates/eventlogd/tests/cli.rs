//! Integration tests for the eventlog CLI commands.
//!
//! Every test points `--config` into its own temporary directory so the user's
//! configuration is never read or written.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

// Helper function to create a clean command instance
fn eventlog() -> Command { Command::cargo_bin("eventlog").unwrap() }

// Path of a feed fixture shared with the library tests
fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("../eventlog/tests/data").join(name)
}

// Helper to get a configuration path inside a fresh temporary directory
fn temp_config() -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let config_path = dir.path().join("eventlog").join("config.toml");
  (dir, config_path)
}

#[test]
fn test_show_first_page() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("Time"))
    .stdout(predicate::str::contains("Code"))
    .stdout(predicate::str::contains("System Start"))
    .stdout(predicate::str::contains("Resource Not Found"))
    .stdout(predicate::str::contains("Page 1 of 50"));
}

#[test]
fn test_show_in_russian() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("--locale")
    .arg("ru-RU")
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("Время"))
    .stdout(predicate::str::contains("Страница 1 из 50"));
}

#[test]
fn test_show_past_the_end() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("show")
    .arg("--page")
    .arg("51")
    .assert()
    .success()
    .stdout(predicate::str::contains("past the last page"))
    .stdout(predicate::str::contains("No events to display."))
    .stdout(predicate::str::contains("Page 51 of 50"));
}

#[test]
fn test_show_small_pages_and_all() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("--per-page")
    .arg("1")
    .arg("show")
    .arg("--page")
    .arg("2")
    .assert()
    .success()
    .stdout(predicate::str::contains("User Login"))
    .stdout(predicate::str::contains("System Start").not())
    .stdout(predicate::str::contains("Page 2 of 150"));

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("--per-page")
    .arg("1")
    .arg("show")
    .arg("--all")
    .assert()
    .success()
    .stdout(predicate::str::contains("System Start"))
    .stdout(predicate::str::contains("User Login"))
    .stdout(predicate::str::contains("Page 1 of 1"));
}

#[test]
fn test_show_degraded_feed() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("degraded.xml"))
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("Invalid Date"))
    .stdout(predicate::str::contains("Page 1 of ?"));
}

#[test]
fn test_show_missing_feed_fails() {
  let (dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(dir.path().join("missing.xml"))
    .arg("show")
    .assert()
    .failure()
    .stderr(predicate::str::contains("✗"));
}

#[test]
fn test_zero_per_page_is_rejected() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("--per-page")
    .arg("0")
    .arg("show")
    .assert()
    .failure()
    .stderr(predicate::str::contains("per_page"));
}

#[test]
fn test_init_then_show() {
  let (_dir, config_path) = temp_config();

  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("--source")
    .arg(fixture("EventLog_GetEventsLog.xml"))
    .arg("--locale")
    .arg("ru")
    .arg("init")
    .arg("--accept-defaults")
    .assert()
    .success()
    .stdout(predicate::str::contains("Created eventlog configuration"));

  let written = std::fs::read_to_string(&config_path).unwrap();
  assert!(written.contains("type = \"file\""));
  assert!(written.contains("locale = \"ru\""));

  // The stored source and locale are used without any overrides
  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("System Start"))
    .stdout(predicate::str::contains("Страница 1 из 50"));

  // Overwriting is confirmed automatically with --accept-defaults
  eventlog()
    .arg("--config")
    .arg(&config_path)
    .arg("init")
    .arg("--no-pagination")
    .arg("--accept-defaults")
    .assert()
    .success();

  let rewritten = std::fs::read_to_string(&config_path).unwrap();
  assert!(rewritten.contains("pagination = false"));
  assert!(rewritten.contains("type = \"http\""));
}
