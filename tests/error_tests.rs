//! Error scenario integration tests

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn capcast_bin(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("capcast").expect("binary should be built");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(config_home: &Path, content: &str) {
    let dir = config_home.join("capcast");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn invalid_selection_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .arg("-sfront")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("front"));
}

#[test]
fn zero_framerate_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .args(["-r", "0", "--dry"])
        .assert()
        .code(2);
}

#[test]
fn json_without_list_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path()).arg("--json").assert().code(2);
}

#[test]
fn unterminated_quote_in_args_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .args(["--dry", "--sargs=-vf 'crop=100:100"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--sargs").and(predicate::str::contains("Unterminated")));
}

#[test]
fn invalid_extension_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .args(["--dry", "-e", "m.kv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid file extension"));
}

#[test]
fn bad_selection_in_config_file_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), "camera = \"front\"\n");

    capcast_bin(home.path())
        .arg("--dry")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("front"));
}

#[test]
fn corrupt_config_file_is_ignored_with_warning() {
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), "screen = [not toml");

    capcast_bin(home.path())
        .args(["--dry", "-soff"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Ignoring config file")
                .and(predicate::str::contains("Nothing to capture")),
        );
}

#[test]
fn config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_selection() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .args(["config", "set", "audio", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config value for 'audio'"));

    assert!(!home.path().join("capcast/config.toml").exists());
}

#[test]
fn config_set_invalid_framerate() {
    let home = tempfile::tempdir().unwrap();
    capcast_bin(home.path())
        .args(["config", "set", "framerate", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive"));
}
