use assert_cmd::prelude::*;
use passkeep::filesystem::store::FileKeyValueStore;
use passkeep::vault::codec::JsonCodec;
use passkeep::vault::service::PasswordStore;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tempfile::tempdir;

fn passkeep(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("passkeep").unwrap();
    cmd.env("HOME", home)
        .env("PASSKEEP_CONFIG_DIR", home.join("cfg"))
        .env_remove("PASSKEEP_DATA_DIR")
        .env_remove("PASSKEEP_GEN_LENGTH")
        .env_remove("PASSKEEP_GEN_SYMBOLS")
        .arg("--data-dir")
        .arg(home.join("data"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn login_whoami_logout() {
    let td = tempdir().unwrap();

    passkeep(td.path())
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));

    passkeep(td.path())
        .args(["login", "--username", "alice", "--password", "pw"])
        .assert()
        .success();

    passkeep(td.path())
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::diff("alice\n"));

    passkeep(td.path()).args(["logout"]).assert().success();

    passkeep(td.path())
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn login_rejects_blank_fields() {
    let td = tempdir().unwrap();
    passkeep(td.path())
        .args(["login", "--username", "  ", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
    assert!(!td.path().join("data").join("app_credentials.json").exists());
}

#[test]
fn generate_clamps_length_and_saves_with_metadata() {
    let td = tempdir().unwrap();
    let out = stdout_of(passkeep(td.path()).args([
        "generate",
        "--length",
        "200",
        "--platform",
        "example.com",
        "--label",
        "",
    ]));
    let pwd = out.trim();
    assert_eq!(pwd.chars().count(), 64);

    let json = stdout_of(passkeep(td.path()).args(["list", "--json"]));
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["pwd"], pwd);
    assert_eq!(arr[0]["platform"], "example.com");
    // Empty label is stored as absent
    assert!(arr[0].get("label").is_none());
}

#[test]
fn generate_respects_class_flags_and_no_save() {
    let td = tempdir().unwrap();
    let out = stdout_of(passkeep(td.path()).args([
        "generate",
        "--length",
        "3",
        "--no-upper",
        "--no-lower",
        "--no-symbols",
        "--no-save",
    ]));
    let pwd = out.trim();
    assert_eq!(pwd.len(), 6);
    assert!(pwd.chars().all(|c| c.is_ascii_digit()));

    passkeep(td.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved passwords."));
}

#[test]
fn generate_uses_configured_default_length() {
    let td = tempdir().unwrap();
    let out = stdout_of(
        passkeep(td.path())
            .env("PASSKEEP_GEN_LENGTH", "30")
            .args(["generate", "--no-save"]),
    );
    assert_eq!(out.trim().chars().count(), 30);
}

#[test]
fn add_list_delete_newest_first() {
    let td = tempdir().unwrap();
    passkeep(td.path()).args(["add", "first"]).assert().success();
    passkeep(td.path())
        .args(["add", "second", "--platform", "site.org", "--label", "me"])
        .assert()
        .success();

    let listing = stdout_of(passkeep(td.path()).args(["list"]));
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("second") && lines[0].contains("[site.org]") && lines[0].contains("(me)"));
    assert!(lines[1].contains("first"));

    passkeep(td.path())
        .args(["delete", "second", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    let json = stdout_of(passkeep(td.path()).args(["list", "--json"]));
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["pwd"], "first");
}

#[test]
fn add_rejects_blank_password() {
    let td = tempdir().unwrap();
    passkeep(td.path()).args(["add", "   "]).assert().failure();
}

#[test]
fn deleting_missing_password_still_succeeds() {
    let td = tempdir().unwrap();
    passkeep(td.path())
        .args(["delete", "nope", "--yes"])
        .assert()
        .success();
}

#[test]
fn copy_out_of_range_fails() {
    let td = tempdir().unwrap();
    passkeep(td.path())
        .args(["copy", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved password at position 1"));
}

#[tokio::test]
async fn cli_writes_are_visible_to_the_library() {
    let td = tempdir().unwrap();
    passkeep(td.path())
        .args(["add", "shared", "--label", "lib"])
        .assert()
        .success();

    let store = PasswordStore::new(
        Arc::new(FileKeyValueStore::new(td.path().join("data"))),
        Arc::new(JsonCodec),
    );
    let list = store.get_passwords().await;
    assert_eq!(list.len(), 1);
    assert!(list[0].matches("shared"));
    assert_eq!(list[0].label.as_deref(), Some("lib"));
}

#[test]
fn unwritable_data_dir_reports_failure_instead_of_success() {
    let td = tempdir().unwrap();
    std::fs::write(td.path().join("data"), "not a directory").unwrap();

    passkeep(td.path())
        .args(["login", "--username", "alice", "--password", "pw"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Logged in").not());

    passkeep(td.path())
        .args(["add", "hunter2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Saved").not());

    passkeep(td.path())
        .args(["generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Saved").not());
}
