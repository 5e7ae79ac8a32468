//! Integration tests for the pwkeeper CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! master password comes from `PWKEEPER_PASSWORD`, and secrets are piped
//! through stdin so nothing waits on a terminal.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: a Command for the pwkeeper binary running inside `dir`.
fn pwkeeper(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pwkeeper").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env("PWKEEPER_PASSWORD", "master-password")
        .env_remove("PWKEEPER_LOG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password keeper"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pwkeeper"));
}

#[test]
fn add_get_list_delete_via_subcommands() {
    let tmp = TempDir::new().unwrap();

    pwkeeper(&tmp)
        .args(["add", "github"])
        .write_stdin("hunter2\n")
        .assert()
        .success();

    tmp.child("passwords.json")
        .assert(predicate::str::contains("\"service\": \"github\""))
        .assert(predicate::str::contains("hunter2").not());

    pwkeeper(&tmp)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("hunter2\n");

    pwkeeper(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"));

    pwkeeper(&tmp)
        .args(["delete", "github", "--force"])
        .assert()
        .success();

    tmp.child("passwords.json").assert("[]\n");
}

#[test]
fn duplicate_add_fails() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .args(["add", "github", "one"])
        .assert()
        .success();

    pwkeeper(&tmp)
        .args(["add", "github", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn get_with_wrong_password_fails() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .args(["add", "github", "hunter2"])
        .assert()
        .success();

    pwkeeper(&tmp)
        .env("PWKEEPER_PASSWORD", "not-the-password")
        .args(["get", "github"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("hunter2").not())
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn get_missing_service_fails() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .args(["get", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn corrupt_storage_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    tmp.child("passwords.json").write_str("{oops").unwrap();

    pwkeeper(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid storage file"));
}

#[test]
fn empty_storage_file_is_rewritten() {
    let tmp = TempDir::new().unwrap();
    tmp.child("passwords.json").touch().unwrap();

    pwkeeper(&tmp).arg("list").assert().success();

    tmp.child("passwords.json").assert("[]\n");
}

#[test]
fn file_flag_and_config_choose_storage() {
    let tmp = TempDir::new().unwrap();

    pwkeeper(&tmp)
        .args(["--file", "alt.json", "add", "github", "x"])
        .assert()
        .success();
    tmp.child("alt.json").assert(predicate::path::exists());
    tmp.child("passwords.json")
        .assert(predicate::path::missing());

    tmp.child(".pwkeeper.toml")
        .write_str("storage_file = \"alt.json\"\n")
        .unwrap();
    pwkeeper(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"));
}

#[test]
fn shell_session_from_piped_input() {
    let tmp = TempDir::new().unwrap();

    pwkeeper(&tmp)
        .write_stdin("add github\nhunter2\nlist\nget github\nbogus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password added successfully."))
        .stdout(predicate::str::contains("- github"))
        .stdout(predicate::str::contains("Password for github: hunter2"))
        .stdout(predicate::str::contains("Unknown command"))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pwkeeper"));
}

#[test]
fn completions_rejects_unknown_shell() {
    let tmp = TempDir::new().unwrap();
    pwkeeper(&tmp)
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid value 'csh'"));
}
