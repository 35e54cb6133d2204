//! End-to-end CLI tests.
//!
//! Each test drives the compiled `prolint` binary the way a user would,
//! asserting on exit codes and output. Plugin tests use small `/bin/sh`
//! scripts speaking the wire protocol, so they exercise the whole spawn
//! and handshake path without depending on another workspace binary.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn prolint() -> Command {
    Command::cargo_bin("prolint").expect("binary built")
}

fn write_proto(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).expect("write proto");
    path
}

/// Writes a scripted plugin that serves one rule with a fixed failure.
fn scripted_plugin(dir: &tempfile::TempDir, name: &str, rule_id: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create script");
    writeln!(file, "#!/bin/sh").expect("write script");
    writeln!(
        file,
        r#"printf '%s\n' '{{"protocol_version":1,"service":"ruleset","secret":"ruleset"}}'"#
    )
    .expect("write script");
    writeln!(file, "while IFS= read -r line; do").expect("write script");
    writeln!(file, "  case \"$line\" in").expect("write script");
    writeln!(
        file,
        r#"    *list_rules*) printf '%s\n' '{{"reply":"rules","rules":[{{"id":"{rule_id}","purpose":"Scripted.","severity":"WARNING"}}]}}' ;;"#
    )
    .expect("write script");
    writeln!(
        file,
        r#"    *apply*) printf '%s\n' '{{"reply":"failures","failures":[{{"message":"{rule_id} says boom","pos":{{"offset":0,"line":1,"column":1}}}}]}}' ;;"#
    )
    .expect("write script");
    writeln!(file, "  esac").expect("write script");
    writeln!(file, "done").expect("write script");
    format!("/bin/sh {}", path.display())
}

// ---------------------------------------------------------------------------
// Exit-code classification
// ---------------------------------------------------------------------------

#[test]
fn clean_files_exit_zero_with_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_proto(
        &dir,
        "clean.proto",
        "syntax = \"proto3\";\nmessage Account { string name = 1; }\n",
    );
    prolint()
        .arg("lint")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn findings_exit_one_and_print_each_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_proto(&dir, "bad.proto", "message bad_name {}\n");
    prolint()
        .arg("lint")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Message name \"bad_name\" must be UpperCamelCase",
        ))
        .stdout(predicate::str::contains("bad.proto:1:1]"));
}

#[test]
fn unparseable_files_exit_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_proto(&dir, "broken.proto", "enum E {\n");
    prolint()
        .arg("lint")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("prolint:"));
}

#[test]
fn missing_files_exit_two() {
    prolint()
        .arg("lint")
        .arg("/nonexistent/missing.proto")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn a_plugin_that_cannot_start_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_proto(&dir, "clean.proto", "message Account {}\n");
    prolint()
        .arg("lint")
        .arg("--plugin")
        .arg("/nonexistent/prolint-test-plugin")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to start"));
}

// ---------------------------------------------------------------------------
// Plugin rules through the full stack
// ---------------------------------------------------------------------------

#[test]
fn plugin_failures_report_with_the_host_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_proto(&dir, "clean.proto", "message Account {}\n");
    let plugin = scripted_plugin(&dir, "plugin.sh", "SCRIPTED_RULE");

    prolint()
        .arg("lint")
        .arg("--plugin")
        .arg(&plugin)
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("SCRIPTED_RULE says boom"))
        .stdout(predicate::str::contains("clean.proto:1:1]"));
}

#[test]
fn two_plugins_report_in_configuration_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_proto(&dir, "clean.proto", "message Account {}\n");
    let first = scripted_plugin(&dir, "first.sh", "FIRST_RULE");
    let second = scripted_plugin(&dir, "second.sh", "SECOND_RULE");

    let assert = prolint()
        .arg("lint")
        .arg("--plugin")
        .arg(&first)
        .arg("--plugin")
        .arg(&second)
        .arg(&path)
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8");
    let first_at = stdout.find("FIRST_RULE").expect("first rule reported");
    let second_at = stdout.find("SECOND_RULE").expect("second rule reported");
    assert!(first_at < second_at, "plugin order not preserved:\n{stdout}");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_prints_the_builtin_catalogue() {
    prolint()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENUM_FIELD_NAMES_UPPER_SNAKE_CASE"))
        .stdout(predicate::str::contains("MESSAGE_NAMES_UPPER_CAMEL_CASE"));
}
