//! CLI integration tests for legacy-codec
//!
//! Runs the binary the way an operator would. Every test passes `--builtin`
//! so local `patterns.toml` overrides cannot change the expected output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn legacy_codec() -> Command {
    let mut cmd = Command::cargo_bin("legacy-codec").unwrap();
    cmd.arg("--builtin");
    cmd
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("legacy-codec-{}-{}", std::process::id(), name))
}

const RECORDS: &str = r#"[
  {"CODIGOUSUARIO": 1, "LOGIN": "ana", "SENHA": "0", "SENHA_APP": null, "DESATIVADO": "N"},
  {"CODIGOUSUARIO": 2, "LOGIN": "bruno", "SENHA": ";493", "SENHA_APP": "", "DESATIVADO": "N"},
  {"CODIGOUSUARIO": 3, "LOGIN": "carla", "SENHA": "11", "DESATIVADO": "S"}
]"#;

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    legacy_codec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy chunk codec"));
}

#[test]
fn test_version() {
    legacy_codec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy-codec"));
}

#[test]
fn test_missing_subcommand_fails() {
    legacy_codec().assert().failure();
}

// ============================================================================
// Encode
// ============================================================================

#[test]
fn test_encode_argument() {
    legacy_codec()
        .args(["encode", "0"])
        .assert()
        .success()
        .stdout(";493\n");
}

#[test]
fn test_encode_digits() {
    legacy_codec()
        .args(["encode", "0123456789"])
        .assert()
        .success()
        .stdout(";493=8<8?<?=A@BBCDEGEHHLGLKQIPNVKTQ[MXT`\n");
}

#[test]
fn test_encode_stdin_lines() {
    legacy_codec()
        .arg("encode")
        .write_stdin("0\r\n00\n")
        .assert()
        .success()
        .stdout(";493\n;493=8;7\n");
}

#[test]
fn test_encode_passthrough_characters() {
    legacy_codec()
        .args(["encode", "a-b"])
        .assert()
        .success()
        .stdout(">7:4-FAD?\n");
}

#[test]
fn test_encode_explain_marks_formula_chunks() {
    legacy_codec()
        .args(["encode", "--explain", "0m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exact"))
        .stdout(predicate::str::contains("formula (best-effort)"));
}

#[test]
fn test_encode_json() {
    let output = legacy_codec()
        .args(["encode", "--json", "000000000000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["input"], "000000000000");
    assert_eq!(json[0]["best_effort_positions"], serde_json::json!([10, 11]));
}

#[test]
fn test_encode_with_extra_patterns() {
    let path = temp_path("extra-patterns.toml");
    fs::write(&path, "[[run]]\nsymbol = \"m\"\nchunks = ['ABCD']\n").unwrap();

    legacy_codec()
        .arg("--patterns")
        .arg(&path)
        .args(["encode", "m"])
        .assert()
        .success()
        .stdout("ABCD\n");

    fs::remove_file(&path).ok();
}

#[test]
fn test_missing_patterns_file_is_an_error() {
    legacy_codec()
        .args(["--patterns", "/nonexistent/patterns.toml", "encode", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error:"));
}

// ============================================================================
// Verify
// ============================================================================

#[test]
fn test_verify_encoded_match() {
    legacy_codec()
        .args(["verify", "0", ";493"])
        .assert()
        .success()
        .stdout(predicate::str::contains("match (encoded, stored value 1)"));
}

#[test]
fn test_verify_second_stored_value() {
    legacy_codec()
        .args(["verify", "0", "", ";493"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stored value 2"));
}

#[test]
fn test_verify_mismatch() {
    legacy_codec()
        .args(["verify", "0", ";494"])
        .assert()
        .code(1)
        .stdout("mismatch\n");
}

#[test]
fn test_verify_plaintext_requires_opt_in() {
    legacy_codec()
        .args(["verify", "secret1", "secret1"])
        .assert()
        .code(1);

    legacy_codec()
        .args(["verify", "--allow-plaintext", "secret1", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("match (plaintext"));
}

#[test]
fn test_verify_blocked_login() {
    legacy_codec()
        .args(["verify", "--login", "Sistema", "0", ";493"])
        .assert()
        .code(1)
        .stdout("blocked login\n");

    legacy_codec()
        .args(["verify", "--login", "maria", "0", ";493"])
        .assert()
        .success();
}

#[test]
fn test_verify_quiet() {
    legacy_codec()
        .args(["-q", "verify", "0", ";493"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Classify
// ============================================================================

#[test]
fn test_classify() {
    legacy_codec()
        .arg("classify")
        .write_stdin("123456\nABC!\nsecret1\n")
        .assert()
        .success()
        .stdout("plain\nencoded\nplain\n");
}

// ============================================================================
// Migrate
// ============================================================================

#[test]
fn test_migrate_dry_run_masks_plaintext() {
    let path = temp_path("records-dry.json");
    fs::write(&path, RECORDS).unwrap();

    legacy_codec()
        .arg("migrate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("******** -> ;493"))
        .stdout(predicate::str::contains("To re-encode:     1"))
        .stdout(predicate::str::contains("Disabled/skipped: 1"))
        .stderr(predicate::str::contains("Dry run"));

    fs::remove_file(&path).ok();
}

#[test]
fn test_migrate_reveal() {
    let path = temp_path("records-reveal.json");
    fs::write(&path, RECORDS).unwrap();

    legacy_codec()
        .arg("migrate")
        .arg(&path)
        .arg("--reveal")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 -> ;493"));

    fs::remove_file(&path).ok();
}

#[test]
fn test_migrate_apply_writes_output() {
    let input = temp_path("records-in.json");
    let output = temp_path("records-out.json");
    fs::write(&input, RECORDS).unwrap();

    legacy_codec()
        .arg("migrate")
        .arg(&input)
        .arg("--apply")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written[0]["password"], ";493");
    assert_eq!(written[1]["password"], ";493");
    assert_eq!(written[2]["password"], "11");

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn test_migrate_apply_requires_output() {
    legacy_codec()
        .args(["migrate", "records.json", "--apply"])
        .assert()
        .failure();
}

// ============================================================================
// Table and Check
// ============================================================================

#[test]
fn test_table_json() {
    let output = legacy_codec().args(["table", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 124);
}

#[test]
fn test_table_single_symbol() {
    legacy_codec()
        .args(["table", "-s", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"));
}

#[test]
fn test_table_rejects_unsupported_symbol() {
    legacy_codec()
        .args(["table", "-s", "%"])
        .assert()
        .code(2);
}

#[test]
fn test_check_passes_with_builtin_table() {
    legacy_codec()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("flagged"));
}
