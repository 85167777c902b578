/// Drives the `token-codegen` binary end to end.
use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/canvas.json");

#[test]
fn test_format_ts_from_file() {
    Command::cargo_bin("token-codegen")
        .unwrap()
        .args(["format", "--format", "ts", "--no-timestamp", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// Do not edit directly\n\n"))
        .stdout(predicate::str::contains(
            "export declare const brandPrimary = \"#0875e1\";\n",
        ));
}

#[test]
fn test_format_js_from_stdin_with_prefix() {
    Command::cargo_bin("token-codegen")
        .unwrap()
        .args(["format", "-f", "javascript/inline-module", "--prefix", "cnvs"])
        .write_stdin(r##"{"color": {"blue": {"value": "#0875e1"}}}"##)
        .assert()
        .success()
        .stdout(predicate::str::contains("// Generated on "))
        .stdout(predicate::str::contains("exports.cnvsColorBlue = \"#0875e1\";\n"));
}

#[test]
fn test_circular_reference_fails() {
    Command::cargo_bin("token-codegen")
        .unwrap()
        .args(["format", "--no-timestamp"])
        .write_stdin(r#"{"a": {"value": "{b}"}, "b": {"value": "{a}"}}"#)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("circular reference: a -> b -> a"));
}

#[test]
fn test_unknown_format_rejected_by_parser() {
    Command::cargo_bin("token-codegen")
        .unwrap()
        .args(["format", "--format", "scss", FIXTURE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn test_build_from_env_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tokens.config.json");
    let json = serde_json::json!({
        "source": [FIXTURE],
        "buildPath": "out",
        "header": {"showTimestamp": false},
        "files": [{"destination": "tokens.d.ts", "format": "ts"}]
    });
    std::fs::write(&config, json.to_string()).unwrap();

    Command::cargo_bin("token-codegen")
        .unwrap()
        .arg("build")
        .env("TOKEN_CODEGEN_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("(6 tokens)"));

    let written = std::fs::read_to_string(dir.path().join("out").join("tokens.d.ts")).unwrap();
    assert!(written.contains("export declare const spaceX4 = \"calc(4px * 4)\";"));
}
