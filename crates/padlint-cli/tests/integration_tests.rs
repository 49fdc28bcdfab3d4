//! Integration tests for the padlint CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CLEAN: &str = "export const List = () => (\n  <ul>\n    <li>One</li>\n    <li>Two</li>\n  </ul>\n);\n";

const NEEDS_PADDING: &str =
    "export const Page = () => (\n  <div>\n    <span>Title</span>\n    <Card />\n  </div>\n);\n";

const PADDED: &str =
    "export const Page = () => (\n  <div>\n    <span>Title</span>\n\n    <Card />\n  </div>\n);\n";

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("padlint").expect("padlint binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("tempdir");
    for (name, content) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, content).expect("write");
    }
    temp_dir
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("read")
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "keeps the blank lines between sibling JSX elements consistent",
        ))
        .stdout(predicate::str::contains("padlint config init"));

    cli()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("blank-line layout linter"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_lint_clean_project() {
    let temp = project(&[("src/List.jsx", CLEAN)]);
    cli()
        .arg("lint")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"))
        .stdout(predicate::str::contains("Files checked: 1"));
}

#[test]
fn test_lint_reports_warning_without_failing() {
    let temp = project(&[("src/Page.tsx", NEEDS_PADDING)]);
    cli()
        .arg("lint")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("layout/multiline-jsx-padding"))
        .stdout(predicate::str::contains("Expected a blank line before <Card>."));
}

#[test]
fn test_error_on_warnings() {
    let temp = project(&[("Page.jsx", NEEDS_PADDING)]);
    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp.path())
        .assert()
        .code(1);
}

#[test]
fn test_severity_from_config_fails_run() {
    let temp = project(&[
        ("Page.jsx", NEEDS_PADDING),
        (
            ".padlintrc.json",
            r#"{ "linter": { "rules": { "layout/multiline-jsx-padding": "error" } } }"#,
        ),
    ]);
    cli().arg("lint").arg(temp.path()).assert().code(1);
}

#[test]
fn test_rule_off_in_config() {
    let temp = project(&[
        ("Page.jsx", NEEDS_PADDING),
        (
            ".padlintrc.jsonc",
            "{\n  // quiet\n  \"linter\": { \"rules\": { \"layout/multiline-jsx-padding\": \"off\" } },\n}",
        ),
    ]);
    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_unknown_rule_in_config_is_usage_error() {
    let temp = project(&[
        ("Page.jsx", CLEAN),
        (".padlintrc.json", r#"{ "linter": { "rules": { "layout/nope": "warn" } } }"#),
    ]);
    cli()
        .arg("lint")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule 'layout/nope'"));
}

#[test]
fn test_rule_options_are_rejected() {
    let temp = project(&[
        ("Page.jsx", CLEAN),
        (
            "padlint.json",
            r#"{ "linter": { "rules": { "layout/multiline-jsx-padding": { "severity": "warn", "options": { "gap": 2 } } } } }"#,
        ),
    ]);
    cli()
        .arg("lint")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not accept options"));
}

#[test]
fn test_write_applies_fixes() {
    let temp = project(&[("Page.jsx", NEEDS_PADDING)]);
    cli()
        .args(["lint", "--write", "--error-on-warnings"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixes applied: 1"));
    assert_eq!(read(temp.path(), "Page.jsx"), PADDED);

    // A second run has nothing left to do
    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp.path())
        .assert()
        .success();
}

#[test]
fn test_dry_run_shows_diff_and_keeps_file() {
    let temp = project(&[("Page.jsx", NEEDS_PADDING)]);
    cli()
        .args(["lint", "--dry-run"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(fixed)"))
        .stdout(predicate::str::contains("+\n").or(predicate::str::contains("+\r\n")));
    assert_eq!(read(temp.path(), "Page.jsx"), NEEDS_PADDING);
}

#[test]
fn test_write_conflicts_with_dry_run() {
    cli()
        .args(["lint", "--write", "--dry-run", "."])
        .assert()
        .failure();
}

#[test]
fn test_json_format() {
    let temp = project(&[("Page.jsx", NEEDS_PADDING)]);
    let output = cli()
        .args(["lint", "--format", "json"])
        .arg(temp.path())
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let diagnostics = value.as_array().expect("array");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["ruleId"], "layout/multiline-jsx-padding");
    assert_eq!(diagnostics[0]["messageId"], "missingBlankLine");
    assert_eq!(diagnostics[0]["severity"], "warning");
    assert_eq!(diagnostics[0]["suggestions"][0]["replacement"], "\n\n    ");
}

#[test]
fn test_compact_and_github_formats() {
    let temp = project(&[("Page.jsx", NEEDS_PADDING)]);
    cli()
        .args(["lint", "--format", "compact"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            ":4:5: warning[layout/multiline-jsx-padding]: Expected a blank line before <Card>.",
        ));

    cli()
        .args(["lint", "--format", "github"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("::warning file="))
        .stdout(predicate::str::contains(",line=4,col=5,"));
}

#[test]
fn test_excluded_and_unmatched_files_are_skipped() {
    let temp = project(&[
        ("node_modules/lib/Page.jsx", NEEDS_PADDING),
        ("notes.md", NEEDS_PADDING),
        ("src/List.jsx", CLEAN),
    ]);
    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked: 1"));
}

#[test]
fn test_explicit_file_is_linted_regardless_of_globs() {
    let temp = project(&[("page.js", NEEDS_PADDING)]);
    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp.path().join("page.js"))
        .assert()
        .code(1);
}

#[test]
fn test_missing_path_is_error() {
    let temp = TempDir::new().expect("tempdir");
    cli()
        .arg("lint")
        .arg(temp.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: "))
        .stderr(predicate::str::contains("Path does not exist"))
        .stderr(predicate::str::contains("configuration").not());
}

#[test]
fn test_rules_list() {
    cli()
        .args(["rules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layout/multiline-jsx-padding"))
        .stdout(predicate::str::contains("Total: 1 rules"));
}

#[test]
fn test_rules_list_json() {
    let output = cli().args(["rules", "--json"]).output().expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value[0]["id"], "layout/multiline-jsx-padding");
    assert_eq!(value[0]["category"], "layout");
    assert_eq!(value[0]["fixable"], "whitespace");
}

#[test]
fn test_rules_explain() {
    cli()
        .args(["rules", "explain", "layout/multiline-jsx-padding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixable: whitespace"))
        .stdout(predicate::str::contains("unexpectedBlankLine"))
        .stdout(predicate::str::contains("Options: none"));
}

#[test]
fn test_rules_explain_unknown() {
    cli()
        .args(["rules", "explain", "layout/nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule 'layout/nope'"));
}

#[test]
fn test_config_init() {
    let temp = TempDir::new().expect("tempdir");
    cli()
        .args(["config", "init"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let written = read(temp.path(), ".padlintrc.json");
    assert!(written.contains("\"layout/multiline-jsx-padding\": \"warn\""));
    assert!(written.contains("**/*.tsx"));

    cli()
        .args(["config", "init"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    cli()
        .args(["config", "init", "--force"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn test_explicit_config_path() {
    let temp = project(&[
        ("Page.jsx", NEEDS_PADDING),
        (
            "configs/strict.json",
            r#"{ "linter": { "rules": { "layout/multiline-jsx-padding": "error" } } }"#,
        ),
    ]);
    cli()
        .arg("lint")
        .arg("--config")
        .arg(temp.path().join("configs/strict.json"))
        .arg(temp.path())
        .assert()
        .code(1);

    cli()
        .arg("lint")
        .arg("--config")
        .arg(temp.path().join("configs/missing.json"))
        .arg(temp.path())
        .assert()
        .code(2);
}
