use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn newscols(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("newscols").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir);
    cmd
}

/// Pin the config to the temp dir so a user-level config never leaks in.
fn workspace() -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_dir = temp_dir.path().join(".newscols");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), "{}").unwrap();
    temp_dir
}

#[test]
fn new_creates_document_with_default_style() {
    let temp_dir = workspace();

    newscols(temp_dir.path())
        .args(["new", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created document post"))
        .stdout(predicate::str::contains("column-count:").and(predicate::str::contains("4")));

    let markup = fs::read_to_string(temp_dir.path().join("post.html")).unwrap();
    assert!(markup.starts_with("<!-- wp:newspaper-columns/newspaper-columns {"));
    assert!(markup.contains("Add a title..."));
}

#[test]
fn set_clamps_and_style_reports_json() {
    let temp_dir = workspace();
    newscols(temp_dir.path()).args(["new", "post"]).assert().success();

    newscols(temp_dir.path())
        .args(["set", "post", "1", "columnCount=10", "dropCapSize=large"])
        .assert()
        .success()
        .stdout(predicate::str::contains("columnCount set to 6"))
        .stdout(predicate::str::contains("dropCapSize set to large"));

    let output = newscols(temp_dir.path())
        .args(["style", "post", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let style = &json["styles"][0]["style"];
    assert_eq!(style["column-count"], "6");
    assert_eq!(style["--drop-cap-font-size"], "6.2rem");
    assert_eq!(style["--drop-cap-line-height"], "5.2rem");
}

#[test]
fn rejected_rule_style_keeps_prior_value() {
    let temp_dir = workspace();
    newscols(temp_dir.path()).args(["new", "post"]).assert().success();

    newscols(temp_dir.path())
        .args(["set", "post", "1", "columnRuleStyle=polka-dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected"))
        .stdout(predicate::str::contains("kept solid"));
}

#[test]
fn check_heals_legacy_markup() {
    let temp_dir = workspace();
    let legacy = "<!-- wp:newspaper-columns/newspaper-columns {\"columnCount\":3} -->\n\
                  <div class=\"wp-block-newspaper-columns-newspaper-columns\" style=\"column-count:3\"></div>\n\
                  <!-- /wp:newspaper-columns/newspaper-columns -->\n";
    fs::write(temp_dir.path().join("old.html"), legacy).unwrap();

    newscols(temp_dir.path())
        .args(["check", "old"])
        .assert()
        .success()
        .stdout(predicate::str::contains("drifted"));

    newscols(temp_dir.path())
        .args(["check", "old", "--heal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-rendered 1 drifted block(s)."));

    let healed = fs::read_to_string(temp_dir.path().join("old.html")).unwrap();
    assert!(healed.contains("--drop-cap-font-size:3.8rem"));

    newscols(temp_dir.path())
        .args(["check", "old"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All block styles are in sync."));
}

#[test]
fn show_lists_documents_by_default() {
    let temp_dir = workspace();
    newscols(temp_dir.path()).args(["new", "alpha"]).assert().success();
    newscols(temp_dir.path())
        .args(["new", "beta", "--block", "multi-columns/multi-columns"])
        .assert()
        .success();

    newscols(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha").and(predicate::str::contains("beta")));

    newscols(temp_dir.path())
        .args(["show", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multi-columns/multi-columns"))
        .stdout(predicate::str::contains("dropCapSize").not());
}

#[test]
fn schema_prints_table() {
    let temp_dir = workspace();
    newscols(temp_dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("columnCount"))
        .stdout(predicate::str::contains("2..=6"))
        .stdout(predicate::str::contains("none|solid|dotted|dashed|double|groove|ridge"));
}

#[test]
fn config_document_ext_changes_store() {
    let temp_dir = workspace();
    newscols(temp_dir.path())
        .args(["config", "document-ext", "htm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("document-ext set to .htm"));

    newscols(temp_dir.path()).args(["new", "post"]).assert().success();
    assert!(temp_dir.path().join("post.htm").exists());
    assert!(!temp_dir.path().join("post.html").exists());
}

#[test]
fn errors_exit_nonzero() {
    let temp_dir = workspace();

    newscols(temp_dir.path())
        .args(["style", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Document not found: missing"));

    newscols(temp_dir.path()).args(["new", "post"]).assert().success();
    newscols(temp_dir.path())
        .args(["set", "post", "5", "columnCount=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Block 5 out of range"));

    newscols(temp_dir.path())
        .args(["new", "post", "--block", "core/columns"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown block type: core/columns"));
}
