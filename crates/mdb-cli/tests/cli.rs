use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn mdbdiff(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdbdiff"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn pair(dir: &TempDir, original: Value, modified: Value) -> (String, String) {
    let a = write(dir.path(), "original.json", &original);
    let b = write(dir.path(), "modified.json", &modified);
    (a.display().to_string(), b.display().to_string())
}

#[test]
fn diff_json_output() {
    let dir = TempDir::new().unwrap();
    let (a, b) = pair(
        &dir,
        json!({"title": "foo", "baz": "bazt"}),
        json!({"baz": "bazz", "fizz": "buzz"}),
    );
    let out = mdbdiff(&["diff", &a, &b, "--format", "json"]);
    assert!(out.status.success());
    let diff: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(
        diff,
        json!({
            "added": {"fizz": "buzz"},
            "modified": {"baz": "bazz"},
            "removed": {"title": "foo"}
        })
    );
}

#[test]
fn diff_text_output() {
    let dir = TempDir::new().unwrap();
    let (a, b) = pair(&dir, json!({"baz": "bazt"}), json!({"baz": "bazz"}));
    let out = mdbdiff(&["diff", &a, &b]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Modified: baz"), "{text}");
    assert!(text.contains("0 added, 1 modified, 0 removed"), "{text}");
}

#[test]
fn diff_long_output() {
    let dir = TempDir::new().unwrap();
    let (a, b) = pair(
        &dir,
        json!({"subjects": [{"title": "sub1"}]}),
        json!({"subjects": [{"title": "sub1"}, {"title": "sub2"}]}),
    );
    let out = mdbdiff(&["diff", &a, &b, "--long"]);
    assert!(stdout(&out).contains("subjects added: sub2"));
}

#[test]
fn identical_records_have_no_changes() {
    let dir = TempDir::new().unwrap();
    let record = json!({"title": "foo", "subjects": [{"title": "a"}]});
    let (a, b) = pair(&dir, record.clone(), record);
    let out = mdbdiff(&["diff", &a, &b]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No changes."));
}

#[test]
fn only_and_drop_filters() {
    let dir = TempDir::new().unwrap();
    let g3 = json!({"type": "http://id.nrk.no/2016/mdb/reference/g3external", "reference": "9c21"});
    let (a, b) = pair(
        &dir,
        json!({"baz": "x", "title": "a"}),
        json!({"baz": "y", "title": "b", "references": [g3]}),
    );
    let out = mdbdiff(&[
        "diff",
        &a,
        &b,
        "--format",
        "json",
        "--only",
        "baz,references",
        "--drop-reference-type",
        "http://id.nrk.no/2016/mdb/reference/g3external",
    ]);
    let diff: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(diff, json!({"added": {}, "modified": {"baz": "y"}, "removed": {}}));
}

#[test]
fn config_file_ignores_fields() {
    let dir = TempDir::new().unwrap();
    let (a, b) = pair(&dir, json!({"title": "a"}), json!({"title": "b"}));
    let config = dir.path().join("differ.toml");
    fs::write(&config, "ignored_fields = [\"title\"]\n").unwrap();
    let out = mdbdiff(&["diff", &a, &b, "--config", &config.display().to_string()]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No changes."));
}

#[test]
fn patch_reconstructs_modified() {
    let dir = TempDir::new().unwrap();
    let modified = json!({
        "title": "foo",
        "baz": "bazz",
        "subjects": [{"title": "sub1"}, {"title": "sub3"}]
    });
    let (a, b) = pair(
        &dir,
        json!({"title": "foo", "baz": "bazt", "subjects": [{"title": "sub1"}, {"title": "sub2"}]}),
        modified.clone(),
    );
    let out = mdbdiff(&["patch", &a, &b]);
    assert!(out.status.success());
    let patched: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(patched, modified);
}

#[test]
fn dedup_prints_cleaned_record() {
    let dir = TempDir::new().unwrap();
    let c1 = json!({"contact": {"title": "ole"}, "role": {"resId": "http://authority.nrk.no/role/V23"}});
    let path = write(dir.path(), "pe.json", &json!({"contributors": [c1.clone(), c1.clone()]}));
    let out = mdbdiff(&["dedup", &path.display().to_string()]);
    assert!(out.status.success());
    let record: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(record, json!({"contributors": [c1]}));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Removed 1 duplicate(s)."));
}

#[test]
fn dedup_rejects_client_generated_roles() {
    let dir = TempDir::new().unwrap();
    let bad = json!({"contact": {"title": "ole"}, "role": {"resId": "http://rest_client/role/1"}});
    let path = write(dir.path(), "pe.json", &json!({"contributors": [bad]}));
    let out = mdbdiff(&["dedup", &path.display().to_string()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("client generated role"));
}

#[test]
fn missing_and_malformed_inputs_fail() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json").display().to_string();
    assert!(!mdbdiff(&["diff", &missing, &missing]).status.success());

    let array = write(dir.path(), "array.json", &json!([1, 2]));
    let out = mdbdiff(&["dedup", &array.display().to_string()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("expected a JSON object"));
}
