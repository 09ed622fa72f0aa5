//! Integration tests for the `mc` CLI.
//!
//! Each test creates a temp data directory, runs `mc --dir <tmp>` as a
//! subprocess, and verifies stdout and/or the stored JSON files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use serde_json::Value;

/// Get the path to the built `mc` binary.
fn mc_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("mc");
    path
}

/// Create a data directory with three macros, one template, and a config
/// that sends clipboard writes to stdout.
fn create_test_data(dir: &Path) {
    fs::write(
        dir.join("macros.json"),
        r#"[
  {
    "id": "a1",
    "title": "Greeting",
    "content": "<p>Hello</p><br>World&nbsp;!",
    "category": "Emails",
    "updatedAt": 300,
    "shortcut": "1"
  },
  {
    "id": "b2",
    "title": "Follow up",
    "content": "<p>Just checking in</p>",
    "category": "Notes",
    "updatedAt": 200
  },
  {
    "id": "c3",
    "title": "Sign off",
    "content": "Thanks, <b>Team</b> &amp; co",
    "category": "Snippets",
    "updatedAt": 100
  }
]
"#,
    )
    .unwrap();

    fs::write(
        dir.join("builderTemplates.json"),
        r#"[
  {
    "id": "t1",
    "name": "Verify",
    "primaryLabel": "Documents",
    "secondaryLabel": "Outcomes",
    "items": ["A", "B"],
    "outcomes": ["X", "Y"],
    "links": [
      { "id": "l1", "type": "item_requested", "triggerLabel": "B", "macroId": "b2" },
      { "id": "l2", "type": "all_outcomes_selected", "triggerLabel": "", "macroId": "c3" },
      { "id": "l3", "type": "outcome_selected", "triggerLabel": "X", "macroId": "gone" }
    ]
  }
]
"#,
    )
    .unwrap();

    fs::write(dir.join("config.toml"), "[clipboard]\nbackend = \"stdout\"\n").unwrap();
}

fn mc_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(mc_bin());
    cmd.arg("--dir").arg(dir).args(args).env_remove("RUST_LOG");
    cmd
}

/// Run `mc` with the given args, returning (stdout, stderr, success).
fn run_mc(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = mc_command(dir, args).output().expect("failed to run mc");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `mc` expecting success, return stdout.
fn run_mc_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_mc(dir, args);
    if !success {
        panic!("mc {:?} failed:\nstdout: {}\nstderr: {}", args, stdout, stderr);
    }
    stdout
}

/// Run `mc` with `input` on stdin, returning (stdout, stderr, success).
fn run_mc_stdin(dir: &Path, args: &[&str], input: &str) -> (String, String, bool) {
    let mut child = mc_command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run mc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn stored_macros(dir: &Path) -> Vec<Value> {
    let text = fs::read_to_string(dir.join("macros.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn stored_ids(dir: &Path) -> Vec<String> {
    stored_macros(dir)
        .iter()
        .map(|m| m["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

#[test]
fn test_first_run_seeds_samples() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_mc_ok(tmp.path(), &["list"]);
    assert!(out.contains("Request Proof of Ownership"));
    assert!(tmp.path().join("macros.json").exists());
    assert!(tmp.path().join("builderTemplates.json").exists());

    let builders = run_mc_ok(tmp.path(), &["builder", "list"]);
    assert!(builders.contains("Account Verification"));
}

#[test]
fn test_bad_config_is_reported() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[clipboard\n").unwrap();
    let (_, stderr, success) = run_mc(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.starts_with("error: could not parse config.toml"));
}

// ---------------------------------------------------------------------------
// Library commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_orders_by_recent_use() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["list"]);
    let ids: Vec<&str> = out
        .lines()
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(ids, vec!["a1", "b2", "c3"]);
    assert!(out.lines().next().unwrap().ends_with("Greeting [1]"));
}

#[test]
fn test_list_query_and_category() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_mc_ok(tmp.path(), &["list", "CHECKING"]);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("b2"));

    let out = run_mc_ok(tmp.path(), &["list", "--category", "snippets"]);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("c3"));

    let out = run_mc_ok(tmp.path(), &["list", "nothing-matches"]);
    assert_eq!(out.trim(), "No matching macros.");

    let (_, stderr, success) = run_mc(tmp.path(), &["list", "--category", "Memos"]);
    assert!(!success);
    assert!(stderr.contains("unknown category 'Memos'"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["--json", "list", "--category", "Emails"]);
    let items: Vec<Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "a1");
    assert_eq!(items[0]["text"], "Hello\nWorld !");
    assert_eq!(items[0]["shortcut"], "1");
}

#[test]
fn test_show_and_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["show", "c3"]);
    assert!(out.starts_with("c3 Sign off\n"));
    assert!(out.contains("category: Snippets"));
    assert!(out.contains("  Thanks, Team & co"));

    let (_, stderr, success) = run_mc(tmp.path(), &["show", "zz"]);
    assert!(!success);
    assert_eq!(stderr.trim(), "error: macro not found: zz");
}

#[test]
fn test_add_prepends_and_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let id = run_mc_ok(
        tmp.path(),
        &["add", "--title", "New one", "--content", "<p>Body</p>", "--shortcut", "7"],
    );
    let id = id.trim();
    assert_eq!(id.len(), 9);

    let stored = stored_macros(tmp.path());
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[0]["id"], id);
    assert_eq!(stored[0]["category"], "Notes");
    assert_eq!(stored[0]["shortcut"], "7");

    let out = run_mc_ok(tmp.path(), &["list"]);
    assert!(out.starts_with(id));
}

#[test]
fn test_add_uses_configured_category() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    fs::write(
        tmp.path().join("config.toml"),
        "[library]\ndefault_category = \"Macros\"\n",
    )
    .unwrap();
    run_mc_ok(tmp.path(), &["add", "--title", "T", "--content", "C"]);
    assert_eq!(stored_macros(tmp.path())[0]["category"], "Macros");
}

#[test]
fn test_add_rejects_incomplete_or_bad_shortcut() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let (_, stderr, success) = run_mc(tmp.path(), &["add", "--title", "", "--content", "x"]);
    assert!(!success);
    assert!(stderr.contains("needs both a title and content"));

    let (_, stderr, success) = run_mc(
        tmp.path(),
        &["add", "--title", "T", "--content", "x", "--shortcut", "12"],
    );
    assert!(!success);
    assert!(stderr.contains("single character"));
    assert_eq!(stored_macros(tmp.path()).len(), 3);
}

#[test]
fn test_shortcut_accepts_any_single_character() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    run_mc_ok(
        tmp.path(),
        &["add", "--title", "T", "--content", "x", "--shortcut", "é"],
    );
    assert_eq!(stored_macros(tmp.path())[0]["shortcut"], "é");

    run_mc_ok(tmp.path(), &["edit", "b2", "--shortcut", "q"]);
    let b2 = stored_macros(tmp.path())
        .into_iter()
        .find(|m| m["id"] == "b2")
        .unwrap();
    assert_eq!(b2["shortcut"], "q");
}

#[test]
fn test_edit_updates_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    run_mc_ok(
        tmp.path(),
        &["edit", "c3", "--title", "Farewell", "--category", "Emails", "--shortcut", "4"],
    );
    let stored = stored_macros(tmp.path());
    let c3 = stored.iter().find(|m| m["id"] == "c3").unwrap();
    assert_eq!(c3["title"], "Farewell");
    assert_eq!(c3["category"], "Emails");
    assert_eq!(c3["shortcut"], "4");
    assert!(c3["updatedAt"].as_i64().unwrap() > 100);

    run_mc_ok(tmp.path(), &["edit", "c3", "--clear-shortcut"]);
    let stored = stored_macros(tmp.path());
    let c3 = stored.iter().find(|m| m["id"] == "c3").unwrap();
    assert!(c3.get("shortcut").is_none());

    let (_, stderr, success) = run_mc(tmp.path(), &["edit", "c3"]);
    assert!(!success);
    assert!(stderr.contains("nothing to change"));
}

#[test]
fn test_rm_records_deletion() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["rm", "b2"]);
    assert_eq!(out.trim(), "Deleted b2 Follow up");
    assert_eq!(stored_ids(tmp.path()), vec!["a1", "c3"]);

    let log = run_mc_ok(tmp.path(), &["recovery"]);
    assert!(log.contains("delete: macro b2 deleted"));
    assert!(log.contains("Title: Follow up"));

    let (_, _, success) = run_mc(tmp.path(), &["rm", "b2"]);
    assert!(!success);
}

#[test]
fn test_copy_prints_plain_text_and_touches() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let first = run_mc_ok(tmp.path(), &["copy", "c3"]);
    assert_eq!(first, "Thanks, Team & co\n");
    let second = run_mc_ok(tmp.path(), &["copy", "c3"]);
    assert_eq!(first, second);

    // most recently copied macro now lists first
    let out = run_mc_ok(tmp.path(), &["list"]);
    assert!(out.starts_with("c3"));
}

#[test]
fn test_categories() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["categories"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec!["All       3", "Emails    1", "Notes     1", "Macros    0", "Snippets  1"]
    );
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

#[test]
fn test_import_prepends_new_item() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let (out, stderr, success) =
        run_mc_stdin(tmp.path(), &["import"], r#"[{"title":"T","content":"C"}]"#);
    assert!(success, "{}", stderr);
    assert_eq!(out.trim(), "Imported 1 macros");

    let stored = stored_macros(tmp.path());
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[0]["title"], "T");
    assert_eq!(stored[0]["content"], "C");
    assert_eq!(stored[1]["id"], "a1");
}

#[test]
fn test_import_rejects_bad_payload() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let before = fs::read_to_string(tmp.path().join("macros.json")).unwrap();

    let (_, stderr, success) = run_mc_stdin(tmp.path(), &["import"], r#"{"title":"T"}"#);
    assert!(!success);
    assert!(stderr.contains("must be a JSON array"));

    let (_, _, success) = run_mc_stdin(tmp.path(), &["import"], "not json");
    assert!(!success);

    let after = fs::read_to_string(tmp.path().join("macros.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_import_keeps_malformed_elements() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let payload = r#"[42, {"title":"T"}, {"id":"w","title":"W","content":"C","category":"Work","updatedAt":1}]"#;
    let (out, stderr, success) = run_mc_stdin(tmp.path(), &["import"], payload);
    assert!(success, "{}", stderr);
    assert_eq!(out.trim(), "Imported 3 macros");

    let stored = stored_macros(tmp.path());
    assert_eq!(stored.len(), 6);
    assert_eq!(stored[0], Value::from(42));
    assert_eq!(stored[1], serde_json::json!({"title": "T"}));
    assert_eq!(stored[2]["category"], "Work");

    let out = run_mc_ok(tmp.path(), &["list"]);
    let ids: Vec<&str> = out
        .lines()
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(ids, vec!["a1", "b2", "c3"]);
}

#[test]
fn test_export_then_import_from_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let backup = tmp.path().join("backup.json");
    let out = run_mc_ok(
        tmp.path(),
        &["export", "--output", backup.to_str().unwrap()],
    );
    assert!(out.starts_with("Exported 3 macros"));

    let exported: Vec<Value> =
        serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(exported, stored_macros(tmp.path()));

    run_mc_ok(tmp.path(), &["import", backup.to_str().unwrap()]);
    assert_eq!(
        stored_ids(tmp.path()),
        vec!["a1", "b2", "c3", "a1", "b2", "c3"]
    );
}

// ---------------------------------------------------------------------------
// Context menu
// ---------------------------------------------------------------------------

#[test]
fn test_menu_groups_by_category() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["menu"]);
    assert_eq!(
        out,
        "MacroCopy Pro\n  Emails\n    a1  Greeting\n  Notes\n    b2  Follow up\n  Snippets\n    c3  Sign off\n"
    );
}

#[test]
fn test_insert_matches_copy() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let inserted = run_mc_ok(tmp.path(), &["insert", "a1"]);
    let copied = run_mc_ok(tmp.path(), &["copy", "a1"]);
    assert_eq!(inserted, "Hello\nWorld !\n");
    assert_eq!(inserted, copied);
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn test_builder_note_sections() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(
        tmp.path(),
        &["builder", "note", "--received", "A", "--requested", "B", "--outcome", "Y"],
    );
    assert_eq!(
        out,
        "**Received:**\n- A\n\n**Requested:**\n- B\n\n**Outcome:**\n- Y\n\nShortcuts:\n  l1  Follow up\n"
    );
}

#[test]
fn test_builder_note_placeholder() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["builder", "note", "Verify"]);
    assert_eq!(out, "Start selecting items to build your note...\n");
}

#[test]
fn test_builder_note_detail_and_toggle_back() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(
        tmp.path(),
        &["builder", "note", "t1", "--received", "B", "--detail", "B=4598"],
    );
    assert_eq!(out, "**Received:**\n- B 4598\n");

    // pressing received twice returns the item to none
    let out = run_mc_ok(
        tmp.path(),
        &["builder", "note", "--received", "A", "--received", "A"],
    );
    assert_eq!(out, "Start selecting items to build your note...\n");

    let (_, stderr, success) = run_mc(tmp.path(), &["builder", "note", "--detail", "A=1"]);
    assert!(!success);
    assert!(stderr.contains("must be received"));

    let (_, stderr, success) = run_mc(tmp.path(), &["builder", "note", "--received", "Z"]);
    assert!(!success);
    assert!(stderr.contains("item not found: Z"));
}

#[test]
fn test_builder_note_links_to_missing_macro_are_hidden() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(
        tmp.path(),
        &["--json", "builder", "note", "--outcome", "X"],
    );
    let note: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(note["note"], "**Outcome:**\n- X");
    assert_eq!(note["shortcuts"], Value::Array(vec![]));

    // copying through the dangling link is a silent no-op
    let out = run_mc_ok(
        tmp.path(),
        &["builder", "note", "--outcome", "X", "--copy-link", "l3"],
    );
    assert_eq!(out, "**Outcome:**\n- X\n");
}

#[test]
fn test_builder_note_all_outcomes_link() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_mc_ok(tmp.path(), &["--json", "builder", "note", "--outcome", "X"]);
    let note: Value = serde_json::from_str(&out).unwrap();
    assert!(note["shortcuts"].as_array().unwrap().is_empty());

    let out = run_mc_ok(
        tmp.path(),
        &["builder", "note", "--all-outcomes", "--copy-link", "l2"],
    );
    assert_eq!(
        out,
        "**Outcome:**\n- X\n- Y\n\nShortcuts:\n  l2  Sign off\nThanks, Team & co\n"
    );

    let (_, stderr, success) = run_mc(tmp.path(), &["builder", "note", "--copy-link", "l2"]);
    assert!(!success);
    assert!(stderr.contains("link l2 is not active"));
}

#[test]
fn test_builder_note_copy_to_clipboard() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["builder", "note", "--requested", "A", "--copy"]);
    assert_eq!(out, "**Requested:**\n- A\n**Requested:**\n- A\n");
}

#[test]
fn test_builder_new_edit_and_rename_cascade() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let id = run_mc_ok(
        tmp.path(),
        &["builder", "new", "--name", "Refunds", "--item", "Receipt", "--outcome", "Paid"],
    );
    let id = id.trim().to_string();

    let shown = run_mc_ok(tmp.path(), &["--json", "builder", "show", "refunds"]);
    let template: Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(template["id"], id.as_str());
    assert_eq!(template["primaryLabel"], "Items");
    assert_eq!(template["secondaryLabel"], "Outcomes");
    assert_eq!(template["links"], Value::Array(vec![]));

    // rename B in t1: the l1 link follows it
    let out = run_mc_ok(
        tmp.path(),
        &["builder", "edit", "t1", "--rename-item", "B=Bank Statement", "--add-outcome", "Z"],
    );
    assert!(out.contains("Updated 1 links"));
    let note = run_mc_ok(
        tmp.path(),
        &["builder", "note", "t1", "--requested", "Bank Statement"],
    );
    assert!(note.contains("l1  Follow up"));

    let (_, stderr, success) = run_mc(tmp.path(), &["builder", "edit", "t1", "--add-item", "A"]);
    assert!(!success);
    assert!(stderr.contains("item already exists: A"));
}

#[test]
fn test_builder_links() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    // defaults: item_requested, first item, first macro
    let link_id = run_mc_ok(tmp.path(), &["builder", "link", "add", "t1"]);
    let link_id = link_id.trim().to_string();
    let shown = run_mc_ok(tmp.path(), &["--json", "builder", "show", "t1"]);
    let template: Value = serde_json::from_str(&shown).unwrap();
    let link = &template["links"][3];
    assert_eq!(link["id"], link_id.as_str());
    assert_eq!(link["type"], "item_requested");
    assert_eq!(link["triggerLabel"], "A");
    assert_eq!(link["macroId"], "a1");

    run_mc_ok(
        tmp.path(),
        &["builder", "link", "set", "t1", &link_id, "--type", "item_received", "--macro", "c3"],
    );
    let note = run_mc_ok(tmp.path(), &["builder", "note", "--received", "A"]);
    assert!(note.ends_with(&format!("Shortcuts:\n  {}  Sign off\n", link_id)));

    let (_, stderr, success) = run_mc(
        tmp.path(),
        &["builder", "link", "set", "t1", &link_id, "--type", "item_flagged"],
    );
    assert!(!success);
    assert!(stderr.contains("unknown link type"));

    run_mc_ok(tmp.path(), &["builder", "link", "rm", "t1", &link_id]);
    let (_, stderr, success) = run_mc(tmp.path(), &["builder", "link", "rm", "t1", &link_id]);
    assert!(!success);
    assert!(stderr.contains("link not found"));
}

#[test]
fn test_builder_rm_falls_back_to_first() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    run_mc_ok(tmp.path(), &["builder", "new", "--name", "Second"]);

    let out = run_mc_ok(tmp.path(), &["builder", "rm", "Verify"]);
    assert_eq!(out, "Deleted template Verify\nActive template: Second\n");

    let out = run_mc_ok(tmp.path(), &["builder", "rm", "Second"]);
    assert_eq!(out, "Deleted template Second\nNo builder templates left.\n");

    // an empty template list stays empty; only a missing one is seeded
    let out = run_mc_ok(tmp.path(), &["builder", "list"]);
    assert!(out.starts_with("No builder templates."));
    let (_, stderr, success) = run_mc(tmp.path(), &["builder", "note"]);
    assert!(!success);
    assert!(stderr.contains("no builder templates exist"));
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[test]
fn test_recovery_empty_path_and_prune() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let out = run_mc_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "Recovery log is empty.");

    let out = run_mc_ok(tmp.path(), &["recovery", "path"]);
    assert!(out.trim().ends_with(".recovery.log"));

    run_mc_ok(tmp.path(), &["rm", "a1"]);
    let out = run_mc_ok(tmp.path(), &["recovery", "prune", "--all"]);
    assert_eq!(out.trim(), "Pruned 1 entries");
    let out = run_mc_ok(tmp.path(), &["--json", "recovery"]);
    assert_eq!(out.trim(), "[]");
}
