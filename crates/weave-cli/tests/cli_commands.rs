//! End-to-end tests for the `weave` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small set of linked tables.
fn test_tables() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("encounters.json"),
        r#"{
    "id": "tbl-encounters",
    "schemaVersion": 1,
    "name": "Encounters",
    "tags": ["encounter"],
    "description": "What the party runs into",
    "maxRoll": 6,
    "headers": ["ROLL", "RESULT"],
    "tableData": [
        {"floor": 1, "ceiling": 3, "resultType": "text", "result": "A"},
        {"floor": 4, "ceiling": 6, "resultType": "text", "result": "a lair holding [[treasure]]"}
    ]
}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("treasure.json"),
        r#"{
    "id": "tbl-treasure",
    "schemaVersion": 1,
    "name": "Treasure",
    "tags": ["treasure"],
    "description": "",
    "maxRoll": 6,
    "headers": ["ROLL", "RESULT"],
    "tableData": [
        {"floor": 1, "ceiling": 6, "resultType": "text", "result": "three rubies"}
    ]
}"#,
    )
    .unwrap();
    dir
}

/// Write a weave file with three rows over a d20.
fn write_weave(path: &Path, read_only: bool) {
    let json = format!(
        r#"{{
    "id": "the_wilds",
    "name": "The Wilds",
    "author": "",
    "maxRoll": 20,
    "rows": [
        {{"id": "r1", "from": 1, "to": 7, "targetType": "aspect", "targetId": "haunted"}},
        {{"id": "r2", "from": 8, "to": 14, "targetType": "domain", "targetId": "forest"}},
        {{"id": "r3", "from": 15, "to": 20, "targetType": "oracle", "targetId": "events"}}
    ],
    "createdAt": "2025-01-01T00:00:00Z",
    "updatedAt": "2025-01-01T00:00:00Z",
    "readOnly": {read_only}
}}"#
    );
    fs::write(path, json).unwrap();
}

fn weave() -> Command {
    Command::cargo_bin("weave").unwrap()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_workspace() {
    let parent = TempDir::new().unwrap();
    weave()
        .args(["init", "mygame"])
        .current_dir(parent.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created weave workspace 'mygame'"));

    assert!(parent.path().join("mygame/tables/actions.json").exists());
    assert!(parent.path().join("mygame/tables/treasure.json").exists());
    assert!(parent.path().join("mygame/weaves/the_wilds.json").exists());
}

#[test]
fn init_fails_if_dir_exists() {
    let parent = TempDir::new().unwrap();
    fs::create_dir(parent.path().join("mygame")).unwrap();

    weave()
        .args(["init", "mygame"])
        .current_dir(parent.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_starter_tables_pass_check() {
    let parent = TempDir::new().unwrap();
    weave()
        .args(["init", "mygame"])
        .current_dir(parent.path())
        .assert()
        .success();

    weave()
        .args(["check", "--dir"])
        .arg(parent.path().join("mygame/tables"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

#[test]
fn list_shows_tables() {
    let dir = test_tables();
    weave()
        .args(["list", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Encounters"))
        .stdout(predicate::str::contains("Treasure"))
        .stdout(predicate::str::contains("2 tables"));
}

#[test]
fn list_empty_dir() {
    let dir = TempDir::new().unwrap();
    weave()
        .args(["list", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No tables found"));
}

#[test]
fn show_displays_rows() {
    let dir = test_tables();
    weave()
        .args(["show", "Encounters", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Encounters (d6, 2 rows)"))
        .stdout(predicate::str::contains("1-3"))
        .stdout(predicate::str::contains("[[treasure]]"));
}

#[test]
fn show_unknown_table_fails() {
    let dir = test_tables();
    weave()
        .args(["show", "Nothing", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no table matches 'Nothing'"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_with_forced_value_is_deterministic() {
    let dir = test_tables();
    weave()
        .args(["roll", "encounter", "--roll-value", "2", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("= A"));
}

#[test]
fn roll_resolves_tokens_across_tables() {
    let dir = test_tables();
    weave()
        .args(["roll", "Encounters", "--roll-value", "5", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a lair holding three rubies"))
        .stdout(predicate::str::contains("Chain: Encounters → Treasure"));
}

#[test]
fn raw_roll_leaves_tokens_unresolved() {
    let dir = test_tables();
    weave()
        .args(["roll", "Encounters", "--roll-value", "5", "--raw", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a lair holding [[treasure]]"));
}

#[test]
fn seeded_rolls_repeat() {
    let dir = test_tables();
    let first = weave()
        .args(["roll", "Encounters", "--seed", "night-3", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    let second = weave()
        .args(["roll", "Encounters", "--seed", "night-3", "--raw", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    // Raw and resolved agree on the top-level roll line for a fixed seed.
    let line = |out: &[u8]| {
        String::from_utf8_lossy(out)
            .lines()
            .find(|l| l.contains("Roll:"))
            .map(|l| l.split('→').next().unwrap().trim().to_string())
            .unwrap()
    };
    assert_eq!(line(&first.stdout), line(&second.stdout));
}

#[test]
fn roll_unknown_table_fails() {
    let dir = test_tables();
    weave()
        .args(["roll", "ghosts", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no table matches 'ghosts'"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_on_clean_tables() {
    let dir = test_tables();
    weave()
        .args(["check", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed: 2 tables."));
}

#[test]
fn check_reports_gaps_and_dangling_tokens() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("broken.json"),
        r#"{
    "id": "tbl-broken",
    "schemaVersion": 1,
    "name": "Broken",
    "tags": [],
    "description": "",
    "maxRoll": 10,
    "headers": ["ROLL", "RESULT"],
    "tableData": [
        {"floor": 1, "ceiling": 3, "resultType": "text", "result": "fine"},
        {"floor": 6, "ceiling": 10, "resultType": "text", "result": "see [[nowhere]]"}
    ]
}"#,
    )
    .unwrap();

    weave()
        .args(["check", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("uncovered rolls: 4-5"))
        .stdout(predicate::str::contains("token [[nowhere]] resolves to no table"));
}

// ---------------------------------------------------------------------------
// weave / spread
// ---------------------------------------------------------------------------

#[test]
fn weave_routes_forced_roll() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wilds.json");
    write_weave(&path, false);

    weave()
        .arg("weave")
        .arg(&path)
        .args(["--roll-value", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9/20"))
        .stdout(predicate::str::contains("Domain: forest"));
}

#[test]
fn weave_with_no_rows_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(
        &path,
        r#"{"id": "empty", "name": "Empty", "author": "", "maxRoll": 10, "rows": [],
           "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    weave()
        .arg("weave")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no rows"));
}

#[test]
fn spread_rewrites_ranges() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wilds.json");
    write_weave(&path, false);
    // Skew the ranges, then ask spread to even them out again.
    let skewed = fs::read_to_string(&path)
        .unwrap()
        .replace("\"to\": 7", "\"to\": 2");
    fs::write(&path, skewed).unwrap();

    weave()
        .arg("spread")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Spread 3 rows across 1-20"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"from\": 1"));
    assert!(content.contains("\"to\": 7"));
    assert!(content.contains("\"to\": 20"));
}

#[test]
fn spread_refuses_read_only_weave() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locked.json");
    write_weave(&path, true);

    weave()
        .arg("spread")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}
