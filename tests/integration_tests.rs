//! Integration tests for the MDT CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an mdt command
fn mdt() -> Command {
    Command::cargo_bin("mdt").unwrap()
}

/// Helper to create a test workspace in a temp directory
fn setup_test_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    mdt().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to write a 4-column CSV sheet into the workspace
fn write_sheet(tmp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Read a record id out of a persisted dataset document
fn find_record_id(tmp: &TempDir, dataset: &str, name_field: &str, name: &str) -> String {
    let raw = fs::read_to_string(tmp.path().join(format!("datasets/{}.json", dataset))).unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let payload = &envelope["payload"];
    let records = if payload.is_array() {
        payload.as_array().unwrap().clone()
    } else {
        payload["domainGroups"].as_array().unwrap().clone()
    };
    records
        .iter()
        .find(|r| r[name_field] == name)
        .and_then(|r| r["id"].as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| panic!("no record named {name} in {dataset}"))
}

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();
    mdt()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized MDT workspace"));

    assert!(tmp.path().join(".mdt/config.yaml").exists());
    assert!(tmp.path().join("datasets").is_dir());
}

#[test]
fn test_init_twice_fails() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_require_workspace() {
    let tmp = TempDir::new().unwrap();
    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an MDT workspace"));
}

#[test]
fn test_bootstrap_loads_template() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .arg("bootstrap")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groups: 4 created"));

    mdt()
        .current_dir(tmp.path())
        .args(["group", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Commercial Strategy"))
        .stdout(predicate::str::contains("Payer Engagement"));
}

#[test]
fn test_bootstrap_is_idempotent() {
    let tmp = setup_test_workspace();
    mdt().current_dir(tmp.path()).arg("bootstrap").assert().success();
    mdt()
        .current_dir(tmp.path())
        .arg("bootstrap")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groups: 0 created, 4 merged"));

    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 group(s)"));
}

#[test]
fn test_import_sheet_end_to_end() {
    let tmp = setup_test_workspace();
    let sheet = write_sheet(
        &tmp,
        "sheet.csv",
        "Industry,Group,Cat,Sub\n\
         Life Sciences,Strategy,Planning,Forecasting\n\
         Life Sciences,Strategy,Planning,Budgeting\n\
         Life Sciences,Ops,Execution,Delivery\n",
    );

    mdt()
        .current_dir(tmp.path())
        .arg("import")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 3 row(s), 3 fully valid"))
        .stdout(predicate::str::contains("Groups: 2 created"))
        .stdout(predicate::str::contains("Sub-categories: 3 created"));

    // Re-import: everything merges, nothing is created
    mdt()
        .current_dir(tmp.path())
        .arg("import")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Groups: 0 created, 2 merged"))
        .stdout(predicate::str::contains(
            "Sub-categories: 0 created, 3 merged",
        ));
}

#[test]
fn test_import_partial_rows_warn() {
    let tmp = setup_test_workspace();
    let sheet = write_sheet(
        &tmp,
        "partial.csv",
        "Industry,Group,Cat,Sub\n\
         Life Sciences,Strategy,Planning,Forecasting\n\
         Life Sciences,Ops,,\n",
    );

    mdt()
        .current_dir(tmp.path())
        .arg("import")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 2 row(s), 1 fully valid"))
        .stderr(predicate::str::contains("missing recommended category"));

    // The partial row still contributed its domain group
    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ops"));
}

#[test]
fn test_import_empty_sheet_is_rejected() {
    let tmp = setup_test_workspace();
    let sheet = write_sheet(&tmp, "empty.csv", "Industry,Group,Cat,Sub\n");

    mdt()
        .current_dir(tmp.path())
        .arg("import")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data found"));
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let tmp = setup_test_workspace();
    let sheet = write_sheet(
        &tmp,
        "sheet.csv",
        "Industry,Group,Cat,Sub\nLife Sciences,Strategy,Planning,Forecasting\n",
    );

    mdt()
        .current_dir(tmp.path())
        .args(["import", "--dry-run"])
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No domain groups found"));
}

#[test]
fn test_import_template_prints_headers() {
    mdt()
        .args(["import", "--template"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Industry Segment,Domain Group,Category,Sub-Category",
        ));
}

#[test]
fn test_backup_wipe_restore_cycle() {
    let tmp = setup_test_workspace();
    mdt().current_dir(tmp.path()).arg("bootstrap").assert().success();

    let backup = tmp.path().join("backup.json");
    mdt()
        .current_dir(tmp.path())
        .arg("backup")
        .arg(&backup)
        .assert()
        .success();

    mdt()
        .current_dir(tmp.path())
        .args(["reset", "--wipe", "--yes"])
        .assert()
        .success();
    assert!(!tmp.path().join("datasets/domain_groups.json").exists());

    mdt()
        .current_dir(tmp.path())
        .arg("restore")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 5 dataset(s)"));

    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 group(s)"));
}

#[test]
fn test_restore_rejects_malformed_document() {
    let tmp = setup_test_workspace();
    mdt().current_dir(tmp.path()).arg("bootstrap").assert().success();

    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{\"countries\": []}").unwrap();

    mdt()
        .current_dir(tmp.path())
        .arg("restore")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid backup document"));

    // Prior data untouched
    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 group(s)"));
}

#[test]
fn test_health_reports_every_dataset() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("domain_groups"))
        .stdout(predicate::str::contains("industry_segments"))
        .stdout(predicate::str::contains("capability_levels"))
        .stdout(predicate::str::contains("countries"))
        .stdout(predicate::str::contains("organization_types"));
}

#[test]
fn test_seed_single_dataset() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .args(["seed", "capability_levels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reseeded 'capability_levels'"));

    mdt()
        .current_dir(tmp.path())
        .args(["level", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expert"))
        .stdout(predicate::str::contains("81-100"));
}

#[test]
fn test_seed_unknown_dataset_fails() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .args(["seed", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown dataset"));
}

#[test]
fn test_seed_all() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .args(["seed", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reseeded 'domain_groups'"))
        .stdout(predicate::str::contains("reseeded 'countries'"));
}

#[test]
fn test_reset_requires_a_mode() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .args(["reset", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("choose --defaults or --wipe"));
}

#[test]
fn test_reset_defaults_clears_hierarchy() {
    let tmp = setup_test_workspace();
    mdt().current_dir(tmp.path()).arg("bootstrap").assert().success();

    mdt()
        .current_dir(tmp.path())
        .args(["reset", "--defaults", "--yes"])
        .assert()
        .success();

    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No domain groups found"));
}

#[test]
fn test_add_merges_manual_entry() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .args([
            "add",
            "--segment",
            "Technology",
            "--group",
            "Cloud",
            "--category",
            "Migration",
            "--sub",
            "Assessment",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groups: 1 created"));

    // Same entry again: merged, not duplicated
    mdt()
        .current_dir(tmp.path())
        .args([
            "add",
            "--segment",
            "technology",
            "--group",
            "cloud",
            "--category",
            "migration",
            "--sub",
            "assessment",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing new"));
}

#[test]
fn test_author_stamped_into_provenance() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .env("MDT_AUTHOR", "Import Bot")
        .args(["add", "--segment", "Technology", "--group", "Cloud"])
        .assert()
        .success();

    let raw = fs::read_to_string(tmp.path().join("datasets/domain_groups.json")).unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let group = &envelope["payload"]["domainGroups"][0];
    assert_eq!(
        group["description"],
        "Imported from manual entry by Import Bot"
    );
}

#[test]
fn test_group_remove_cascades() {
    let tmp = setup_test_workspace();
    mdt().current_dir(tmp.path()).arg("bootstrap").assert().success();

    let group_id = find_record_id(&tmp, "domain_groups", "name", "Medical Affairs");
    mdt()
        .current_dir(tmp.path())
        .args(["group", "remove", &group_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 categories"))
        .stdout(predicate::str::contains("12 sub-categories"));

    mdt()
        .current_dir(tmp.path())
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 group(s)"));
}

#[test]
fn test_segment_remove_refused_while_referenced() {
    let tmp = setup_test_workspace();
    mdt().current_dir(tmp.path()).arg("bootstrap").assert().success();

    let segment_id = find_record_id(&tmp, "industry_segments", "name", "Life Sciences");
    mdt()
        .current_dir(tmp.path())
        .args(["segment", "remove", &segment_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("referenced by 4 domain group(s)"));
}

#[test]
fn test_segment_list_shows_seeded_segments() {
    let tmp = setup_test_workspace();
    mdt()
        .current_dir(tmp.path())
        .args(["segment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Life Sciences"))
        .stdout(predicate::str::contains("5 segment(s)"));
}
