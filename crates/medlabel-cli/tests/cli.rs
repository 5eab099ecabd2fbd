//! End-to-end tests for the `medlabel` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const PARACETAMOL: &str =
    "LOT 77A\nBIOCARE\n500 mg PARACETAMOL\nEXP 04-2026\nComprimés\nFAB 02-2024\nTR: 62.5DA\n";

const CLOFENAL: &str = "75mg – diclofénac sodique\nEXP:11-25\nVIGNETTE SAIDAL\nB/20 gélules LP\nCLOFENAL LP\nLOT 605\nFAB 10-24\nPPA 366.60DA\n";

/// Command isolated from the user's own configuration and journal.
fn medlabel(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("medlabel").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_extract_file_as_json() {
    let home = tempfile::tempdir().unwrap();
    let input = write(home.path(), "paracetamol.txt", PARACETAMOL);

    let output = medlabel(&home)
        .args(["extract", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["manufacturer"], serde_json::json!(["BIOCARE"]));
    assert_eq!(json["medication_name"], serde_json::json!(["PARACETAMOL"]));
    assert_eq!(json["lot_number"], serde_json::json!(["77A"]));
    assert_eq!(json["price"], serde_json::json!(["62.5 DA"]));
    assert_eq!(json["registration_number"], serde_json::json!([]));
}

#[test]
fn test_extract_stdin_as_text() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["extract", "--format", "text", "--count"])
        .write_stdin(CLOFENAL)
        .assert()
        .success()
        .stdout(predicate::str::contains("CLOFENAL LP"))
        .stdout(predicate::str::contains("20 gélules"))
        .stdout(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("Total values extracted: 9"));
}

#[test]
fn test_extract_csv_header() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["extract", "-f", "csv"])
        .write_stdin(PARACETAMOL)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "manufacturer,medication_name,active_ingredient,dosage,pharmaceutical_form,lot_number,manufacture_date,expiry_date,price,registration_number",
        ));
}

#[test]
fn test_extract_missing_input() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_save_appends_to_journal() {
    let home = tempfile::tempdir().unwrap();
    let journal = home.path().join("journal.json");

    for _ in 0..2 {
        medlabel(&home)
            .args(["extract", "--save", "--journal", journal.to_str().unwrap()])
            .write_stdin(PARACETAMOL)
            .assert()
            .success()
            .stderr(predicate::str::contains("Saved to"));
    }

    let entries = read_json(&journal);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["timestamp"].is_string());
    assert_eq!(entries[1]["data"]["lot_number"], serde_json::json!(["77A"]));
}

#[test]
fn test_extract_save_replaces_corrupted_journal() {
    let home = tempfile::tempdir().unwrap();
    let journal = write(home.path(), "journal.json", "{ not json");

    medlabel(&home)
        .args(["extract", "--save", "--journal", journal.to_str().unwrap()])
        .write_stdin(PARACETAMOL)
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable"));

    assert_eq!(read_json(&journal).as_array().unwrap().len(), 1);
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let home = tempfile::tempdir().unwrap();
    let labels = home.path().join("labels");
    fs::create_dir(&labels).unwrap();
    write(&labels, "paracetamol.txt", PARACETAMOL);
    write(&labels, "clofenal.txt", CLOFENAL);
    let out = home.path().join("out");

    medlabel(&home)
        .args([
            "batch",
            labels.join("*.txt").to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "--summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("2 successful"));

    let clofenal = read_json(&out.join("clofenal.json"));
    assert_eq!(clofenal["manufacturer"], serde_json::json!(["SAIDAL"]));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.starts_with("filename,status,manufacturer,"));
}

#[test]
fn test_batch_save_writes_every_result() {
    let home = tempfile::tempdir().unwrap();
    write(home.path(), "a.txt", PARACETAMOL);
    write(home.path(), "b.txt", CLOFENAL);
    let journal = home.path().join("journal.json");

    medlabel(&home)
        .args([
            "batch",
            home.path().join("*.txt").to_str().unwrap(),
            "--save",
            "--journal",
            journal.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(read_json(&journal).as_array().unwrap().len(), 2);
}

#[test]
fn test_batch_no_matches() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["batch", home.path().join("*.none").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_interactive_without_saving() {
    let home = tempfile::tempdir().unwrap();
    let journal = home.path().join("journal.json");

    medlabel(&home)
        .args(["interactive", "--no-save", "--journal", journal.to_str().unwrap()])
        .write_stdin(format!("{}\nquit\n", PARACETAMOL))
        .assert()
        .success()
        .stdout(predicate::str::contains("PARACETAMOL"))
        .stderr(predicate::str::contains("1 labels processed, 0 saved"));

    assert!(!journal.exists());
}

#[test]
fn test_interactive_auto_save() {
    let home = tempfile::tempdir().unwrap();
    let journal = home.path().join("journal.json");

    medlabel(&home)
        .args(["interactive", "--auto-save", "--journal", journal.to_str().unwrap()])
        .write_stdin(format!("{}\n{}\n", PARACETAMOL, CLOFENAL))
        .assert()
        .success()
        .stderr(predicate::str::contains("2 labels processed, 2 saved"));

    assert_eq!(read_json(&journal).as_array().unwrap().len(), 2);
}

#[test]
fn test_interactive_conflicting_save_flags() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["interactive", "--auto-save", "--no-save"])
        .assert()
        .failure();
}

#[test]
fn test_journal_show_and_stats() {
    let home = tempfile::tempdir().unwrap();
    let journal = home.path().join("journal.json");

    medlabel(&home)
        .args(["extract", "--save", "--journal", journal.to_str().unwrap()])
        .write_stdin(CLOFENAL)
        .assert()
        .success();

    medlabel(&home)
        .args(["journal", "--file", journal.to_str().unwrap(), "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CLOFENAL LP"));

    medlabel(&home)
        .args(["journal", "stats", "--file", journal.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries: 1"));
}

#[test]
fn test_journal_show_rejects_corrupted_file() {
    let home = tempfile::tempdir().unwrap();
    let journal = write(home.path(), "journal.json", "42");

    medlabel(&home)
        .args(["journal", "show", "--file", journal.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn test_config_init_set_get() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("conf").join("medlabel.json");
    let config = config.to_str().unwrap();

    medlabel(&home)
        .args(["config", "init", "--output", config])
        .assert()
        .success();

    medlabel(&home)
        .args(["config", "init", "--output", config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    medlabel(&home)
        .args(["--config", config, "config", "set", "extraction.currency_unit", "DZD"])
        .assert()
        .success();

    medlabel(&home)
        .args(["--config", config, "config", "get", "extraction.currency_unit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"DZD\""));

    medlabel(&home)
        .args(["--config", config, "extract"])
        .write_stdin(PARACETAMOL)
        .assert()
        .success()
        .stdout(predicate::str::contains("62.5 DZD"));
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["config", "get", "extraction.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_missing_config_file() {
    let home = tempfile::tempdir().unwrap();

    medlabel(&home)
        .args(["--config", "missing.json", "extract"])
        .write_stdin(PARACETAMOL)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
