use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn start_only_script() -> tempfile::NamedTempFile {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "action, value").unwrap();
    writeln!(csv, "start").unwrap();
    csv
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let csv = start_only_script();

    let mut cmd = Command::new(cargo_bin!("photo-kiosk"));
    cmd.arg(csv.path())
        .arg("--config")
        .arg("tests/fixtures/config.json")
        .arg("--db-path")
        .arg("some_db");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let csv = start_only_script();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("photo-kiosk"));
    cmd.arg(csv.path())
        .arg("--config")
        .arg("tests/fixtures/config.json")
        .arg("--db-path")
        .arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING").not());
}

#[test]
fn test_camera_unavailable_is_reported() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "action, value").unwrap();
    writeln!(csv, "goto, party").unwrap();
    writeln!(csv, "camera_start").unwrap();

    let mut cmd = Command::new(cargo_bin!("photo-kiosk"));
    cmd.arg(csv.path())
        .arg("--config")
        .arg("tests/fixtures/config.json");

    cmd.assert().success().stderr(predicate::str::contains(
        "Rejected on party screen: Camera unavailable. Please ask an attendant for assistance.",
    ));
}
