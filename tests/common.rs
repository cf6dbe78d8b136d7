#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use tempfile::TempDir;

/// `shiftclock` in test mode (no config file is read or written).
pub fn sc(db: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("shiftclock");
    cmd.args(["--test", "--db", db, "--owner", "tester"]);
    cmd.env_remove("SHIFTCLOCK_LOG");
    cmd
}

/// Fresh temp dir with an initialized database inside it.
pub fn setup_test_db() -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("shiftclock.sqlite").to_string_lossy().to_string();

    sc(&db_path).arg("init").assert().success();

    (dir, db_path)
}

/// Two complete sessions in September 2025:
/// 09-01 09:00-18:00 with a 30 minute break (8:30), 09-02 22:00-02:00 (4:00).
pub fn init_db_with_data() -> (TempDir, String) {
    let (dir, db) = setup_test_db();

    sc(&db)
        .args([
            "add",
            "2025-09-01",
            "--in",
            "09:00",
            "--out",
            "18:00",
            "--break",
            "12:00-12:30",
        ])
        .assert()
        .success();

    sc(&db)
        .args(["add", "2025-09-02", "--in", "22:00", "--out", "02:00", "--next-day"])
        .assert()
        .success();

    (dir, db)
}
