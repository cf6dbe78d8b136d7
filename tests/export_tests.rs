use predicates::str::contains;
use shiftclock::export::BOM;
use std::fs;

mod common;
use common::{init_db_with_data, sc};

#[test]
fn test_export_csv_with_bom() {
    let (dir, db) = init_db_with_data();
    let out = dir.path().join("september.csv");
    let out_str = out.to_string_lossy().to_string();

    sc(&db)
        .args(["export", "--period", "2025-09", "--file", &out_str])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(BOM));

    let text = String::from_utf8(bytes[BOM.len()..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "date,status,start,end,break,work");
    assert_eq!(lines[1], "2025-09-01,complete,09:00,18:00,0:30,8:30");
    assert_eq!(lines[2], "2025-09-02,complete,22:00,26:00,0:00,4:00");
}

#[test]
fn test_export_json() {
    let (dir, db) = init_db_with_data();
    let out = dir.path().join("september.json");
    let out_str = out.to_string_lossy().to_string();

    sc(&db)
        .args([
            "export",
            "--format",
            "json",
            "--period",
            "2025-09",
            "--file",
            &out_str,
        ])
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[1]["end"], "26:00");
    assert_eq!(v[0]["break"], "0:30");
}

#[test]
fn test_export_default_filename_in_cwd() {
    let (dir, db) = init_db_with_data();

    sc(&db)
        .current_dir(dir.path())
        .args(["export", "--period", "2025-09"])
        .assert()
        .success();

    assert!(dir.path().join("attendance_2025_09.csv").exists());
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let (dir, db) = init_db_with_data();
    let out = dir.path().join("existing.csv");
    fs::write(&out, "keep me").unwrap();
    let out_str = out.to_string_lossy().to_string();

    sc(&db)
        .args(["export", "--period", "2025-09", "--file", &out_str])
        .assert()
        .failure()
        .stderr(contains("--force"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    sc(&db)
        .args(["export", "--period", "2025-09", "--file", &out_str, "--force"])
        .assert()
        .success();
    assert!(fs::read(&out).unwrap().starts_with(BOM));
}
