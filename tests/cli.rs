use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const SMALL_GRID: &str = r#"
[grid]
dlong = { start = -20.0, stop = 21.0, step = 4.0 }
decl = { start = -90.0, stop = 90.0, step = 6.0 }
roll = { start = -10.0, stop = 11.0, step = 5.0 }
"#;

#[test]
fn check_range_prints_one_line_per_day() {
    let output = Command::cargo_bin("check_range")
        .expect("check_range bin")
        .args(["--dlong", "0", "--decl", "30", "--roll", "0"])
        .output()
        .expect("run check_range");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let day_lines: Vec<&str> = stdout.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(day_lines.len(), 29);
    assert!(day_lines[0].starts_with("-14  1 -57.17  14.00"));
    assert!(stdout.contains("  0  1 -60.00   0.00"));
    assert!(stdout.contains("# allowable=true alarmed_days=0/29"));
}

#[test]
fn check_range_fails_on_alarm_when_asked() {
    Command::cargo_bin("check_range")
        .expect("check_range bin")
        .args(["--dlong", "0", "--decl", "84.9", "--fail-on-alarm"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Sun above sunshade"))
        .stderr(predicate::str::contains("alarms raised for: pointing"));
}

#[test]
fn check_range_accepts_negative_angles_and_json() {
    let output = Command::cargo_bin("check_range")
        .expect("check_range bin")
        .args(["--dlong", "-3", "--decl", "-54", "--roll", "180", "--json"])
        .output()
        .expect("run check_range");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value[0]["orientation"]["dlong_deg"], -3.0);
    assert_eq!(value[0]["days"].as_array().map(Vec::len), Some(29));
}

#[test]
fn check_range_reviews_pointing_manifest() {
    Command::cargo_bin("check_range")
        .expect("check_range bin")
        .args(["--pointings", "configs/pointings.yaml", "--config", "configs/sector.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# north-ecliptic-54"))
        .stdout(predicate::str::contains("# ecliptic-grazing"))
        .stdout(predicate::str::contains("# allowable=false"));
}

#[test]
fn check_range_requires_a_pointing() {
    Command::cargo_bin("check_range")
        .expect("check_range bin")
        .args(["--decl", "30"])
        .assert()
        .failure();
}

#[test]
fn check_range_rejects_oversized_sector() {
    Command::cargo_bin("check_range")
        .expect("check_range bin")
        .args(["--dlong", "0", "--decl", "30", "--half-sector-days", "3000000000"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("half_sector_days"));
}

#[test]
fn build_grid_writes_three_column_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("small.toml");
    fs::write(&config, SMALL_GRID).expect("write config");
    let csv_path = dir.path().join("out").join("grid.csv");

    Command::cargo_bin("build_grid")
        .expect("build_grid bin")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowable pointings:"));

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ["dlong", "decl", "roll"]);

    let mut rows = 0;
    for record in reader.records() {
        let record = record.expect("record");
        assert_eq!(record.len(), 3);
        let dlong: f64 = record[0].parse().expect("dlong");
        let decl: f64 = record[1].parse().expect("decl");
        let roll: f64 = record[2].parse().expect("roll");
        assert!((-20.0..21.0).contains(&dlong));
        assert!((-90.0..90.0).contains(&decl));
        assert!([-10.0, -5.0, 0.0, 5.0, 10.0].contains(&roll));
        rows += 1;
    }
    assert!(rows > 0, "expected some allowable pointings");
}

#[test]
fn build_grid_json_matches_library_sweep() {
    use sunshade_planner::attitude::SectorConstraints;
    use sunshade_planner::export::grid::read_grid_json;
    use sunshade_planner::survey::{GridAxis, GridSpec, build_grid};

    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("small.toml");
    fs::write(&config, SMALL_GRID).expect("write config");
    let json_path = dir.path().join("grid.json");

    Command::cargo_bin("build_grid")
        .expect("build_grid bin")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let document = read_grid_json(&json_path).expect("grid json");
    let spec = GridSpec {
        dlong: GridAxis::new("dlong", -20.0, 21.0, 4.0).unwrap(),
        decl: GridAxis::new("decl", -90.0, 90.0, 6.0).unwrap(),
        roll: GridAxis::new("roll", -10.0, 11.0, 5.0).unwrap(),
    };
    let expected = build_grid(&spec, &SectorConstraints::default()).expect("library grid");
    assert_eq!(document.rows, expected.triples().collect::<Vec<_>>());
}

#[test]
fn build_grid_honours_rust_log_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("small.toml");
    fs::write(&config, SMALL_GRID).expect("write config");

    Command::cargo_bin("build_grid")
        .expect("build_grid bin")
        .env("RUST_LOG", "debug")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output",
            dir.path().join("grid.json").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("roll slice evaluated"))
        .stderr(predicate::str::contains("allowable grid built"));
}

#[test]
fn build_grid_is_quiet_without_rust_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("small.toml");
    fs::write(&config, SMALL_GRID).expect("write config");

    Command::cargo_bin("build_grid")
        .expect("build_grid bin")
        .env_remove("RUST_LOG")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output",
            dir.path().join("grid.json").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("roll slice evaluated").not());
}

#[test]
fn build_grid_rejects_bad_axis() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("bad.toml");
    fs::write(
        &config,
        "[grid]\nroll = { start = 0.0, stop = 10.0, step = 0.0 }\n",
    )
    .expect("write config");

    Command::cargo_bin("build_grid")
        .expect("build_grid bin")
        .args(["--config", config.to_str().unwrap(), "--output", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid roll axis"));
}
