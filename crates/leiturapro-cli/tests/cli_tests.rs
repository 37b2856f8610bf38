//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn leiturapro() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("leiturapro").unwrap()
}

/// A command that cannot see any real config or API key.
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = leiturapro();
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    for var in ["LEITURAPRO_API_KEY", "GEMINI_API_KEY", "API_KEY"] {
        cmd.env_remove(var);
    }
    cmd
}

const SMALL_ROSTER: &str = r#"
[[classes]]
key = "4a"
name = "Turma 4A"
grade_level = "4º Ano"
year = 2025

[[students]]
key = "lia"
name = "Lia Prado"
class = "4a"
reading_level = "Fluente"

[[assessments]]
student = "lia"
date = "2025-03-03"
text_title = "Vidas Secas"
wpm = 120
accuracy = 98
comprehension = 9
math_score = 8
"#;

#[test]
fn help_output() {
    leiturapro()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Classroom literacy and math progress tracker",
        ));
}

#[test]
fn version_output() {
    leiturapro()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("leiturapro"));
}

#[test]
fn dashboard_uses_sample_roster() {
    leiturapro()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Avaliações"))
        .stdout(predicate::str::contains("Em Desenvolvimento"))
        .stdout(predicate::str::contains("Evolução de fluência"));
}

#[test]
fn dashboard_json() {
    let output = leiturapro()
        .args(["dashboard", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_students"], 6);
    assert_eq!(summary["total_assessments"], 14);
    assert_eq!(summary["total_classes"], 3);
    assert_eq!(summary["trend"].as_array().unwrap().len(), 10);
    assert_eq!(summary["levels"].as_array().unwrap().len(), 5);
}

#[test]
fn dashboard_unknown_format() {
    leiturapro()
        .args(["dashboard", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn dashboard_with_roster_file() {
    let dir = TempDir::new().unwrap();
    let roster = dir.path().join("roster.toml");
    std::fs::write(&roster, SMALL_ROSTER).unwrap();

    let output = leiturapro()
        .args(["dashboard", "--format", "json", "--roster"])
        .arg(&roster)
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_students"], 1);
    assert_eq!(summary["average_accuracy_pct"], 98);
    assert_eq!(summary["trend"][0]["label"], "03/03");
    assert_eq!(summary["trend"][0]["student"], "Lia");
}

#[test]
fn classes_lists_counts() {
    leiturapro()
        .arg("classes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Turma 1A"))
        .stdout(predicate::str::contains("Turma 3C"))
        .stdout(predicate::str::contains("3º Ano"));
}

#[test]
fn students_filtered_by_class() {
    leiturapro()
        .args(["students", "--class", "Turma 1A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Clara Souza"))
        .stdout(predicate::str::contains("Bruno Oliveira"))
        .stdout(predicate::str::contains("Carla Mendes").not());
}

#[test]
fn students_search_is_case_insensitive() {
    leiturapro()
        .args(["students", "--search", "SOUZA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Clara Souza"))
        .stdout(predicate::str::contains("Bruno").not());
}

#[test]
fn students_unknown_class() {
    leiturapro()
        .args(["students", "--class", "Turma 9Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no class matches"));
}

#[test]
fn history_is_newest_first() {
    let output = leiturapro()
        .args(["history", "--student", "ana clara"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Turma: Turma 1A"));
    assert!(stdout.contains("Avaliações: 3"));
    let newest = stdout.find("15/04/2024").unwrap();
    let oldest = stdout.find("19/02/2024").unwrap();
    assert!(newest < oldest);
}

#[test]
fn history_ambiguous_student() {
    leiturapro()
        .args(["history", "--student", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

#[test]
fn history_unknown_student_id() {
    leiturapro()
        .args([
            "history",
            "--student",
            "00000000-0000-0000-0000-000000000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no student with id"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created leiturapro.toml"))
        .stdout(predicate::str::contains("Created roster.toml"));

    assert!(dir.path().join("leiturapro.toml").exists());
    assert!(dir.path().join("roster.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).arg("init").assert().success();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_initialized_roster() {
    let dir = TempDir::new().unwrap();
    isolated(&dir).arg("init").assert().success();

    isolated(&dir)
        .args(["validate", "--roster", "roster.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 students"))
        .stdout(predicate::str::contains("Roster valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let roster = dir.path().join("bad.toml");
    std::fs::write(
        &roster,
        r#"
[[students]]
key = "x"
name = "Xavier"
class = "nowhere"
"#,
    )
    .unwrap();

    leiturapro()
        .args(["validate", "--roster"])
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] WARNING: unknown class: nowhere"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    leiturapro()
        .args(["validate", "--roster", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn dashboard_rejects_broken_roster() {
    let dir = TempDir::new().unwrap();
    let roster = dir.path().join("bad.toml");
    std::fs::write(
        &roster,
        r#"
[[students]]
key = "x"
name = "Xavier"
class = "nowhere"
"#,
    )
    .unwrap();

    leiturapro()
        .args(["dashboard", "--roster"])
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown class: nowhere"));
}

#[test]
fn analyze_without_api_key_fails() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["analyze", "--student", "Elisa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key configured"));
}

#[test]
fn passage_without_api_key_fails() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["passage", "--grade", "2º Ano", "--topic", "Animais"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key configured"));
}

#[test]
fn crud_commands_ignore_missing_api_key() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).arg("classes").assert().success();
}
