//! End-to-end tests for the sql-seeder binary.

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn sql_seeder_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sql-seeder"))
}

fn write_plan(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const PLAN: &str = r#"
seed: 7
tables:
  - name: users
    records: 12
    create: "CREATE TABLE users (id SERIAL, name VARCHAR(50))"
    columns:
      name: { type: name, length: 30 }
  - name: quizzes
    records: 4
    columns:
      title: { type: words, length: 5 }
      user_id: { type: integer, max: 100 }
"#;

#[test]
fn test_generate_writes_seed_files() {
    let temp_dir = TempDir::new().unwrap();
    let plan = write_plan(&temp_dir, "plan.yaml", PLAN);
    let out = temp_dir.path().join("seeds");

    let output = sql_seeder_bin()
        .args(["generate", plan.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let users = fs::read_to_string(out.join("users.sql")).unwrap();
    assert_eq!(users.matches("INSERT INTO users").count(), 12);
    assert_eq!(users.matches("CREATE TABLE users").count(), 1);
    let quizzes = fs::read_to_string(out.join("quizzes.sql")).unwrap();
    assert_eq!(quizzes.lines().count(), 4);
}

#[test]
fn test_generate_json_stats() {
    let temp_dir = TempDir::new().unwrap();
    let plan = write_plan(&temp_dir, "plan.yaml", PLAN);

    let output = sql_seeder_bin()
        .args(["generate", plan.to_str().unwrap(), "--dry-run", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tables_written"], 2);
    assert_eq!(json["records_written"], 16);
    assert_eq!(json["seed"], 7);
    assert_eq!(json["dry_run"], true);
}

#[test]
fn test_generate_table_filter() {
    let temp_dir = TempDir::new().unwrap();
    let plan = write_plan(&temp_dir, "plan.yaml", PLAN);
    let out = temp_dir.path().join("seeds");

    let output = sql_seeder_bin()
        .args([
            "generate",
            plan.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--tables",
            "quizzes",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(out.join("quizzes.sql").exists());
    assert!(!out.join("users.sql").exists());
}

#[test]
fn test_generate_missing_type_fails() {
    let temp_dir = TempDir::new().unwrap();
    let plan = write_plan(
        &temp_dir,
        "plan.yaml",
        "tables:\n  - name: t\n    columns:\n      a: { length: 3 }\n",
    );

    let output = sql_seeder_bin()
        .args(["generate", plan.to_str().unwrap(), "-o"])
        .arg(temp_dir.path().join("out"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_preview_prints_statements() {
    let temp_dir = TempDir::new().unwrap();
    let plan = write_plan(&temp_dir, "plan.yaml", PLAN);

    let output = sql_seeder_bin()
        .args(["preview", plan.to_str().unwrap(), "--table", "users", "-n", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("INSERT INTO users (name) VALUES (").count(), 3);
    assert!(!stdout.contains("quizzes"));
}

#[test]
fn test_insert_literal() {
    let output = sql_seeder_bin()
        .args(["insert", "--table", "users", "--record", r#"{"name": "Alice", "age": 30}"#])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "INSERT INTO users (name,age) VALUES ('Alice',30);"
    );
}

#[test]
fn test_insert_params_from_stdin() {
    let mut child = sql_seeder_bin()
        .args(["insert", "--table", "t", "--params", "--no-returning"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"name": "Bob", "score": "", "count": "0"}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["text"], "INSERT INTO t (name,count) VALUES ($1,$2);");
    assert_eq!(json["values"], serde_json::json!(["Bob", 0]));
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let temp_dir = TempDir::new().unwrap();
    let plan = write_plan(
        &temp_dir,
        "plan.json",
        r#"{"tables": [{"name": "t", "columns": {"a": {"type": "date"}}}]}"#,
    );

    let lenient = sql_seeder_bin()
        .args(["validate", plan.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(lenient.status.success());
    let json: Value = serde_json::from_slice(&lenient.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);

    let strict = sql_seeder_bin()
        .args(["validate", plan.to_str().unwrap(), "--strict"])
        .output()
        .unwrap();
    assert!(!strict.status.success());
}
