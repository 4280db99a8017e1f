use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("planner-{nanos}-{file_name}"))
}

fn run(store_path: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_planner"))
        .args(args)
        .env("PLANNER_STORE_PATH", store_path)
        .env("PLANNER_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run planner")
}

fn write_store(path: &PathBuf) {
    let content = serde_json::json!([
        {"task_id": 1, "title": "Install add-in", "priority": 3, "status": "open", "due_date": null},
        {"task_id": 2, "title": "Export sheets", "priority": 4, "status": "open", "due_date": null}
    ]);
    std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

#[test]
fn prioritize_command_updates_only_target() {
    let store_path = temp_path("cli-prioritize.json");
    write_store(&store_path);

    let output = run(&store_path, &["prioritize", "2", "1"]);
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updated task #2 priority to 1"));
    assert_eq!(stored[0]["priority"], 3);
    assert_eq!(stored[1]["priority"], 1);
}

#[test]
fn prioritize_command_rejects_non_positive_priority() {
    let store_path = temp_path("cli-prioritize-bad.json");
    write_store(&store_path);
    let before = std::fs::read_to_string(&store_path).unwrap();

    let zero = run(&store_path, &["prioritize", "1", "0"]);
    let negative = run(&store_path, &["prioritize", "1", "-5"]);
    let after = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    for output in [zero, negative] {
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("ERROR: invalid_input"), "stderr: {stderr}");
    }
    assert_eq!(before, after);
}

#[test]
fn prioritize_command_reports_missing_id() {
    let store_path = temp_path("cli-prioritize-missing.json");
    write_store(&store_path);

    let output = run(&store_path, &["prioritize", "8", "1"]);
    std::fs::remove_file(&store_path).ok();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
}

#[test]
fn config_override_rejects_unknown_key() {
    let store_path = temp_path("cli-prioritize-override.json");
    write_store(&store_path);

    let output = run(
        &store_path,
        &["--config-override", "colour=red", "prioritize", "1", "2"],
    );
    std::fs::remove_file(&store_path).ok();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown config field"));
}
