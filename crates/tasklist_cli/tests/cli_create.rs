use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

fn run(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    Command::new(exe)
        .args(args)
        .env("TASKLIST_CONFIG_PATH", temp_path("missing-config.json"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tasklist")
}

#[test]
fn create_command_appends_task() {
    let output = run(&["create", "Buy milk"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created task: Buy milk (3)"));
    assert!(stdout.contains("Go shopping"));
    assert!(stdout.contains("Pay the electricity bill"));
    assert!(stdout.contains("Tasks (3)"));
}

#[test]
fn create_command_json_lists_all_tasks() {
    let output = run(&["create", "Buy milk", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["tasks"],
        serde_json::json!([
            { "id": 1, "description": "Go shopping" },
            { "id": 2, "description": "Pay the electricity bill" },
            { "id": 3, "description": "Buy milk" }
        ])
    );
    assert_eq!(json["draft"], "");
}

#[test]
fn create_command_ignores_empty_draft() {
    let output = run(&["create", ""]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nothing to create: draft is empty"));
    assert!(stdout.contains("Tasks (2)"));
}

#[test]
fn create_command_keeps_whitespace_description() {
    let output = run(&["create", "   ", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tasks"][2], serde_json::json!({ "id": 3, "description": "   " }));
    assert_eq!(json["total"], 3);
}

#[test]
fn config_override_rejects_unknown_theme() {
    let output = run(&["--config-override", "theme=sepia", "list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - unknown theme 'sepia'"));
}

#[test]
fn config_file_can_disable_seed_tasks() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let config_path = temp_path("no-seed.json");
    std::fs::write(&config_path, r#"{ "seed_initial_tasks": false }"#).unwrap();

    let output = Command::new(exe)
        .args(["create", "first", "--json"])
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run create command");

    std::fs::remove_file(&config_path).ok();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["tasks"],
        serde_json::json!([{ "id": 1, "description": "first" }])
    );
}

#[test]
fn invalid_config_file_warns_and_uses_defaults() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let config_path = temp_path("broken.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKLIST_CONFIG_PATH", &config_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&config_path).ok();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: using default config"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Go shopping"));
}

#[test]
fn config_override_rejects_unknown_key() {
    let output = run(&["--config-override", "colour=red", "list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - unknown config field 'colour'"));
}
