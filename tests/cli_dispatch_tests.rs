use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_unkillable")
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("unkillable-cli-{name}-{stamp}.{ext}"))
}

/// Run the binary with a small simulator config so battles and searches stay cheap.
fn run(name: &str, args: &[&str]) -> Output {
    let config = unique_temp_path(name, "json");
    fs::write(
        &config,
        r#"{
            "battle": { "max_boss_turns": 6, "explore_until_boss_turn": 2 },
            "search": { "max_delta_step": 2, "max_speed_sets": 1, "batch_size": 4 }
        }"#,
    )
    .expect("config fixture should be written");

    let output = Command::new(bin())
        .args(args)
        .env("UNKILLABLE_CONFIG", &config)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run");
    let _ = fs::remove_file(config);
    output
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("command should emit json")
}

#[test]
fn simulate_command_emits_battle_log() {
    let output = run("simulate", &["simulate", "easy", "Maneater:220", "Skullcrusher"]);

    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    let log = payload.as_array().expect("log is an array");
    let last = log.last().expect("log is not empty");
    assert_eq!(last["boss_turn"], 6);
    assert_eq!(last["attack"]["attacker"], "Clan Boss");
}

#[test]
fn explore_command_reports_count_and_limited_logs() {
    let output = run("explore", &["explore", "brutal", "Maneater", "--limit", "2"]);

    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    let count = payload["count"].as_u64().expect("count is a number");
    let logs = payload["logs"].as_array().expect("logs is an array");
    assert_eq!(logs.len() as u64, count.min(2));
}

#[test]
fn search_command_emits_accepted_tunings() {
    let output = run("search", &["search", "easy", "Aothar", "--workers", "2"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_json(&output).is_array());
}

#[test]
fn catalog_command_lists_builtin_champions() {
    let output = run("catalog", &["catalog"]);

    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    let names: Vec<&str> = payload
        .as_array()
        .expect("catalog is an array")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert!(names.contains(&"Maneater"));
    assert!(names.contains(&"Pain Keeper"));
}

#[test]
fn roster_champions_can_join_a_battle() {
    let roster = unique_temp_path("roster", "yaml");
    fs::write(
        &roster,
        "champions:\n  - name: Homebrew\n    base_speed: 100\n    bonus_speed: 90\n    skills:\n      - id: A1\n        name: Jab\n        action:\n          attack_target: OneEnemy\n          attack_count: 1\n",
    )
    .expect("roster fixture should be written");
    let roster_arg = roster.to_string_lossy().to_string();

    let output = run(
        "roster",
        &["simulate", "easy", "Homebrew", "--roster", roster_arg.as_str()],
    );
    let validated = run("validate-ok", &["validate", roster_arg.as_str()]);
    let _ = fs::remove_file(&roster);

    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    assert_eq!(payload[0]["attack"]["attacker"], "Homebrew");

    assert_eq!(validated.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&validated.stdout).contains("validation passed"));
}

#[test]
fn validate_command_returns_non_zero_on_invalid_roster() {
    let path = unique_temp_path("invalid-roster", "json");
    fs::write(
        &path,
        r#"{ "champions": [ { "name": "NoBasic", "base_speed": 100, "skills": [] } ] }"#,
    )
    .expect("fixture should be written");

    let output = run("validate-bad", &["validate", path.to_string_lossy().as_ref()]);
    let _ = fs::remove_file(path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
}

#[test]
fn unknown_names_are_runtime_errors() {
    let level = run("bad-level", &["simulate", "impossible", "Maneater"]);
    assert_eq!(level.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&level.stderr).contains("unknown boss level"));

    let champion = run("bad-champion", &["simulate", "easy", "Nobody"]);
    assert_eq!(champion.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&champion.stderr).contains("unknown champion"));
}

#[test]
fn missing_arguments_are_usage_errors() {
    let no_command = run("no-command", &[]);
    assert_eq!(no_command.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&no_command.stderr).contains("usage: unkillable"));

    let no_team = run("no-team", &["search", "easy"]);
    assert_eq!(no_team.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&no_team.stderr).contains("usage: unkillable search"));

    let bad_flag = run("bad-flag", &["explore", "easy", "Maneater", "--limit", "many"]);
    assert_eq!(bad_flag.status.code(), Some(2));
}
