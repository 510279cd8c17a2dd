
use moodwell::ai::prompts::FALLBACK_PROMPTS;
use moodwell::constants::APP_DESCRIPTION;
use predicates::prelude::*;
use tempfile::TempDir;
use test_helpers::base_moodwell_command;

#[test]
fn test_cli_no_args_shows_usage() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_shows_app_description() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(APP_DESCRIPTION));
}

#[test]
fn test_resources_lists_crisis_lines() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("988"))
        .stdout(predicate::str::contains("Text HOME to 741741"))
        .stdout(predicate::str::contains("https://nami.org"));
}

#[test]
fn test_offline_prompt_comes_from_fallback_table() {
    let temp_dir = TempDir::new().unwrap();
    let output = base_moodwell_command(temp_dir.path())
        .args(["prompt", "--mood", "7"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        FALLBACK_PROMPTS.contains(&stdout.trim()),
        "unexpected prompt: {}",
        stdout
    );
}

#[test]
fn test_offline_sentiment_is_neutral() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .args(["sentiment", "Today was wonderful"])
        .assert()
        .success()
        .stdout("neutral\n");
}

#[test]
fn test_journal_requires_sign_in() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .args(["journal", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_invalid_mood_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .args(["mood", "9"])
        .assert()
        .failure();
}

#[test]
fn test_check_in_and_journal_flow() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    base_moodwell_command(dir)
        .args(["signin", "--nickname", "river"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, river!"));

    base_moodwell_command(dir)
        .args(["mood", "4", "--note", "sunny walk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Good"));

    base_moodwell_command(dir)
        .args([
            "journal", "write", "--title", "Walk", "--content", "Saw the river", "--tag", "outside",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(neutral)"));

    base_moodwell_command(dir)
        .args(["journal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk"))
        .stdout(predicate::str::contains("tags: outside"));

    base_moodwell_command(dir)
        .arg("insights")
        .assert()
        .success()
        .stdout(predicate::str::contains("Average mood: 4.0"))
        .stdout(predicate::str::contains("Total entries: 2"));

    base_moodwell_command(dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nickname: river"))
        .stdout(predicate::str::contains("AI: offline"));

    base_moodwell_command(dir).arg("signout").assert().success();

    base_moodwell_command(dir)
        .arg("moods")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_blank_journal_title_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    base_moodwell_command(dir).arg("signin").assert().success();
    base_moodwell_command(dir)
        .args(["journal", "write", "--title", "  ", "--content", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title cannot be empty"));
}

#[test]
fn test_affirmation_by_index_wraps() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .args(["affirmation", "--index", "10"])
        .assert()
        .success()
        .stdout("I am worthy of love and respect\n");
}

#[test]
fn test_json_log_format_writes_json_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let output = base_moodwell_command(temp_dir.path())
        .env("MOODWELL_LOG_FORMAT", "json")
        .args(["-v", "sleep-stories"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ocean Waves"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first_line = stderr.lines().next().expect("expected debug logs");
    let parsed: serde_json::Value = serde_json::from_str(first_line).unwrap();
    assert!(parsed.get("level").is_some());
}

#[test]
fn test_settings_show_defaults_and_persist_changes() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    base_moodwell_command(dir).arg("signin").assert().success();

    base_moodwell_command(dir)
        .arg("settings")
        .assert()
        .success()
        .stdout("Dark mode: off\nReminders: on\nCrisis mode: off\n");

    base_moodwell_command(dir)
        .args(["settings", "--reminders", "off", "--crisis-mode", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminders: off"));

    base_moodwell_command(dir)
        .arg("settings")
        .assert()
        .success()
        .stdout("Dark mode: off\nReminders: off\nCrisis mode: on\n");
}

#[test]
fn test_breathe_rejects_huge_cycle_count() {
    let temp_dir = TempDir::new().unwrap();
    base_moodwell_command(temp_dir.path())
        .args(["breathe", "--cycles", "400000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("400000000"));
}
