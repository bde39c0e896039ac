mod common;

use common::{read_records, record_numbers, tool_result_ids, tool_use_ids, SessionBuilder};
use serde_json::json;
use sessiontrim_core::{compact, guard::backup_path, CompactConfig};

#[test]
fn test_removes_only_old_large_input() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .user_text("run X a few times")
        .pair("x1", "X", 100, 20)
        .pair("x2", "X", 5000, 20)
        .pair("x3", "X", 50, 20)
        .write(temp.path());

    let config = CompactConfig {
        keep_last_n: 1,
        min_input_size: 2000,
        ..CompactConfig::new()
    };
    let report = compact(&path, &config).unwrap();

    assert_eq!(report.truncated_inputs, 1);
    assert_eq!(report.truncated_results, 0);
    assert_eq!(report.removed_invocations, 1);
    assert_eq!(report.removed_outcomes, 1);
    // the call keeps its text block; the result record is left empty
    assert_eq!(report.dropped_events, 1);

    let records = read_records(&path);
    assert_eq!(tool_use_ids(&records), vec!["x1", "x3"]);
    assert_eq!(tool_result_ids(&records), vec!["x1", "x3"]);
}

#[test]
fn test_empty_session_is_noop_even_live() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("empty.jsonl");
    std::fs::write(&path, "").unwrap();

    let report = compact(&path, &CompactConfig::new()).unwrap();

    assert_eq!(report.removed_invocations, 0);
    assert_eq!(report.removed_outcomes, 0);
    assert_eq!(report.truncated_inputs, 0);
    assert_eq!(report.truncated_results, 0);
    assert_eq!(report.before_total, 0);
    assert_eq!(report.after_total, 0);
    assert_eq!(report.tokens_saved, 0);
    assert!(report.backup.is_none());
    assert!(!backup_path(&path).exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_blank_lines_only_counts_as_empty() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("blank.jsonl");
    std::fs::write(&path, "\n  \n\n").unwrap();

    let report = compact(&path, &CompactConfig::new()).unwrap();
    assert!(report.backup.is_none());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "\n  \n\n");
}

#[test]
fn test_aggressive_uses_lower_result_threshold() {
    let build = || {
        SessionBuilder::new()
            .pair("r1", "Read", 40, 700)
            .pair("r2", "Read", 40, 700)
    };
    let config = CompactConfig {
        keep_last_n: 1,
        min_result_size: 1000,
        dry_run: true,
        ..CompactConfig::new()
    };
    assert_eq!(config.thresholds().min_result_size, 1000);

    let gentle_dir = tempfile::TempDir::new().unwrap();
    let gentle = compact(&build().write(gentle_dir.path()), &config).unwrap();

    let aggressive_config = CompactConfig {
        aggressive: true,
        ..config.clone()
    };
    assert_eq!(aggressive_config.thresholds().min_result_size, 500);
    let aggressive_dir = tempfile::TempDir::new().unwrap();
    let aggressive = compact(&build().write(aggressive_dir.path()), &aggressive_config).unwrap();

    assert_eq!(gentle.truncated_results, 0);
    assert_eq!(gentle.removed_outcomes, 0);
    assert_eq!(aggressive.truncated_results, 1);
    assert_eq!(aggressive.removed_invocations, 1);
    assert_eq!(aggressive.removed_outcomes, 1);
    assert!(aggressive.tokens_saved > gentle.tokens_saved);
}

#[test]
fn test_orphan_outcomes() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .tool_result("ghost-small", 100)
        .tool_result("ghost-large", 1500)
        .pair("b1", "Bash", 40, 40)
        .write(temp.path());

    let report = compact(&path, &CompactConfig::new()).unwrap();

    assert_eq!(report.truncated_results, 1);
    assert_eq!(report.removed_outcomes, 1);
    assert_eq!(report.removed_invocations, 0);
    assert_eq!(report.dropped_events, 1);

    let records = read_records(&path);
    assert_eq!(tool_result_ids(&records), vec!["ghost-small", "b1"]);
    assert_eq!(tool_use_ids(&records), vec!["b1"]);
}

#[test]
fn test_small_orphan_kept() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .tool_result("ghost", 999)
        .write(temp.path());

    let report = compact(&path, &CompactConfig::new()).unwrap();
    assert!(report.is_noop());
    assert_eq!(tool_result_ids(&read_records(&path)), vec!["ghost"]);
}

#[test]
fn test_dry_run_never_touches_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .pair("a", "Read", 5000, 5000)
        .pair("b", "Read", 5000, 5000)
        .pair("c", "Read", 5000, 5000)
        .write(temp.path());
    let original = std::fs::read(&path).unwrap();

    let config = CompactConfig {
        keep_last_n: 1,
        dry_run: true,
        ..CompactConfig::new()
    };
    for _ in 0..3 {
        let report = compact(&path, &config).unwrap();
        assert!(report.dry_run);
        assert!(report.backup.is_none());
        assert_eq!(report.removed_invocations, 2);
        assert_eq!(std::fs::read(&path).unwrap(), original);
    }
    assert!(!backup_path(&path).exists());
}

#[test]
fn test_live_run_writes_backup_of_original() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .pair("a", "Read", 5000, 5000)
        .pair("b", "Read", 40, 40)
        .write(temp.path());
    let original = std::fs::read(&path).unwrap();

    let config = CompactConfig {
        keep_last_n: 1,
        ..CompactConfig::new()
    };
    let report = compact(&path, &config).unwrap();

    let backup = report.backup.clone().unwrap();
    assert_eq!(backup, backup_path(&path));
    assert_eq!(std::fs::read(&backup).unwrap(), original);
    assert_eq!(record_numbers(&read_records(&path)), vec![0, 2, 3]);
    assert!(report.before_total > report.after_total);
    assert_eq!(report.tokens_saved, report.before_total - report.after_total);
}

#[test]
fn test_malformed_line_fails_without_writing() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .pair("a", "Read", 5000, 5000)
        .pair("b", "Read", 40, 40)
        .write(temp.path());
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("{\"type\": \"user\", \"message\": \n");
    std::fs::write(&path, &content).unwrap();

    let config = CompactConfig {
        keep_last_n: 1,
        ..CompactConfig::new()
    };
    let err = compact(&path, &config).unwrap_err();

    assert!(err.to_string().contains(":5:"), "got {err}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    assert!(!backup_path(&path).exists());
}

#[test]
fn test_unknown_records_survive_verbatim() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = SessionBuilder::new()
        .raw(json!({"type": "summary", "summary": "Earlier work", "leafUuid": "l1"}))
        .pair("a", "Read", 5000, 5000)
        .raw(json!({"type": "system", "content": "hook ran", "level": "info"}))
        .pair("b", "Read", 40, 40)
        .write(temp.path());
    let before: Vec<String> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();

    let config = CompactConfig {
        keep_last_n: 1,
        ..CompactConfig::new()
    };
    compact(&path, &config).unwrap();

    let after: Vec<String> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(after.len(), 5);
    assert_eq!(after[0], before[0]);
    assert_ne!(after[1], before[1]);
    assert_eq!(after[2..], before[3..]);
}
