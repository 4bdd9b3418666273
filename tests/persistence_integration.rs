//! Integration tests for file-backed configuration.

mod common;

use std::sync::Arc;

use common::fixtures::{SubmissionBuilder, find};
use tagsift::constants::{CHECK_TAG_COUNT, THRESHOLD_MAX_TAG_COUNT};
use tagsift::decision::InvocationModeKind;
use tagsift::rules::{CheckStatus, RulesEngine};
use tagsift::Config;
use tagsift::store::{ChangeKind, ConfigStore};
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> Config {
    Config {
        config_path: Some(dir.path().join("tagsift.json")),
        history_path: Some(dir.path().join("history.jsonl")),
        ..Default::default()
    }
}

#[test]
fn test_threshold_survives_restart() {
    let dir = TempDir::new().expect("temp dir");
    let config = file_config(&dir);
    config.validate().expect("valid config");

    {
        let store = ConfigStore::from_config(&config);
        store
            .update_threshold(THRESHOLD_MAX_TAG_COUNT, 3.0, "ops", Some("tighten"))
            .expect("in bounds");
        store.close();
    }

    let store = Arc::new(ConfigStore::from_config(&config));
    let engine = RulesEngine::from_config(Arc::clone(&store), &config);
    let (content, tags) = SubmissionBuilder::new().with_numbered_tags(4).build();

    let results = engine.check(&content, &tags);
    assert_eq!(find(&results, CHECK_TAG_COUNT).status, CheckStatus::Fail);

    let history = store.history(5);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, ChangeKind::Threshold);
    assert_eq!(history[0].changed_by, "ops");
}

#[test]
fn test_history_log_is_json_lines() {
    let dir = TempDir::new().expect("temp dir");
    let config = file_config(&dir);

    let store = ConfigStore::from_config(&config);
    store
        .update_threshold(THRESHOLD_MAX_TAG_COUNT, 12.0, "ops", None)
        .expect("in bounds");
    store
        .update_threshold(THRESHOLD_MAX_TAG_COUNT, 15.0, "ops", None)
        .expect("in bounds");
    store.close();

    let raw = std::fs::read_to_string(dir.path().join("history.jsonl")).expect("history written");
    let lines: Vec<_> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let event: serde_json::Value = serde_json::from_str(line).expect("each line is JSON");
        assert_eq!(event["item_name"], THRESHOLD_MAX_TAG_COUNT);
    }
}

#[test]
fn test_invocation_mode_override_from_config() {
    let dir = TempDir::new().expect("temp dir");
    let config = Config {
        invocation_mode: Some(InvocationModeKind::Weighted),
        ..file_config(&dir)
    };

    let store = ConfigStore::from_config(&config);

    assert_eq!(store.invocation_mode(), InvocationModeKind::Weighted);
    assert_eq!(store.history(1)[0].changed_by, "environment");
}

#[test]
fn test_export_import_between_stores() {
    let source = ConfigStore::new();
    source
        .update_threshold(THRESHOLD_MAX_TAG_COUNT, 8.0, "ops", None)
        .expect("in bounds");

    let target = ConfigStore::new();
    target
        .import(source.export(), "ops")
        .expect("valid snapshot");

    assert_eq!(target.get_threshold(THRESHOLD_MAX_TAG_COUNT), Some(8.0));
}
