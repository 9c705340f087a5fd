//! Integration tests for running event files through the transform

use event_transform::{Event, Identity, OutputFormat, Runner, RunnerConfig, TransformError, Transformer};
use std::fs;
use tempfile::TempDir;

const EVENTS: &str = r#"{"name":"customers","properties":{"email":"jane@example.com"}}
{"name":"orders","properties":{"id":42,"customer_id":7,"status":"Shipped","updated_at":"2024-01-02"}}

{"name":"invoices","properties":{"amount":10}}
"#;

fn setup(input: &str) -> (TempDir, RunnerConfig) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("events.ndjson");
    fs::write(&input_path, input).unwrap();

    let config = RunnerConfig {
        input: Some(input_path),
        output: Some(dir.path().join("out")),
        ..Default::default()
    };
    (dir, config)
}

#[test]
fn test_ndjson_file_run() {
    let (_dir, config) = setup(EVENTS);
    let output = config.output.clone().unwrap();

    let stats = Runner::new(config, Transformer::new()).run_configured().unwrap();

    assert_eq!(stats.events_in, 3);
    assert_eq!(stats.events_out, 4);
    assert_eq!(stats.fanned_out, 1);

    let written = fs::read_to_string(output).unwrap();
    let events: Vec<Event> = written.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["customers", "orders", "order_events", "invoices"]);
    assert_eq!(events[0].properties().get_str_or_empty("username"), "jane");
    assert_eq!(events[2].properties().get_str_or_empty("event_type"), "order_shipped");
}

#[test]
fn test_json_array_file() {
    let (_dir, mut config) = setup(EVENTS);
    config.format = OutputFormat::JsonArray;
    let output = config.output.clone().unwrap();

    Runner::new(config, Transformer::new()).run_configured().unwrap();

    let events: Vec<Event> = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(events.len(), 4);
}

#[test]
fn test_identity_runner_copies_events() {
    let (_dir, config) = setup(EVENTS);
    let output = config.output.clone().unwrap();

    let stats = Runner::new(config, Identity).run_configured().unwrap();

    assert_eq!(stats.events_out, 3);
    assert_eq!(fs::read_to_string(output).unwrap().lines().count(), 3);
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let config = RunnerConfig {
        input: Some(dir.path().join("nope.ndjson")),
        output: Some(dir.path().join("out")),
        ..Default::default()
    };

    let result = Runner::new(config, Transformer::new()).run_configured();

    assert!(matches!(result, Err(TransformError::IoError(_))));
}

#[test]
fn test_yaml_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transform.yaml");
    fs::write(&path, "input: events.ndjson\nformat: json-array\nskip_invalid: true\n").unwrap();

    let config = RunnerConfig::load_from_file(&path).unwrap();

    assert_eq!(config.input.as_deref(), Some(std::path::Path::new("events.ndjson")));
    assert_eq!(config.output, None);
    assert_eq!(config.format, OutputFormat::JsonArray);
    assert!(config.skip_invalid);
}

#[test]
fn test_bad_yaml_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transform.yaml");
    fs::write(&path, "format: xml\n").unwrap();

    let result = RunnerConfig::load_from_file(&path);

    assert!(matches!(result, Err(TransformError::ConfigError(_))));
}
