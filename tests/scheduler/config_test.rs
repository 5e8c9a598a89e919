/*!
 * Configuration Tests
 * Environment overrides and JSON files
 */

use pretty_assertions::assert_eq;
use prio_sched::{BlockingPriorityQueue, LateAdmission, SchedulerConfig};
use serial_test::serial;
use std::io::Write;
use std::time::Duration;

const VARS: &[&str] = &[
    "SCHED_CONFIG",
    "SCHED_QUEUE_CAPACITY",
    "SCHED_MAX_PRIORITY",
    "SCHED_MAX_BURST",
    "SCHED_LATE_ADMISSION",
    "SCHED_WORKERS",
    "SCHED_BURST_UNIT_MS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    std::env::set_var("SCHED_QUEUE_CAPACITY", "16");
    std::env::set_var("SCHED_WORKERS", "3");
    std::env::set_var("SCHED_LATE_ADMISSION", "accept");

    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.queue.capacity, 16);
    assert_eq!(config.workers, 3);
    assert_eq!(config.queue.late_admission, LateAdmission::Accept);
    assert_eq!(config.queue.max_burst, None);
}

#[test]
#[serial]
fn test_burst_cap_from_env() {
    clear_env();
    std::env::set_var("SCHED_MAX_BURST", "10");

    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.queue.max_burst, Some(10));
}

#[test]
#[serial]
fn test_unparseable_env_is_invalid_argument() {
    clear_env();
    std::env::set_var("SCHED_WORKERS", "many");

    let err = SchedulerConfig::from_env().unwrap_err();
    clear_env();

    assert!(err.is_invalid_argument());
}

#[test]
#[serial]
fn test_load_reads_file_then_env() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"workers": 2, "burst_unit_ms": 10, "queue": {{"capacity": 8, "max_priority": 5}}}}"#
    )
    .unwrap();

    std::env::set_var("SCHED_CONFIG", file.path());
    std::env::set_var("SCHED_WORKERS", "6");
    let config = SchedulerConfig::load().unwrap();
    clear_env();

    assert_eq!(config.workers, 6);
    assert_eq!(config.burst_unit(), Duration::from_millis(10));
    assert_eq!(config.queue.capacity, 8);
    assert_eq!(config.queue.max_priority, 5);

    let queue = BlockingPriorityQueue::with_config(config.queue).unwrap();
    assert_eq!(queue.capacity(), 8);
    assert_eq!(queue.priority_range(), 1..=5);
}

#[test]
#[serial]
fn test_invalid_file_values_rejected() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sched.json");
    std::fs::write(&path, r#"{"queue": {"capacity": 0}}"#).unwrap();

    let err = SchedulerConfig::from_json_file(&path).unwrap_err();
    assert!(err.is_invalid_argument());

    let missing = SchedulerConfig::from_json_file(dir.path().join("absent.json"));
    assert!(missing.is_err());
}
