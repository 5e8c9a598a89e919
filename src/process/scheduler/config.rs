/*!
 * Scheduler Configuration
 *
 * Queue bounds, late-admission policy, worker count and demo workload.
 * Sources, lowest to highest precedence: defaults, JSON file, `SCHED_*`
 * environment variables.
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{
    BURST_UNIT, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT, DEMO_ADMISSION_INTERVAL,
    DEMO_PROCESS_COUNT, DEMO_SETTLE_TIME, MAX_PRIORITY, MAX_QUEUE_CAPACITY,
    MAX_WORKER_COUNT, MIN_PRIORITY, STATS_REPORT_INTERVAL,
};
use crate::core::types::{BurstTime, Priority};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "SCHED_CONFIG";

/// What `enqueue` does once shutdown has been requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateAdmission {
    /// Refuse with `ShuttingDown`
    #[default]
    Reject,
    /// Admit; the item is still served while workers drain
    Accept,
}

impl FromStr for LateAdmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" | "deny" => Ok(Self::Reject),
            "accept" | "allow" => Ok(Self::Accept),
            _ => Err(format!(
                "Invalid late admission policy '{}'. Valid: reject, accept",
                s
            )),
        }
    }
}

/// Per-queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default = "default_min_priority")]
    pub min_priority: Priority,

    #[serde(default = "default_max_priority")]
    pub max_priority: Priority,

    /// Optional cap on burst length; uncapped when `None`
    #[serde(default)]
    pub max_burst: Option<BurstTime>,

    #[serde(default)]
    pub late_admission: LateAdmission,
}

fn default_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_min_priority() -> Priority {
    MIN_PRIORITY
}

fn default_max_priority() -> Priority {
    MAX_PRIORITY
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            min_priority: MIN_PRIORITY,
            max_priority: MAX_PRIORITY,
            max_burst: None,
            late_admission: LateAdmission::Reject,
        }
    }
}

impl QueueConfig {
    /// Default bounds with a specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        if self.capacity == 0 {
            return Err(SchedulerError::InvalidArgument(
                "Queue capacity must be positive".to_string(),
            ));
        }
        if self.capacity > MAX_QUEUE_CAPACITY {
            return Err(SchedulerError::InvalidArgument(format!(
                "Queue capacity {} exceeds maximum ({})",
                self.capacity, MAX_QUEUE_CAPACITY
            )));
        }
        if self.min_priority > self.max_priority {
            return Err(SchedulerError::InvalidArgument(format!(
                "Priority range [{}, {}] is empty",
                self.min_priority, self.max_priority
            )));
        }
        if self.max_burst == Some(0) {
            return Err(SchedulerError::InvalidArgument(
                "Maximum burst must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_env(&mut self) -> SchedulerResult<()> {
        if let Some(v) = env_parse("SCHED_QUEUE_CAPACITY")? {
            self.capacity = v;
        }
        if let Some(v) = env_parse("SCHED_MIN_PRIORITY")? {
            self.min_priority = v;
        }
        if let Some(v) = env_parse("SCHED_MAX_PRIORITY")? {
            self.max_priority = v;
        }
        if let Some(v) = env_parse("SCHED_MAX_BURST")? {
            self.max_burst = Some(v);
        }
        if let Some(v) = env_parse("SCHED_LATE_ADMISSION")? {
            self.late_admission = v;
        }
        Ok(())
    }
}

/// Scheduler configuration: one queue, its worker pool and the demo workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub queue: QueueConfig,

    /// Worker threads consuming the queue
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Simulated execution time per burst unit
    #[serde(default = "default_burst_unit_ms")]
    pub burst_unit_ms: u64,

    /// Processes admitted by the demo binary
    #[serde(default = "default_process_count")]
    pub process_count: u32,

    #[serde(default = "default_admission_interval_ms")]
    pub admission_interval_ms: u64,

    #[serde(default = "default_settle_time_ms")]
    pub settle_time_ms: u64,

    #[serde(default = "default_stats_interval_ms")]
    pub stats_interval_ms: u64,
}

fn default_workers() -> usize {
    DEFAULT_WORKER_COUNT
}

fn default_burst_unit_ms() -> u64 {
    BURST_UNIT.as_millis() as u64
}

fn default_process_count() -> u32 {
    DEMO_PROCESS_COUNT
}

fn default_admission_interval_ms() -> u64 {
    DEMO_ADMISSION_INTERVAL.as_millis() as u64
}

fn default_settle_time_ms() -> u64 {
    DEMO_SETTLE_TIME.as_millis() as u64
}

fn default_stats_interval_ms() -> u64 {
    STATS_REPORT_INTERVAL.as_millis() as u64
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            workers: default_workers(),
            burst_unit_ms: default_burst_unit_ms(),
            process_count: default_process_count(),
            admission_interval_ms: default_admission_interval_ms(),
            settle_time_ms: default_settle_time_ms(),
            stats_interval_ms: default_stats_interval_ms(),
        }
    }
}

impl SchedulerConfig {
    /// Defaults overridden by `SCHED_*` environment variables
    pub fn from_env() -> SchedulerResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> SchedulerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchedulerError::InvalidArgument(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SchedulerResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SchedulerError::InvalidArgument(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Full resolution: `SCHED_CONFIG` file if set, then env overrides
    pub fn load() -> SchedulerResult<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_json_file(path)?,
            _ => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        self.queue.validate()?;
        if self.workers == 0 || self.workers > MAX_WORKER_COUNT {
            return Err(SchedulerError::InvalidArgument(format!(
                "Worker count {} must be between 1 and {}",
                self.workers, MAX_WORKER_COUNT
            )));
        }
        if self.stats_interval_ms == 0 {
            return Err(SchedulerError::InvalidArgument(
                "Stats interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn burst_unit(&self) -> Duration {
        Duration::from_millis(self.burst_unit_ms)
    }

    #[inline]
    pub fn admission_interval(&self) -> Duration {
        Duration::from_millis(self.admission_interval_ms)
    }

    #[inline]
    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_time_ms)
    }

    #[inline]
    pub fn stats_interval(&self) -> Duration {
        Duration::from_millis(self.stats_interval_ms)
    }

    fn apply_env(&mut self) -> SchedulerResult<()> {
        self.queue.apply_env()?;
        if let Some(v) = env_parse("SCHED_WORKERS")? {
            self.workers = v;
        }
        if let Some(v) = env_parse("SCHED_BURST_UNIT_MS")? {
            self.burst_unit_ms = v;
        }
        if let Some(v) = env_parse("SCHED_PROCESS_COUNT")? {
            self.process_count = v;
        }
        if let Some(v) = env_parse("SCHED_ADMISSION_INTERVAL_MS")? {
            self.admission_interval_ms = v;
        }
        if let Some(v) = env_parse("SCHED_SETTLE_TIME_MS")? {
            self.settle_time_ms = v;
        }
        if let Some(v) = env_parse("SCHED_STATS_INTERVAL_MS")? {
            self.stats_interval_ms = v;
        }
        Ok(())
    }
}

/// Read and parse an optional environment variable
fn env_parse<T>(key: &str) -> SchedulerResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            SchedulerError::InvalidArgument(format!("{}={:?}: {}", key, raw, e))
        }),
        Err(_) => Ok(None),
    }
}
