/*!
 * Scheduler Statistics
 * Wait-time accounting updated under the queue lock, and its snapshot type
 */

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Counters owned by the queue state
///
/// Not a separate lock domain: the queue mutates this in the same critical
/// section as the extraction that produced the measurement, so
/// `cumulative_wait` always covers exactly `processed` measurements.
#[derive(Debug, Default, Clone)]
pub(super) struct StatsRecorder {
    processed: u64,
    cumulative_wait: Duration,
}

impl StatsRecorder {
    #[inline]
    pub fn record(&mut self, wait: Duration) {
        self.processed += 1;
        self.cumulative_wait = self.cumulative_wait.saturating_add(wait);
    }

    #[inline]
    pub fn processed(&self) -> u64 {
        self.processed
    }

    #[inline]
    pub fn cumulative_wait(&self) -> Duration {
        self.cumulative_wait
    }

    /// Mean wait over processed items (zero before the first dequeue)
    pub fn average_wait(&self) -> Duration {
        if self.processed == 0 {
            return Duration::ZERO;
        }
        let nanos = self.cumulative_wait.as_nanos() / u128::from(self.processed);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Queue lifecycle
///
/// `Running` → `Draining` → `Stopped`, driven only by `shutdown()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueState {
    /// Shutdown not requested
    Running,
    /// Shutdown requested, items still queued
    Draining,
    /// Shutdown requested and drained; every dequeue returns `QueueEmpty`
    Stopped,
}

impl QueueState {
    #[inline]
    pub(super) fn from_flags(shutdown: bool, size: usize) -> Self {
        match (shutdown, size) {
            (false, _) => QueueState::Running,
            (true, 0) => QueueState::Stopped,
            (true, _) => QueueState::Draining,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            QueueState::Running => "running",
            QueueState::Draining => "draining",
            QueueState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consistent snapshot of queue counters, read under the queue lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub processed: u64,
    #[serde(rename = "average_wait_ms", serialize_with = "as_millis_f64")]
    pub average_wait: Duration,
    #[serde(rename = "cumulative_wait_ms", serialize_with = "as_millis_f64")]
    pub cumulative_wait: Duration,
    pub size: usize,
    pub capacity: usize,
    pub state: QueueState,
}

fn as_millis_f64<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(millis_f64(*d))
}

#[inline]
fn millis_f64(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

impl fmt::Display for QueueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scheduler Statistics ===")?;
        writeln!(f, "Total processes handled: {}", self.processed)?;
        if self.processed > 0 {
            writeln!(
                f,
                "Average wait time: {:.2} ms",
                millis_f64(self.average_wait)
            )?;
        }
        writeln!(f, "Queue size: {}/{}", self.size, self.capacity)?;
        writeln!(f, "State: {}", self.state)?;
        write!(f, "===========================")
    }
}
