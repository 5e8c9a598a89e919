/*!
 * Process Types
 * The schedulable unit of work and its timing metadata
 */

use crate::core::types::{BurstTime, Pid, Priority};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// A schedulable work item
///
/// `arrival_time` is stamped by the queue on admission and `start_time` when a
/// worker dequeues it. Both come from the monotonic clock, so
/// `arrival_time <= start_time` always holds once both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    pub id: Pid,
    pub priority: Priority,
    pub burst: BurstTime,
    #[serde(skip)]
    pub(crate) arrival_time: Option<Instant>,
    #[serde(skip)]
    pub(crate) start_time: Option<Instant>,
}

impl Process {
    /// Create a process that has not been admitted yet
    pub fn new(id: Pid, priority: Priority, burst: BurstTime) -> Self {
        Self {
            id,
            priority,
            burst,
            arrival_time: None,
            start_time: None,
        }
    }

    /// When the queue admitted this process
    #[inline]
    pub fn arrival_time(&self) -> Option<Instant> {
        self.arrival_time
    }

    /// When a worker dequeued this process
    #[inline]
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Time spent waiting in the queue (`start - arrival`)
    ///
    /// `None` until the process has been both admitted and dequeued.
    pub fn wait_time(&self) -> Option<Duration> {
        match (self.arrival_time, self.start_time) {
            (Some(arrival), Some(start)) => Some(start.saturating_duration_since(arrival)),
            _ => None,
        }
    }

    /// Simulated execution time for a given burst unit
    #[inline]
    pub fn burst_duration(&self, unit: Duration) -> Duration {
        unit.saturating_mul(self.burst)
    }
}

impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.priority == other.priority && self.burst == other.burst
    }
}

impl Eq for Process {}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Process {} (priority: {}, burst: {})",
            self.id, self.priority, self.burst
        )
    }
}
