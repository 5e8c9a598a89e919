/*!
 * Admission
 * Producer-side helpers: PID allocation, full-queue policy and batch admission
 */

use super::queue::BlockingPriorityQueue;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{BurstTime, Pid, Priority};
use crate::process::types::Process;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Monotonic PID source, starting at 1
#[derive(Debug)]
pub struct PidAllocator {
    next: AtomicU32,
}

impl PidAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: Pid) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Uniqueness only; no ordering with other memory is implied
    #[inline]
    pub fn next(&self) -> Pid {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do when the queue reports `QueueFull`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullPolicy {
    /// Surface `QueueFull` to the caller immediately
    #[default]
    Reject,
    /// Retry up to `attempts` more times, sleeping `delay` in between
    Backoff { attempts: u32, delay: Duration },
}

/// Outcome of a batch admission
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AdmissionReport {
    pub admitted: Vec<Pid>,
    pub rejected: Vec<(Pid, SchedulerError)>,
}

impl AdmissionReport {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Producer handle onto a shared queue
#[derive(Debug)]
pub struct Admission {
    queue: Arc<BlockingPriorityQueue>,
    policy: FullPolicy,
    pids: PidAllocator,
}

impl Admission {
    pub fn new(queue: Arc<BlockingPriorityQueue>) -> Self {
        Self::with_policy(queue, FullPolicy::Reject)
    }

    pub fn with_policy(queue: Arc<BlockingPriorityQueue>, policy: FullPolicy) -> Self {
        Self {
            queue,
            policy,
            pids: PidAllocator::new(),
        }
    }

    #[inline]
    pub fn policy(&self) -> FullPolicy {
        self.policy
    }

    /// Build a process with a fresh PID and admit it
    pub fn submit(&self, priority: Priority, burst: BurstTime) -> SchedulerResult<Pid> {
        let pid = self.pids.next();
        self.admit(Process::new(pid, priority, burst))?;
        Ok(pid)
    }

    /// Admit one process, applying the full-queue policy
    ///
    /// Only `QueueFull` is retried; every other error is returned as is.
    pub fn admit(&self, process: Process) -> SchedulerResult<()> {
        let (attempts, delay) = match self.policy {
            FullPolicy::Reject => (0, Duration::ZERO),
            FullPolicy::Backoff { attempts, delay } => (attempts, delay),
        };

        let mut retry = 0;
        loop {
            match self.queue.enqueue(process.clone()) {
                Ok(()) => return Ok(()),
                Err(SchedulerError::QueueFull { size, capacity }) if retry < attempts => {
                    retry += 1;
                    debug!(pid = process.id, size, capacity, retry, "Queue full, backing off");
                    thread::sleep(delay);
                }
                Err(e) => {
                    warn!(pid = process.id, error = %e, "Admission rejected");
                    return Err(e);
                }
            }
        }
    }

    /// Admit every process, collecting per-process outcomes
    pub fn admit_batch<I>(&self, processes: I) -> AdmissionReport
    where
        I: IntoIterator<Item = Process>,
    {
        let mut report = AdmissionReport::default();
        for process in processes {
            let pid = process.id;
            match self.admit(process) {
                Ok(()) => report.admitted.push(pid),
                Err(e) => report.rejected.push((pid, e)),
            }
        }
        report
    }
}
