/*!
 * Blocking Priority Queue
 *
 * One mutex guards the heap, the shutdown flag, the admission sequence and
 * the stats counters. Consumers block on a condvar tied to "non-empty or
 * shutdown requested"; producers never block.
 *
 * # Shutdown Protocol
 *
 * `shutdown()` flips a monotonic flag and broadcasts. Waiters re-check the
 * predicate: while items remain they keep draining in priority order, and
 * once the heap is empty every `dequeue()` returns `QueueEmpty`, which is the
 * signal for workers to exit.
 */

use super::config::{LateAdmission, QueueConfig};
use super::entry::Entry;
use super::heap::PriorityHeap;
use super::stats::{QueueState, QueueStats, StatsRecorder};
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::Priority;
use crate::process::types::Process;
use crate::process::validation::{validate_burst, validate_priority};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// State protected by the queue mutex
struct QueueInner {
    heap: PriorityHeap<Entry>,
    shutdown: bool,
    next_seq: u64,
    stats: StatsRecorder,
}

impl QueueInner {
    #[inline]
    fn state(&self) -> QueueState {
        QueueState::from_flags(self.shutdown, self.heap.len())
    }
}

/// Concurrent, priority-ordered, blocking work queue
///
/// Share it between producers and workers with `Arc`. Equal priorities are
/// served in admission order (the heap's secondary key is a per-queue
/// sequence number). There is no aging, so a steady stream of
/// higher-priority arrivals can starve lower-priority processes.
///
/// # Examples
///
/// ```
/// use prio_sched::{BlockingPriorityQueue, Process};
///
/// let queue = BlockingPriorityQueue::init(3).unwrap();
/// queue.enqueue(Process::new(1, 5, 2)).unwrap();
/// queue.enqueue(Process::new(2, 8, 1)).unwrap();
///
/// assert_eq!(queue.dequeue().unwrap().id, 2);
/// ```
pub struct BlockingPriorityQueue {
    config: QueueConfig,
    inner: Mutex<QueueInner>,
    not_empty: Condvar,
}

impl BlockingPriorityQueue {
    /// Create a queue with default priority bounds and the given capacity
    pub fn init(capacity: usize) -> SchedulerResult<Self> {
        Self::with_config(QueueConfig::with_capacity(capacity))
    }

    /// Create a queue from a validated configuration
    ///
    /// Heap storage is reserved here; if that fails the queue cannot exist
    /// and [`SchedulerError::InitializationFailure`] is returned.
    pub fn with_config(config: QueueConfig) -> SchedulerResult<Self> {
        config.validate()?;
        let heap = PriorityHeap::with_capacity(config.capacity)?;

        info!(
            capacity = config.capacity,
            min_priority = config.min_priority,
            max_priority = config.max_priority,
            late_admission = ?config.late_admission,
            "Priority queue initialized"
        );

        Ok(Self {
            config,
            inner: Mutex::new(QueueInner {
                heap,
                shutdown: false,
                next_seq: 0,
                stats: StatsRecorder::default(),
            }),
            not_empty: Condvar::new(),
        })
    }

    /// Admit a process
    ///
    /// Never blocks. Stamps the arrival time and wakes one waiting worker.
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidPriority`] / [`SchedulerError::InvalidArgument`]
    ///   when priority or burst is out of bounds
    /// - [`SchedulerError::ShuttingDown`] after `shutdown()` under
    ///   [`LateAdmission::Reject`]
    /// - [`SchedulerError::QueueFull`] at capacity; the queue is left unchanged
    pub fn enqueue(&self, mut process: Process) -> SchedulerResult<()> {
        validate_priority(
            process.priority,
            self.config.min_priority,
            self.config.max_priority,
        )?;
        validate_burst(process.burst, self.config.max_burst)?;

        let mut inner = self.inner.lock();

        if inner.shutdown && self.config.late_admission == LateAdmission::Reject {
            debug!(pid = process.id, "Late admission rejected");
            return Err(SchedulerError::ShuttingDown(process.id));
        }

        let capacity = inner.heap.capacity();
        if inner.heap.is_full() {
            return Err(SchedulerError::QueueFull {
                size: inner.heap.len(),
                capacity,
            });
        }

        let (pid, priority) = (process.id, process.priority);
        let seq = inner.next_seq;
        process.arrival_time = Some(Instant::now());
        process.start_time = None;

        if inner.heap.insert(Entry::new(process, seq)).is_err() {
            return Err(SchedulerError::QueueFull {
                size: inner.heap.len(),
                capacity,
            });
        }
        inner.next_seq += 1;
        let size = inner.heap.len();

        // One item added, so one waiter is enough
        self.not_empty.notify_one();
        drop(inner);

        debug!(pid, priority, seq, size, "Process admitted");
        Ok(())
    }

    /// Remove the highest-priority process, blocking while the queue is empty
    ///
    /// Stamps the start time and records `start - arrival` into the wait
    /// statistics in the same critical section as the extraction.
    ///
    /// # Errors
    /// [`SchedulerError::QueueEmpty`] once shutdown was requested and every
    /// remaining process has been handed out. This is terminal.
    pub fn dequeue(&self) -> SchedulerResult<Process> {
        let mut inner = self.inner.lock();

        // Predicate loop: wakeups may be spurious or stolen by another worker
        while inner.heap.is_empty() && !inner.shutdown {
            self.not_empty.wait(&mut inner);
        }

        let Some(entry) = inner.heap.extract_max() else {
            return Err(SchedulerError::QueueEmpty);
        };

        let mut process = entry.process;
        let start = Instant::now();
        process.start_time = Some(start);
        let wait = process
            .arrival_time
            .map(|arrival| start.saturating_duration_since(arrival))
            .unwrap_or_default();
        inner.stats.record(wait);
        let remaining = inner.heap.len();
        drop(inner);

        debug!(
            pid = process.id,
            priority = process.priority,
            wait_us = wait.as_micros() as u64,
            remaining,
            "Process dequeued"
        );
        Ok(process)
    }

    /// Request shutdown and wake every blocked consumer
    ///
    /// Idempotent: returns `true` only for the call that performed the
    /// transition; later calls have no effect.
    pub fn shutdown(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.shutdown {
            return false;
        }
        inner.shutdown = true;
        let remaining = inner.heap.len();

        // Broadcast: every waiter must re-evaluate and either drain or exit
        let woken = self.not_empty.notify_all();
        drop(inner);

        info!(remaining, woken, "Shutdown requested");
        true
    }

    /// Consistent `(processed, average wait, size)` snapshot
    pub fn stats_snapshot(&self) -> QueueStats {
        let inner = self.inner.lock();
        QueueStats {
            processed: inner.stats.processed(),
            average_wait: inner.stats.average_wait(),
            cumulative_wait: inner.stats.cumulative_wait(),
            size: inner.heap.len(),
            capacity: inner.heap.capacity(),
            state: inner.state(),
        }
    }

    pub fn state(&self) -> QueueState {
        self.inner.lock().state()
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().heap.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub fn priority_range(&self) -> RangeInclusive<Priority> {
        self.config.min_priority..=self.config.max_priority
    }

    #[inline]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Tear down the queue, returning undrained processes (highest priority first)
    ///
    /// Taking `self` by value means no worker can still be blocked on it.
    pub fn cleanup(self) -> Vec<Process> {
        let inner = self.inner.into_inner();
        let leftovers: Vec<Process> = inner
            .heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| entry.process)
            .collect();

        if leftovers.is_empty() {
            info!(
                processed = inner.stats.processed(),
                "Priority queue cleaned up"
            );
        } else {
            warn!(
                processed = inner.stats.processed(),
                undrained = leftovers.len(),
                "Priority queue cleaned up with undrained processes"
            );
        }
        leftovers
    }

    /// Tear down a shared queue
    ///
    /// Fails with [`SchedulerError::InUse`] while other handles (typically
    /// live workers) exist. The caller's handle is released either way; the
    /// queue itself lives on until the last handle drops.
    pub fn cleanup_shared(this: Arc<Self>) -> SchedulerResult<Vec<Process>> {
        match Arc::try_unwrap(this) {
            Ok(queue) => Ok(queue.cleanup()),
            Err(shared) => {
                let others = Arc::strong_count(&shared) - 1;
                warn!(others, "Cleanup refused: queue still shared");
                Err(SchedulerError::InUse(others))
            }
        }
    }
}

impl fmt::Debug for BlockingPriorityQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BlockingPriorityQueue")
            .field("config", &self.config)
            .field("size", &inner.heap.len())
            .field("state", &inner.state())
            .field("processed", &inner.stats.processed())
            .finish()
    }
}
