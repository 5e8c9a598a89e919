/*!
 * Worker Pool
 *
 * OS threads that repeatedly dequeue and execute until the queue reports
 * `QueueEmpty` after shutdown.
 *
 * # Graceful-with-Fallback Shutdown
 *
 * 1. Preferred: `shutdown()` consumes the pool, requests queue shutdown and
 *    joins every worker, returning their reports.
 * 2. Fallback: dropping a live pool does the same with a warning, so workers
 *    never outlive their handle.
 */

use super::queue::BlockingPriorityQueue;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{BURST_UNIT, MAX_WORKER_COUNT, WORKER_THREAD_PREFIX};
use crate::core::types::WorkerId;
use crate::monitoring::worker_span;
use crate::process::types::Process;
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Runs a dequeued process to completion on the calling worker thread
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    fn execute(&self, worker_id: WorkerId, process: &Process);
}

impl<F> Executor for F
where
    F: Fn(WorkerId, &Process) + Send + Sync,
{
    fn execute(&self, worker_id: WorkerId, process: &Process) {
        self(worker_id, process)
    }
}

/// Simulates execution by sleeping `burst * burst_unit`
#[derive(Debug, Clone, Copy)]
pub struct SimulatedExecutor {
    burst_unit: Duration,
}

impl SimulatedExecutor {
    pub fn new(burst_unit: Duration) -> Self {
        Self { burst_unit }
    }

    #[inline]
    pub fn burst_unit(&self) -> Duration {
        self.burst_unit
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(BURST_UNIT)
    }
}

impl Executor for SimulatedExecutor {
    fn execute(&self, worker_id: WorkerId, process: &Process) {
        let wait_ms = process
            .wait_time()
            .map(|w| w.as_secs_f64() * 1000.0)
            .unwrap_or_default();

        info!(
            worker_id,
            pid = process.id,
            priority = process.priority,
            burst = process.burst,
            wait_ms = format_args!("{:.2}", wait_ms),
            "Executing process"
        );

        thread::sleep(process.burst_duration(self.burst_unit));

        debug!(worker_id, pid = process.id, "Process completed");
    }
}

/// What a single worker did before it exited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub worker_id: WorkerId,
    pub executed: u64,
    #[serde(rename = "busy_time_ms", serialize_with = "as_millis_u64")]
    pub busy_time: Duration,
}

fn as_millis_u64<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl WorkerReport {
    fn new(worker_id: WorkerId) -> Self {
        Self {
            worker_id,
            executed: 0,
            busy_time: Duration::ZERO,
        }
    }
}

/// Worker loop: dequeue, execute, repeat until `QueueEmpty`
///
/// Blocks the calling thread. Returns once shutdown was requested and the
/// queue is drained.
pub fn run_worker<E>(worker_id: WorkerId, queue: &BlockingPriorityQueue, executor: &E) -> WorkerReport
where
    E: Executor + ?Sized,
{
    let _span = worker_span(worker_id).entered();
    debug!(worker_id, "Worker started");
    let mut report = WorkerReport::new(worker_id);

    loop {
        match queue.dequeue() {
            Ok(process) => {
                let started = Instant::now();
                executor.execute(worker_id, &process);
                report.executed += 1;
                report.busy_time += started.elapsed();
            }
            Err(SchedulerError::QueueEmpty) => break,
            Err(e) => {
                warn!(worker_id, error = %e, "Worker stopping on unexpected error");
                break;
            }
        }
    }

    info!(
        worker_id,
        executed = report.executed,
        busy_ms = report.busy_time.as_millis() as u64,
        "Worker exiting"
    );
    report
}

/// Fixed set of worker threads draining one shared queue
pub struct WorkerPool {
    queue: Arc<BlockingPriorityQueue>,
    handles: Vec<JoinHandle<WorkerReport>>,
}

impl WorkerPool {
    /// Spawn `workers` named threads, each running [`run_worker`]
    ///
    /// If a thread cannot be spawned the queue is shut down and the workers
    /// already started are joined before the error is returned.
    pub fn spawn<E>(
        queue: Arc<BlockingPriorityQueue>,
        workers: usize,
        executor: Arc<E>,
    ) -> SchedulerResult<Self>
    where
        E: Executor + 'static,
    {
        if workers == 0 || workers > MAX_WORKER_COUNT {
            return Err(SchedulerError::InvalidArgument(format!(
                "Worker count {} must be between 1 and {}",
                workers, MAX_WORKER_COUNT
            )));
        }

        let mut pool = Self {
            queue,
            handles: Vec::with_capacity(workers),
        };

        for worker_id in 0..workers {
            let queue = Arc::clone(&pool.queue);
            let executor = Arc::clone(&executor);

            let spawned = thread::Builder::new()
                .name(format!("{}-{}", WORKER_THREAD_PREFIX, worker_id))
                .spawn(move || run_worker(worker_id, &queue, executor.as_ref()));

            match spawned {
                Ok(handle) => pool.handles.push(handle),
                Err(e) => {
                    pool.shutdown();
                    return Err(SchedulerError::InitializationFailure(format!(
                        "cannot spawn worker {}: {}",
                        worker_id, e
                    )));
                }
            }
        }

        info!(workers, "Worker pool started");
        Ok(pool)
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn queue(&self) -> &Arc<BlockingPriorityQueue> {
        &self.queue
    }

    /// Request queue shutdown and join every worker
    ///
    /// Workers drain what is still queued before exiting.
    pub fn shutdown(mut self) -> Vec<WorkerReport> {
        self.queue.shutdown();
        self.join_all()
    }

    /// Join every worker without requesting shutdown
    ///
    /// Returns only after someone else calls `shutdown()` on the queue.
    pub fn join(mut self) -> Vec<WorkerReport> {
        self.join_all()
    }

    fn join_all(&mut self) -> Vec<WorkerReport> {
        let mut reports = Vec::with_capacity(self.handles.len());
        for handle in std::mem::take(&mut self.handles) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => warn!(thread = %name, "Worker thread panicked"),
            }
        }
        reports
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        warn!(
            workers = self.handles.len(),
            "WorkerPool dropped without calling shutdown() - shutting down and joining"
        );
        self.queue.shutdown();
        self.join_all();
    }
}
