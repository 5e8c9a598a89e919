/*!
 * Priority Scheduler - Demo Entry Point
 *
 * Admits randomly generated processes at a fixed interval into a shared
 * priority queue drained by a pool of simulated workers, reports
 * statistics, then shuts down gracefully (early on Ctrl+C).
 */

use miette::{IntoDiagnostic, Result};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use prio_sched::core::limits::MAX_BURST_TIME;
use prio_sched::{
    init_tracing, Admission, BlockingPriorityQueue, SchedulerConfig, SimulatedExecutor,
    WorkerPool,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Priority scheduler starting...");
    let config = SchedulerConfig::load()?;
    info!(
        capacity = config.queue.capacity,
        workers = config.workers,
        burst_unit_ms = config.burst_unit_ms,
        processes = config.process_count,
        "Configuration loaded"
    );

    let queue = Arc::new(BlockingPriorityQueue::with_config(config.queue.clone())?);
    let executor = Arc::new(SimulatedExecutor::new(config.burst_unit()));
    let pool = WorkerPool::spawn(Arc::clone(&queue), config.workers, executor)?;

    let reporter = tokio::spawn(report_stats(Arc::clone(&queue), config.stats_interval()));

    let interrupted = tokio::select! {
        _ = run_workload(Arc::clone(&queue), &config) => false,
        result = tokio::signal::ctrl_c() => {
            result.into_diagnostic()?;
            true
        }
    };

    if interrupted {
        warn!("Interrupted, shutting down early");
    }
    reporter.abort();
    // Cancelled; awaiting releases the reporter's queue handle
    let _ = reporter.await;

    info!("\n{}", queue.stats_snapshot());

    // Joining blocks; keep it off the async workers
    let reports = tokio::task::spawn_blocking(move || pool.shutdown())
        .await
        .into_diagnostic()?;
    for report in &reports {
        info!(
            worker_id = report.worker_id,
            executed = report.executed,
            busy_ms = report.busy_time.as_millis() as u64,
            "Worker report"
        );
    }

    info!("\n{}", queue.stats_snapshot());

    let leftovers = BlockingPriorityQueue::cleanup_shared(queue)?;
    for process in &leftovers {
        warn!(%process, "Never scheduled");
    }

    info!("Priority scheduler stopped");
    Ok(())
}

/// Admit `process_count` random processes, then let the workers settle
async fn run_workload(queue: Arc<BlockingPriorityQueue>, config: &SchedulerConfig) {
    let admission = Admission::new(queue);
    let priorities = config.queue.min_priority..=config.queue.max_priority;
    let bursts = 1..=config.queue.max_burst.unwrap_or(MAX_BURST_TIME);

    for _ in 0..config.process_count {
        let (priority, burst) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(priorities.clone()),
                rng.gen_range(bursts.clone()),
            )
        };

        match admission.submit(priority, burst) {
            Ok(pid) => info!(pid, priority, burst, "Process created"),
            Err(e) => warn!(error = %e, "Process not admitted"),
        }

        tokio::time::sleep(config.admission_interval()).await;
    }

    tokio::time::sleep(config.settle_time()).await;
}

/// Log a stats snapshot every `interval` until aborted
async fn report_stats(queue: Arc<BlockingPriorityQueue>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let stats = queue.stats_snapshot();
        info!(
            processed = stats.processed,
            avg_wait_ms = stats.average_wait.as_millis() as u64,
            size = stats.size,
            state = %stats.state,
            "Queue stats"
        );
    }
}
