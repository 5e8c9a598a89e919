/*!
 * Worker Pool Tests
 */

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use prio_sched::{
    process::scheduler::run_worker, BlockingPriorityQueue, Process, SimulatedExecutor,
    WorkerId, WorkerPool,
};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Records `(worker, pid)` in execution order
fn recorder() -> (Arc<Mutex<Vec<(WorkerId, u32)>>>, impl Fn(WorkerId, &Process) + Send + Sync) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |worker: WorkerId, p: &Process| {
        sink.lock().push((worker, p.id));
    })
}

#[test]
fn test_single_worker_executes_in_priority_order() {
    let queue = BlockingPriorityQueue::init(8).unwrap();
    for (pid, priority) in [(1, 3), (2, 9), (3, 6), (4, 9)] {
        queue.enqueue(Process::new(pid, priority, 1)).unwrap();
    }
    queue.shutdown();

    let (log, executor) = recorder();
    let report = run_worker(0, &queue, &executor);

    assert_eq!(report.executed, 4);
    let order: Vec<u32> = log.lock().iter().map(|(_, pid)| *pid).collect();
    assert_eq!(order, vec![2, 4, 3, 1]);
}

#[test]
fn test_pool_drains_before_exit() {
    let queue = Arc::new(BlockingPriorityQueue::init(32).unwrap());
    let (log, executor) = recorder();
    let pool = WorkerPool::spawn(Arc::clone(&queue), 4, Arc::new(executor)).unwrap();

    for pid in 1..=20 {
        queue.enqueue(Process::new(pid, (pid % 10 + 1) as u8, 1)).unwrap();
    }

    let reports = pool.shutdown();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports.iter().map(|r| r.executed).sum::<u64>(), 20);

    let mut pids: Vec<u32> = log.lock().iter().map(|(_, pid)| *pid).collect();
    pids.sort_unstable();
    assert_eq!(pids, (1..=20).collect::<Vec<_>>());

    let worker_ids: Vec<_> = reports.iter().map(|r| r.worker_id).collect();
    assert_eq!(worker_ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_workers_are_named_threads() {
    let queue = Arc::new(BlockingPriorityQueue::init(4).unwrap());
    let names = Arc::new(Mutex::new(Vec::new()));
    let executor = {
        let names = Arc::clone(&names);
        move |_: WorkerId, _: &Process| {
            let name = thread::current().name().map(str::to_string);
            names.lock().push(name);
        }
    };

    let pool = WorkerPool::spawn(Arc::clone(&queue), 1, Arc::new(executor)).unwrap();
    queue.enqueue(Process::new(1, 5, 1)).unwrap();
    pool.shutdown();

    assert_eq!(*names.lock(), vec![Some("sched-worker-0".to_string())]);
}

#[test]
fn test_simulated_execution_is_parallel_across_workers() {
    let queue = Arc::new(BlockingPriorityQueue::init(8).unwrap());
    let executor = Arc::new(SimulatedExecutor::new(Duration::from_millis(50)));
    let pool = WorkerPool::spawn(Arc::clone(&queue), 4, executor).unwrap();

    let started = Instant::now();
    for pid in 1..=4 {
        queue.enqueue(Process::new(pid, 5, 2)).unwrap();
    }
    let reports = pool.shutdown();
    let elapsed = started.elapsed();

    assert_eq!(reports.iter().map(|r| r.executed).sum::<u64>(), 4);
    // Four 100ms bursts on four workers finish well under the serial 400ms
    assert!(elapsed < Duration::from_millis(350), "took {:?}", elapsed);
}

#[test]
fn test_join_waits_for_external_shutdown() {
    let queue = Arc::new(BlockingPriorityQueue::init(4).unwrap());
    let pool = WorkerPool::spawn(
        Arc::clone(&queue),
        2,
        Arc::new(SimulatedExecutor::new(Duration::ZERO)),
    )
    .unwrap();

    let stopper = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            queue.enqueue(Process::new(1, 5, 1)).unwrap();
            queue.shutdown();
        })
    };

    let reports = pool.join();
    stopper.join().unwrap();
    assert_eq!(reports.iter().map(|r| r.executed).sum::<u64>(), 1);
}
