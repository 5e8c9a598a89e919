/*!
 * Shutdown Tests
 * Broadcast wakeup, drain-before-stop and teardown
 */

use pretty_assertions::assert_eq;
use prio_sched::{BlockingPriorityQueue, Process, QueueState, SchedulerError};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_shutdown_unblocks_all_waiters() {
    let queue = Arc::new(BlockingPriorityQueue::init(8).unwrap());
    let (tx, rx) = mpsc::channel();

    for _ in 0..4 {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        thread::spawn(move || {
            let _ = tx.send(queue.dequeue());
        });
    }
    drop(tx);

    thread::sleep(Duration::from_millis(50));
    assert!(queue.shutdown());

    for _ in 0..4 {
        let result = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("waiter was not woken by shutdown");
        assert_eq!(result, Err(SchedulerError::QueueEmpty));
    }
}

#[test]
fn test_queued_items_drain_after_shutdown() {
    let queue = BlockingPriorityQueue::init(4).unwrap();
    queue.enqueue(Process::new(1, 2, 1)).unwrap();
    queue.enqueue(Process::new(2, 7, 1)).unwrap();

    queue.shutdown();
    assert_eq!(queue.state(), QueueState::Draining);

    assert_eq!(queue.dequeue().unwrap().id, 2);
    assert_eq!(queue.dequeue().unwrap().id, 1);
    assert_eq!(queue.state(), QueueState::Stopped);

    // Terminal: every later call keeps failing
    for _ in 0..3 {
        assert!(queue.dequeue().unwrap_err().is_terminal());
    }
}

#[test]
fn test_enqueue_after_shutdown_rejected_by_default() {
    let queue = BlockingPriorityQueue::init(4).unwrap();
    queue.shutdown();

    assert_eq!(
        queue.enqueue(Process::new(5, 5, 1)),
        Err(SchedulerError::ShuttingDown(5))
    );
    assert!(queue.is_empty());
}

#[test]
fn test_repeated_shutdown_has_no_effect() {
    let queue = BlockingPriorityQueue::init(2).unwrap();
    assert!(queue.shutdown());
    assert!(!queue.shutdown());
    assert!(queue.is_shutdown());
}

#[test]
fn test_cleanup_shared_after_workers_exit() {
    let queue = Arc::new(BlockingPriorityQueue::init(4).unwrap());
    let worker = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || while queue.dequeue().is_ok() {})
    };

    queue.enqueue(Process::new(1, 5, 1)).unwrap();
    queue.shutdown();
    worker.join().unwrap();

    let leftovers = BlockingPriorityQueue::cleanup_shared(queue).unwrap();
    assert!(leftovers.is_empty());
}

#[test]
fn test_cleanup_without_shutdown_returns_pending() {
    let queue = BlockingPriorityQueue::init(4).unwrap();
    queue.enqueue(Process::new(1, 3, 1)).unwrap();
    queue.enqueue(Process::new(2, 3, 1)).unwrap();

    let ids: Vec<_> = queue.cleanup().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}
