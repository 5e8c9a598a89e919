/*!
 * Admission Tests
 */

use pretty_assertions::assert_eq;
use prio_sched::{
    Admission, BlockingPriorityQueue, FullPolicy, PidAllocator, Process, SchedulerError,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_pid_allocator_unique_across_threads() {
    let pids = Arc::new(PidAllocator::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pids = Arc::clone(&pids);
            thread::spawn(move || (0..100).map(|_| pids.next()).collect::<Vec<_>>())
        })
        .collect();

    let all: HashSet<u32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(all.len(), 400);
    assert!(all.contains(&1));
}

#[test]
fn test_backoff_succeeds_once_space_frees() {
    let queue = Arc::new(BlockingPriorityQueue::init(1).unwrap());
    let admission = Admission::with_policy(
        Arc::clone(&queue),
        FullPolicy::Backoff {
            attempts: 50,
            delay: Duration::from_millis(5),
        },
    );
    admission.admit(Process::new(1, 5, 1)).unwrap();

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            queue.dequeue().unwrap().id
        })
    };

    admission.admit(Process::new(2, 5, 1)).unwrap();
    assert_eq!(consumer.join().unwrap(), 1);
    assert_eq!(queue.dequeue().unwrap().id, 2);
}

#[test]
fn test_reject_policy_surfaces_queue_full() {
    let queue = Arc::new(BlockingPriorityQueue::init(1).unwrap());
    let admission = Admission::new(queue);
    assert_eq!(admission.policy(), FullPolicy::Reject);

    admission.submit(5, 1).unwrap();
    assert_eq!(
        admission.submit(5, 1),
        Err(SchedulerError::QueueFull {
            size: 1,
            capacity: 1
        })
    );
}

#[test]
fn test_batch_after_shutdown() {
    let queue = Arc::new(BlockingPriorityQueue::init(4).unwrap());
    let admission = Admission::new(Arc::clone(&queue));
    queue.shutdown();

    let report = admission.admit_batch((1..=3).map(|pid| Process::new(pid, 5, 1)));
    assert!(report.admitted.is_empty());
    assert_eq!(
        report.rejected,
        vec![
            (1, SchedulerError::ShuttingDown(1)),
            (2, SchedulerError::ShuttingDown(2)),
            (3, SchedulerError::ShuttingDown(3)),
        ]
    );
}
