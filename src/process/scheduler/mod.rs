/*!
 * Priority Scheduler
 * Bounded blocking priority queue, its worker pool and admission helpers
 */

mod entry;
mod stats;

pub mod admission;
pub mod config;
pub mod heap;
pub mod queue;
pub mod worker;

pub use admission::{Admission, AdmissionReport, FullPolicy, PidAllocator};
pub use config::{LateAdmission, QueueConfig, SchedulerConfig, CONFIG_PATH_ENV};
pub use heap::PriorityHeap;
pub use queue::BlockingPriorityQueue;
pub use stats::{QueueState, QueueStats};
pub use worker::{run_worker, Executor, SimulatedExecutor, WorkerPool, WorkerReport};
