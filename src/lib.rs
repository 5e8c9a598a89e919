/*!
 * Priority Scheduler Library
 * Bounded, thread-safe priority queue driving a pool of simulated workers
 */

pub mod core;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::errors::{SchedulerError, SchedulerResult};
pub use crate::core::types::{BurstTime, Pid, Priority, WorkerId};
pub use monitoring::init_tracing;
pub use process::scheduler::{
    Admission, AdmissionReport, BlockingPriorityQueue, Executor, FullPolicy, LateAdmission,
    PidAllocator, PriorityHeap, QueueConfig, QueueState, QueueStats, SchedulerConfig,
    SimulatedExecutor, WorkerPool, WorkerReport,
};
pub use process::Process;
