/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::{Pid, Priority};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for every queue, worker and admission operation
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler-related errors with serialization support
///
/// Taxonomy:
/// - invalid argument: [`SchedulerError::InvalidPriority`], [`SchedulerError::InvalidArgument`]
/// - recoverable: [`SchedulerError::QueueFull`]
/// - terminal: [`SchedulerError::QueueEmpty`] (shutdown requested and drained)
/// - fatal: [`SchedulerError::InitializationFailure`]
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Priority {priority} out of range [{min}, {max}]")]
    #[diagnostic(
        code(scheduler::invalid_priority),
        help("Priority must lie within the queue's configured bounds.")
    )]
    InvalidPriority {
        priority: Priority,
        min: Priority,
        max: Priority,
    },

    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(scheduler::invalid_argument),
        help("Check the process fields and queue configuration.")
    )]
    InvalidArgument(String),

    #[error("Scheduler queue full: {size}/{capacity}")]
    #[diagnostic(
        code(scheduler::queue_full),
        help("Too many processes waiting. Retry later, back off, or reject the process.")
    )]
    QueueFull { size: usize, capacity: usize },

    #[error("Scheduler queue empty: shutdown requested and all work drained")]
    #[diagnostic(
        code(scheduler::queue_empty),
        help("Terminal condition. Workers should exit their dequeue loop.")
    )]
    QueueEmpty,

    #[error("Scheduler shutting down: process {0} rejected")]
    #[diagnostic(
        code(scheduler::shutting_down),
        help("Late admissions are rejected. Set late_admission = \"accept\" to allow them.")
    )]
    ShuttingDown(Pid),

    #[error("Queue still referenced by {0} other handle(s)")]
    #[diagnostic(
        code(scheduler::in_use),
        help("Shut down and join all workers before cleaning up the queue.")
    )]
    InUse(usize),

    #[error("Failed to initialize scheduler: {0}")]
    #[diagnostic(
        code(scheduler::initialization_failure),
        help("The queue cannot safely exist. Abort startup.")
    )]
    InitializationFailure(String),
}

impl SchedulerError {
    /// Priority out of bounds or otherwise malformed input
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SchedulerError::InvalidPriority { .. } | SchedulerError::InvalidArgument(_)
        )
    }

    /// Caller may retry or reject the item
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SchedulerError::QueueFull { .. })
    }

    /// Post-shutdown drain completed; no more items will ever be returned
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SchedulerError::QueueEmpty)
    }
}
