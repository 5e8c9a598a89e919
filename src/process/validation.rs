/*!
 * Process Admission Validation
 * Bounds checks applied before a process may enter the queue
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{BurstTime, Priority};

/// Validate priority against inclusive bounds
#[inline]
pub fn validate_priority(priority: Priority, min: Priority, max: Priority) -> SchedulerResult<()> {
    if priority < min || priority > max {
        return Err(SchedulerError::InvalidPriority { priority, min, max });
    }
    Ok(())
}

/// Validate burst length (must be positive, and at most `max_burst` when capped)
#[inline]
pub fn validate_burst(burst: BurstTime, max_burst: Option<BurstTime>) -> SchedulerResult<()> {
    if burst == 0 {
        return Err(SchedulerError::InvalidArgument(
            "Burst time must be positive".to_string(),
        ));
    }

    match max_burst {
        Some(max) if burst > max => Err(SchedulerError::InvalidArgument(format!(
            "Burst time {} exceeds maximum ({})",
            burst, max
        ))),
        _ => Ok(()),
    }
}
