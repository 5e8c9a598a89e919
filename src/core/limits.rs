/*!
 * System Limits and Constants
 *
 * Centralized location for scheduler limits, defaults, and magic numbers.
 * Organized by domain for maintainability and discoverability.
 */

use crate::core::types::{BurstTime, Priority};
use std::time::Duration;

// =============================================================================
// PRIORITY AND BURST LIMITS
// =============================================================================

/// Lowest admissible priority (inclusive)
pub const MIN_PRIORITY: Priority = 1;

/// Highest admissible priority (inclusive)
pub const MAX_PRIORITY: Priority = 10;

/// Upper bound of the demo workload's random burst, in burst units
pub const MAX_BURST_TIME: BurstTime = 10;

/// Wall-clock time simulated per burst unit (100ms)
pub const BURST_UNIT: Duration = Duration::from_millis(100);

// =============================================================================
// QUEUE LIMITS
// =============================================================================

/// Default queue capacity (1024 processes)
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Hard ceiling on queue capacity (1M processes)
/// Storage is reserved up front, so this bounds the initial allocation
pub const MAX_QUEUE_CAPACITY: usize = 1 << 20;

// =============================================================================
// WORKER LIMITS
// =============================================================================

/// Default number of scheduler worker threads
pub const DEFAULT_WORKER_COUNT: usize = 1;

/// Maximum number of scheduler worker threads per pool
pub const MAX_WORKER_COUNT: usize = 256;

/// Worker thread name prefix
pub const WORKER_THREAD_PREFIX: &str = "sched-worker";

// =============================================================================
// DEMO WORKLOAD DEFAULTS
// =============================================================================

/// Processes admitted by the demo binary
pub const DEMO_PROCESS_COUNT: u32 = 10;

/// Delay between two demo admissions (500ms)
pub const DEMO_ADMISSION_INTERVAL: Duration = Duration::from_millis(500);

/// Time the demo waits after the last admission before shutting down (3s)
pub const DEMO_SETTLE_TIME: Duration = Duration::from_secs(3);

/// Interval between periodic stats log lines (1s)
pub const STATS_REPORT_INTERVAL: Duration = Duration::from_secs(1);
