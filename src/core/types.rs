/*!
 * Core Types
 * Common types used across the scheduler
 */

/// Process ID type
pub type Pid = u32;

/// Priority level (higher is more important)
pub type Priority = u8;

/// Estimated execution cost in burst units
pub type BurstTime = u32;

/// Worker thread index within a pool
pub type WorkerId = usize;
