/*!
 * Scheduler Entry Types
 * Heap entries pairing a process with its admission sequence
 */

use crate::process::types::Process;
use std::cmp::Ordering;

/// Process scheduling entry
///
/// Ordering is the heap key: higher priority first, and among equal
/// priorities the lower admission sequence (earlier arrival) first.
#[derive(Debug, Clone)]
pub(super) struct Entry {
    pub process: Process,
    pub seq: u64,
}

impl Entry {
    pub fn new(process: Process, seq: u64) -> Self {
        Self { process, seq }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.process.priority == other.process.priority && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap, so the earlier sequence must compare greater
        self.process
            .priority
            .cmp(&other.process.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
