/*!
 * Process Module
 * Process descriptors, admission validation and scheduling
 */

pub mod scheduler;
pub mod types;
pub mod validation;

// Re-export for convenience
pub use types::Process;
pub use validation::{validate_burst, validate_priority};
