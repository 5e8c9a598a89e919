/*!
 * Monitoring
 * Tracing subscriber setup and worker spans
 */

mod tracer;

pub use tracer::{init_tracing, try_init_tracing, worker_span, TRACE_JSON_ENV};
