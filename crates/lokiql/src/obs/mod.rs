//! Observability: encode tracing.
//!
//! Tracing is optional, injected by the caller, and must not affect encode output.

mod trace;

// re-exports
pub use trace::{EncodeTraceEvent, EncodeTraceSink, NoopTraceSink};
