//! Pluggable diagnostic reporting

mod memory;
mod traits;

pub use memory::MemorySink;
pub use traits::{DiagnosticSink, NullSink, TracingSink};
