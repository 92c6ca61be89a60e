// Service exports
pub mod sink;

pub use sink::{deliver, MatchSink, MemorySink, SinkError, TracingSink};
