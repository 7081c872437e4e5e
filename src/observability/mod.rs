//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Client::execute
//!     → logger.rs (request record before send, response record after)
//!     → sink.rs (TracingSink → tracing events, RecordingSink → memory)
//!     → metrics.rs (counters, histograms)
//!
//! Binaries:
//!     → logging.rs (tracing-subscriber setup, JSON or pretty)
//! ```
//!
//! # Design Decisions
//! - The log sink is injected into the logger, never a global
//! - Correlation ID is carried on every record

pub mod logger;
pub mod logging;
pub mod metrics;
pub mod sink;

pub use logger::RequestLogger;
pub use sink::{LogEntry, LogFields, LogSink, RecordingSink, TracingSink};
