//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; route mutations and dispatch
//!   misses emit debug events with method and pattern fields
//! - No metrics endpoint here; the embedding server owns exposition

pub mod logging;

pub use logging::init_logging;
