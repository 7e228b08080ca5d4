//! # qolab-telemetry
//!
//! Structured logging for the Qolab crates, built on `tracing`.
//!
//! ```rust
//! use qolab_telemetry::{info, init_telemetry};
//!
//! init_telemetry("qolab").unwrap();
//! info!(samples = 9, "Run finished");
//! ```

pub mod init;
pub mod spans;

pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use spans::*;

pub use init::{DEFAULT_FILTER, init_telemetry, init_with_filter};
