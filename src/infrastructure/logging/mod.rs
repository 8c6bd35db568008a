//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON console output on stderr
//! - Optional JSON log files with rotation

pub mod logger;

pub use logger::{LogFormat, LoggerImpl, LOG_FILE_NAME};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn};
