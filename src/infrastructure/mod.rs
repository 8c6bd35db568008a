//! Infrastructure layer module
//!
//! Adapters and ambient services around the governor:
//! - Configuration management
//! - Logging infrastructure
//! - Debugger probes
//! - Process-backed test commands
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod debugger;
pub mod logging;
pub mod process;
