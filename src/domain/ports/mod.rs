//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the timeout governor consumes:
//! - TestCommand: the inner execution unit bound to one test method
//! - DebuggerProbe: whether an interactive debugger is attached
//!
//! Infrastructure adapters implement these so the governor stays independent
//! of how tests are run or how debuggers are detected.

pub mod debugger_probe;
pub mod test_command;

pub use debugger_probe::DebuggerProbe;
pub use test_command::{CommandTarget, FnTestCommand, TestCommand, TestMethod};
