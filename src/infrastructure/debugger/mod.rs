//! Debugger probe adapters
//!
//! - `ProcessDebuggerProbe`: asks the operating system
//! - `FixedDebuggerProbe`: always answers the same, for tests and CI

pub mod fixed_probe;
pub mod process_probe;

pub use fixed_probe::FixedDebuggerProbe;
pub use process_probe::ProcessDebuggerProbe;

use std::sync::Arc;

use crate::domain::models::DebuggerMode;
use crate::domain::ports::DebuggerProbe;

/// Build the probe selected by configuration.
pub fn probe_for_mode(mode: DebuggerMode) -> Arc<dyn DebuggerProbe> {
    match mode {
        DebuggerMode::Auto => Arc::new(ProcessDebuggerProbe::new()),
        DebuggerMode::Attached => Arc::new(FixedDebuggerProbe::attached()),
        DebuggerMode::Detached => Arc::new(FixedDebuggerProbe::detached()),
    }
}
