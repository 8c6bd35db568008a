use tracing::debug;

use crate::domain::ports::DebuggerProbe;

/// Detects a debugger attached to the current process.
///
/// On Linux a non-zero `TracerPid` in `/proc/self/status` means a tracer
/// (gdb, lldb, a ptrace-based IDE debugger) is attached. Other platforms
/// always report detached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessDebuggerProbe;

impl ProcessDebuggerProbe {
    pub const fn new() -> Self {
        Self
    }
}

impl DebuggerProbe for ProcessDebuggerProbe {
    #[cfg(target_os = "linux")]
    fn is_attached(&self) -> bool {
        match std::fs::read_to_string("/proc/self/status") {
            Ok(status) => tracer_pid(&status).is_some_and(|pid| pid != 0),
            Err(err) => {
                debug!(error = %err, "could not read /proc/self/status; assuming no debugger");
                false
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn is_attached(&self) -> bool {
        debug!("debugger detection is not supported on this platform; assuming no debugger");
        false
    }
}

/// Extract `TracerPid` from the contents of a `/proc/<pid>/status` file.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}
