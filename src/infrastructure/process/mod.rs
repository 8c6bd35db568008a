//! External processes as test bodies.

use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::models::{ExecutionContext, TestFault, TestResult};
use crate::domain::ports::{CommandTarget, TestCommand, TestMethod};

/// How often a running child is checked for exit and interruption
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs a program as the body of one test.
///
/// Exit status 0 passes; any other status is a deliberate failure. The child
/// is killed when the governor requests interruption.
#[derive(Debug, Clone)]
pub struct ProcessTestCommand {
    method: TestMethod,
    program: String,
    args: Vec<String>,
    poll_interval: Duration,
    stdout_to_stderr: bool,
}

impl ProcessTestCommand {
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            method: TestMethod::new(name),
            program: program.into(),
            args,
            poll_interval: DEFAULT_POLL_INTERVAL,
            stdout_to_stderr: false,
        }
    }

    /// Send the child's stdout to our stderr, keeping stdout free for a
    /// machine-readable report.
    #[must_use]
    pub const fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn spawn(&self) -> Result<Child, TestFault> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::null());
        if self.stdout_to_stderr {
            command.stdout(io::stderr());
        }
        command
            .spawn()
            .map_err(|err| {
                TestFault::unexpected(format!("failed to spawn '{}': {err}", self.program))
            })
    }
}

impl TestCommand for ProcessTestCommand {
    fn target(&self) -> CommandTarget {
        CommandTarget::Method(self.method.clone())
    }

    fn execute(&self, context: &ExecutionContext) -> Result<TestResult, TestFault> {
        let mut child = self.spawn()?;
        debug!(program = %self.program, pid = child.id(), "spawned test process");

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return exit_to_result(status),
                Ok(None) => {}
                Err(err) => {
                    kill_child_process(&mut child);
                    return Err(TestFault::unexpected(format!(
                        "failed to wait for '{}': {err}",
                        self.program
                    )));
                }
            }

            if context.interrupt_requested() {
                warn!(program = %self.program, pid = child.id(), "killing interrupted test process");
                kill_child_process(&mut child);
                return Err(TestFault::interrupted());
            }

            thread::sleep(self.poll_interval);
        }
    }
}

fn exit_to_result(status: ExitStatus) -> Result<TestResult, TestFault> {
    if status.success() {
        return Ok(TestResult::passed());
    }
    match status.code() {
        Some(code) => Err(TestFault::fail(format!("process exited with status {code}"))),
        None => Err(TestFault::fail("process was terminated by a signal")),
    }
}

/// Terminate a child process and reap it. Errors are ignored since the
/// process may already have exited.
fn kill_child_process(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
