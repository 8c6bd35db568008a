pub mod config;
pub mod execution_context;
pub mod fault;
pub mod result_state;
pub mod test_result;
pub mod timeout_spec;

pub use config::{Config, DebuggerConfig, DebuggerMode, GovernorConfig, LoggingConfig, RotationPolicy};
pub use execution_context::{ExecutionContext, InterruptSignal};
pub use fault::{DeliberateFailure, TestFault, INTERRUPTED_MESSAGE};
pub use result_state::{FailureSite, ResultState, TestStatus, ERROR_LABEL};
pub use test_result::TestResult;
pub use timeout_spec::TimeoutSpec;
