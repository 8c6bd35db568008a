/// Port for asking whether an interactive debugger is attached to this process.
///
/// Implementations must be side-effect free. The governor queries the probe
/// once per invocation and treats the answer as a snapshot.
///
/// # Examples
///
/// ```
/// use timebox::domain::ports::DebuggerProbe;
/// use timebox::infrastructure::debugger::FixedDebuggerProbe;
///
/// let probe = FixedDebuggerProbe::attached();
/// assert!(probe.is_attached());
/// ```
pub trait DebuggerProbe: Send + Sync {
    /// Whether a debugger is attached right now
    fn is_attached(&self) -> bool;
}
