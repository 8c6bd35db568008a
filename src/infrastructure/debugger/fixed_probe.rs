use crate::domain::ports::DebuggerProbe;

/// A probe with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDebuggerProbe {
    attached: bool,
}

impl FixedDebuggerProbe {
    pub const fn new(attached: bool) -> Self {
        Self { attached }
    }

    pub const fn attached() -> Self {
        Self::new(true)
    }

    pub const fn detached() -> Self {
        Self::new(false)
    }
}

impl DebuggerProbe for FixedDebuggerProbe {
    fn is_attached(&self) -> bool {
        self.attached
    }
}
