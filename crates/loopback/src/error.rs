//! Loopback error type.

use core::fmt;

use platform::TimerError;

/// Failure surfaced by [`RecordingStateMachine::handle`](crate::engine::RecordingStateMachine::handle).
///
/// Ignored events are not errors; they come back as
/// [`Transition::Ignored`](crate::engine::Transition::Ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopbackError {
    /// The periodic sample timer could not be armed; recording was rolled
    /// back and the machine is Idle.
    TimerArm(TimerError),
}

impl LoopbackError {
    /// Short static description (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimerArm(_) => "failed to arm timer",
        }
    }
}

impl fmt::Display for LoopbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimerArm(e) => write!(f, "{}: {e}", self.as_str()),
        }
    }
}

impl From<TimerError> for LoopbackError {
    fn from(e: TimerError) -> Self {
        Self::TimerArm(e)
    }
}
