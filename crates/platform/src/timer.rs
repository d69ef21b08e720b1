//! Periodic sample timer abstraction

use core::fmt;

use embassy_time::Duration;

/// Error arming the sample timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Period is zero or longer than the alarm can represent.
    InvalidPeriod,
    /// The task delivering ticks has not started.
    NotRunning,
}

impl TimerError {
    /// Short static description (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPeriod => "invalid timer period",
            Self::NotRunning => "sample clock not running",
        }
    }
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Longest period accepted by [`validate_period`]: one second.
pub const MAX_PERIOD: Duration = Duration::from_secs(1);

/// Check a sampling period before handing it to an alarm.
///
/// # Errors
///
/// [`TimerError::InvalidPeriod`] for a zero period or one above [`MAX_PERIOD`].
pub fn validate_period(period: Duration) -> Result<(), TimerError> {
    if period.as_ticks() == 0 || period > MAX_PERIOD {
        Err(TimerError::InvalidPeriod)
    } else {
        Ok(())
    }
}

/// Cancellable periodic alarm that invokes the sampler.
///
/// Arming an already-armed timer restarts it with the new period. Disarming
/// is idempotent; once `disarm` returns no further ticks are delivered.
pub trait SampleTimer {
    /// Start firing every `period`.
    fn arm(&mut self, period: Duration) -> Result<(), TimerError>;

    /// Stop firing.
    fn disarm(&mut self);

    /// Whether the timer is currently armed.
    fn is_armed(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(
            validate_period(Duration::from_ticks(0)),
            Err(TimerError::InvalidPeriod)
        );
    }

    #[test]
    fn sample_period_is_accepted() {
        assert_eq!(validate_period(Duration::from_micros(91)), Ok(()));
    }

    #[test]
    fn period_above_one_second_is_rejected() {
        assert!(validate_period(Duration::from_millis(1_001)).is_err());
    }
}
