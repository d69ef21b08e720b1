//! Periodic sample clock.
//!
//! The sampler runs from an embassy [`Ticker`] inside a task on the
//! high-priority interrupt executor, so a tick preempts the thread-mode
//! control tasks. [`ClockTimer`] is the [`SampleTimer`] the state machine
//! owns; it only posts commands. [`SampleClock::run`] owns the
//! [`Sampler`] and reacts to them.
//!
//! ```text
//! RecordingStateMachine ──arm/disarm──► ClockTimer ──Signal──► SampleClock::run
//!                                                              │ Ticker(91 µs)
//!                                                              ▼
//!                                                       Sampler::on_tick
//! ```
//!
//! A disarm takes effect at the next await point of the clock task; a tick
//! that was already due is stored only if recording is still on, which the
//! state machine clears right after disarming.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use loopback::Sampler;
use platform::timer::validate_period;
use platform::{AdcInput, SampleTimer, TimerError};

/// Command posted from the state machine to the clock task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockCommand {
    /// Start (or restart) ticking with this period.
    Arm(Duration),
    /// Stop ticking.
    Disarm,
}

/// Shared command slot and status of the sample clock.
pub struct SampleClock {
    command: Signal<CriticalSectionRawMutex, ClockCommand>,
    running: AtomicBool,
    ticks: AtomicU32,
}

impl SampleClock {
    /// Create a stopped clock.
    pub const fn new() -> Self {
        Self {
            command: Signal::new(),
            running: AtomicBool::new(false),
            ticks: AtomicU32::new(0),
        }
    }

    /// Whether the clock task has started.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ticks delivered since boot (wrapping).
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Clock task body: wait for `Arm`, tick the sampler until `Disarm`.
    ///
    /// Never returns.
    pub async fn run<A: AdcInput, const N: usize>(&self, sampler: &mut Sampler<'_, A, N>) -> ! {
        self.running.store(true, Ordering::Release);
        let mut period = None;
        loop {
            let Some(every) = period else {
                period = match self.command.wait().await {
                    ClockCommand::Arm(p) => Some(p),
                    ClockCommand::Disarm => None,
                };
                continue;
            };

            let mut ticker = Ticker::every(every);
            loop {
                match select(ticker.next(), self.command.wait()).await {
                    Either::First(()) => {
                        sampler.on_tick();
                        self.ticks
                            .store(self.ticks().wrapping_add(1), Ordering::Relaxed);
                    }
                    Either::Second(ClockCommand::Arm(p)) => {
                        period = Some(p);
                        break;
                    }
                    Either::Second(ClockCommand::Disarm) => {
                        period = None;
                        break;
                    }
                }
            }
        }
    }

    fn post(&self, command: ClockCommand) {
        self.command.signal(command);
    }
}

impl Default for SampleClock {
    fn default() -> Self {
        Self::new()
    }
}

/// [`SampleTimer`] backed by a [`SampleClock`].
pub struct ClockTimer<'a> {
    clock: &'a SampleClock,
    armed: bool,
}

impl<'a> ClockTimer<'a> {
    /// Create a disarmed handle to `clock`.
    pub fn new(clock: &'a SampleClock) -> Self {
        Self {
            clock,
            armed: false,
        }
    }
}

impl SampleTimer for ClockTimer<'_> {
    fn arm(&mut self, period: Duration) -> Result<(), TimerError> {
        validate_period(period)?;
        if !self.clock.is_running() {
            return Err(TimerError::NotRunning);
        }
        self.clock.post(ClockCommand::Arm(period));
        self.armed = true;
        Ok(())
    }

    fn disarm(&mut self) {
        self.clock.post(ClockCommand::Disarm);
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_fails_before_clock_task_starts() {
        let clock = SampleClock::new();
        let mut timer = ClockTimer::new(&clock);
        assert_eq!(
            timer.arm(Duration::from_micros(91)),
            Err(TimerError::NotRunning)
        );
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_invalid_period_rejected_first() {
        let clock = SampleClock::new();
        let mut timer = ClockTimer::new(&clock);
        assert_eq!(
            timer.arm(Duration::from_ticks(0)),
            Err(TimerError::InvalidPeriod)
        );
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let clock = SampleClock::new();
        let mut timer = ClockTimer::new(&clock);
        timer.disarm();
        timer.disarm();
        assert!(!timer.is_armed());
    }
}
