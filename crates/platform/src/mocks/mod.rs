//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use core::convert::Infallible;

use embassy_time::Duration;

use crate::audio_types::AdcResolution;
use crate::gpio::PinState;
use crate::timer::{validate_period, SampleTimer, TimerError};
use crate::{AdcInput, PwmOutput};

/// Mock microphone ADC.
///
/// Returns a scripted sequence of raw codes, repeating it when exhausted. An
/// empty script reads as mid-scale silence.
pub struct MockAdc {
    resolution: AdcResolution,
    script: heapless::Vec<u16, 64>,
    cursor: usize,
    conversions: usize,
}

impl MockAdc {
    /// Create a mock that always reads `raw`.
    pub fn constant(raw: u16) -> Self {
        let mut script = heapless::Vec::new();
        let _ = script.push(raw);
        Self::with_script(script)
    }

    /// Create a mock that cycles through `codes`.
    pub fn with_script(script: heapless::Vec<u16, 64>) -> Self {
        Self {
            resolution: AdcResolution::RP2040,
            script,
            cursor: 0,
            conversions: 0,
        }
    }

    /// Override the reported resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: AdcResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Number of conversions performed so far.
    pub fn conversions(&self) -> usize {
        self.conversions
    }
}

impl Default for MockAdc {
    fn default() -> Self {
        Self::with_script(heapless::Vec::new())
    }
}

impl AdcInput for MockAdc {
    fn convert(&mut self) -> u16 {
        self.conversions += 1;
        let Some(&raw) = self.script.get(self.cursor) else {
            return (self.resolution.max_code() / 2) as u16;
        };
        self.cursor = (self.cursor + 1) % self.script.len();
        raw
    }

    fn resolution(&self) -> AdcResolution {
        self.resolution
    }
}

/// Mock PWM audio slice.
pub struct MockPwm {
    level: u16,
    writes: usize,
    wrap_irq: bool,
    wrap_acks: usize,
}

impl MockPwm {
    /// Create a silent mock slice with the wrap interrupt off.
    pub fn new() -> Self {
        Self {
            level: 0,
            writes: 0,
            wrap_irq: false,
            wrap_acks: 0,
        }
    }

    /// Last level written.
    pub fn level(&self) -> u16 {
        self.level
    }

    /// Number of `set_level` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Whether the wrap interrupt is enabled.
    pub fn wrap_interrupt_enabled(&self) -> bool {
        self.wrap_irq
    }

    /// Number of acknowledged wrap interrupts.
    pub fn wrap_acks(&self) -> usize {
        self.wrap_acks
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmOutput for MockPwm {
    fn set_level(&mut self, level: u16) {
        self.level = level;
        self.writes += 1;
    }

    fn set_wrap_interrupt(&mut self, enabled: bool) {
        self.wrap_irq = enabled;
    }

    fn clear_wrap_interrupt(&mut self) {
        self.wrap_acks += 1;
    }
}

/// Mock sample timer.
///
/// Records arm/disarm calls; ticks are delivered by the test calling the
/// sampler directly.
#[derive(Default)]
pub struct MockTimer {
    armed: bool,
    period: Option<Duration>,
    arm_count: usize,
    disarm_count: usize,
    fail_next: Option<TimerError>,
}

impl MockTimer {
    /// Create a disarmed mock timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `arm` call fail with `error`.
    pub fn fail_next_arm(&mut self, error: TimerError) {
        self.fail_next = Some(error);
    }

    /// Period of the last successful `arm`.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Number of successful `arm` calls.
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    /// Number of `disarm` calls.
    pub fn disarm_count(&self) -> usize {
        self.disarm_count
    }
}

impl SampleTimer for MockTimer {
    fn arm(&mut self, period: Duration) -> Result<(), TimerError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        validate_period(period)?;
        self.armed = true;
        self.period = Some(period);
        self.arm_count += 1;
        Ok(())
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.disarm_count += 1;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Mock record button.
///
/// Rests at a starting level and steps through a scripted list of levels, one per
/// edge wait. Once the script is exhausted every wait pends, polling with a
/// short timer like a real idle pin.
pub struct MockButton {
    level: PinState,
    script: heapless::Deque<PinState, 32>,
    reads: usize,
}

impl MockButton {
    /// Create an idle (released, high) button.
    pub fn new() -> Self {
        Self::starting_at(PinState::High)
    }

    /// Create a button resting at `level`.
    pub fn starting_at(level: PinState) -> Self {
        Self {
            level,
            script: heapless::Deque::new(),
            reads: 0,
        }
    }

    /// Queue a level change.
    pub fn push_level(&mut self, level: PinState) -> Result<(), PinState> {
        self.script.push_back(level)
    }

    /// Queue a press followed by a release.
    pub fn push_click(&mut self) -> Result<(), PinState> {
        self.push_level(PinState::Low)?;
        self.push_level(PinState::High)
    }

    /// Number of level reads performed.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Current level.
    pub fn level(&self) -> PinState {
        self.level
    }

    async fn next_level(&mut self) -> PinState {
        loop {
            if let Some(level) = self.script.pop_front() {
                self.level = level;
                return level;
            }
            embassy_time::Timer::after(Duration::from_millis(10)).await;
        }
    }
}

impl Default for MockButton {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::digital::ErrorType for MockButton {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(self.level == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(self.level == PinState::Low)
    }
}

impl embedded_hal_async::digital::Wait for MockButton {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        while self.level != PinState::High {
            self.next_level().await;
        }
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        while self.level != PinState::Low {
            self.next_level().await;
        }
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            let before = self.level;
            if before == PinState::Low && self.next_level().await == PinState::High {
                return Ok(());
            }
            if before == PinState::High {
                self.next_level().await;
            }
        }
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            let before = self.level;
            if before == PinState::High && self.next_level().await == PinState::Low {
                return Ok(());
            }
            if before == PinState::Low {
                self.next_level().await;
            }
        }
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            let before = self.level;
            if self.next_level().await != before {
                return Ok(());
            }
        }
    }
}
