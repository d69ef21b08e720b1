//! Recording state machine.
//!
//! `RecordingStateMachine` sequences Idle → Recording → Draining → Playing →
//! Idle. It owns the sample timer and writes the request fields of the shared
//! [`Loopback`]; the interrupt handlers react to those fields on their own.
//!
//! It has no notion of wall-clock time of its own: callers pass `now` in, so
//! the drain delay can be driven by an embassy timer on target and by plain
//! `Instant` arithmetic in host tests.

use embassy_time::{Duration, Instant};
use platform::config::{DRAIN_DELAY_MS, SAMPLE_PERIOD_US};
use platform::SampleTimer;

use crate::button::RecordEvent;
use crate::error::LoopbackError;
use crate::shared::Loopback;

/// Current recording state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordingState {
    /// Nothing captured or replayed.
    Idle,
    /// Sampler armed, button held.
    Recording,
    /// Button released; sampler still armed until the drain delay elapses.
    Draining,
    /// Player replaying the ring.
    Playing,
}

impl RecordingState {
    /// Short static name (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Draining => "draining",
            Self::Playing => "playing",
        }
    }
}

/// What `StartRecording` does while draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainRestartPolicy {
    /// Report the event as ignored; the drain completes and playback starts.
    #[default]
    Ignore,
    /// Open a new recording session; the sample timer stays armed.
    Restart,
}

/// Why an event had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// `StartRecording` while already recording (button bounce).
    AlreadyRecording,
    /// Event during the drain delay.
    Draining,
    /// `StopRecording` with no recording in progress.
    NotRecording,
}

impl IgnoreReason {
    /// Short static name (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyRecording => "already recording",
            Self::Draining => "draining",
            Self::NotRecording => "not recording",
        }
    }
}

/// Outcome of an event or poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Idle/Playing → Recording.
    RecordingStarted,
    /// Draining → Recording under [`DrainRestartPolicy::Restart`].
    RecordingRestarted,
    /// Recording → Draining.
    DrainStarted,
    /// Draining → Playing.
    PlaybackStarted,
    /// Playing → Idle.
    PlaybackFinished,
    /// No state change.
    Ignored(IgnoreReason),
}

impl Transition {
    /// Short static name (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecordingStarted => "recording started",
            Self::RecordingRestarted => "recording restarted",
            Self::DrainStarted => "drain started",
            Self::PlaybackStarted => "playback started",
            Self::PlaybackFinished => "playback finished",
            Self::Ignored(_) => "ignored",
        }
    }
}

/// Timing and policy of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopbackConfig {
    /// Sample timer period.
    pub sample_period: Duration,
    /// Delay between `StopRecording` and playback.
    pub drain_delay: Duration,
    /// `StartRecording` handling while draining.
    pub drain_restart: DrainRestartPolicy,
}

impl Default for LoopbackConfig {
    fn default() -> Self {
        Self {
            sample_period: Duration::from_micros(SAMPLE_PERIOD_US),
            drain_delay: Duration::from_millis(DRAIN_DELAY_MS),
            drain_restart: DrainRestartPolicy::default(),
        }
    }
}

/// Orchestrates the sampler and player lifecycles.
pub struct RecordingStateMachine<'a, T, const N: usize> {
    shared: &'a Loopback<N>,
    timer: T,
    config: LoopbackConfig,
    state: RecordingState,
    drain_until: Option<Instant>,
}

impl<'a, T: SampleTimer, const N: usize> RecordingStateMachine<'a, T, N> {
    /// Create an idle machine.
    pub fn new(shared: &'a Loopback<N>, timer: T, config: LoopbackConfig) -> Self {
        Self {
            shared,
            timer,
            config,
            state: RecordingState::Idle,
            drain_until: None,
        }
    }

    /// Apply a button event.
    ///
    /// # Errors
    ///
    /// [`LoopbackError::TimerArm`] when a recording cannot start because the
    /// sample timer refused to arm. The machine is Idle afterwards.
    pub fn handle(&mut self, event: RecordEvent, now: Instant) -> Result<Transition, LoopbackError> {
        match (self.state, event) {
            (RecordingState::Idle | RecordingState::Playing, RecordEvent::StartRecording) => {
                self.start_recording()?;
                Ok(Transition::RecordingStarted)
            }
            (RecordingState::Recording, RecordEvent::StartRecording) => {
                Ok(Transition::Ignored(IgnoreReason::AlreadyRecording))
            }
            (RecordingState::Draining, RecordEvent::StartRecording) => {
                match self.config.drain_restart {
                    DrainRestartPolicy::Ignore => Ok(Transition::Ignored(IgnoreReason::Draining)),
                    DrainRestartPolicy::Restart => {
                        self.shared.begin_recording();
                        self.drain_until = None;
                        self.state = RecordingState::Recording;
                        Ok(Transition::RecordingRestarted)
                    }
                }
            }
            (RecordingState::Recording, RecordEvent::StopRecording) => {
                self.drain_until = Some(
                    now.checked_add(self.config.drain_delay)
                        .unwrap_or(Instant::MAX),
                );
                self.state = RecordingState::Draining;
                Ok(Transition::DrainStarted)
            }
            (RecordingState::Draining, RecordEvent::StopRecording) => {
                Ok(Transition::Ignored(IgnoreReason::Draining))
            }
            (RecordingState::Idle | RecordingState::Playing, RecordEvent::StopRecording) => {
                Ok(Transition::Ignored(IgnoreReason::NotRecording))
            }
        }
    }

    /// End the drain once its deadline has passed: disarm the sampler and
    /// request playback of the captured ring.
    pub fn poll_drain(&mut self, now: Instant) -> Option<Transition> {
        let until = self.drain_until?;
        if self.state != RecordingState::Draining || now < until {
            return None;
        }

        self.timer.disarm();
        self.shared.end_recording();
        let origin = self.shared.write_cursor().oldest();
        self.shared.request_playback(origin);

        self.drain_until = None;
        self.state = RecordingState::Playing;
        Some(Transition::PlaybackStarted)
    }

    /// Return to Idle once the player reports the request done.
    pub fn poll_playback(&mut self) -> Option<Transition> {
        if self.state != RecordingState::Playing || self.shared.playback_pending() {
            return None;
        }
        self.state = RecordingState::Idle;
        Some(Transition::PlaybackFinished)
    }

    /// [`poll_drain`](Self::poll_drain), then [`poll_playback`](Self::poll_playback).
    pub fn poll(&mut self, now: Instant) -> Option<Transition> {
        self.poll_drain(now).or_else(|| self.poll_playback())
    }

    /// Current state.
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// When the drain in progress ends.
    pub fn drain_deadline(&self) -> Option<Instant> {
        self.drain_until
    }

    /// Configuration in use.
    pub fn config(&self) -> &LoopbackConfig {
        &self.config
    }

    /// The sample timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    fn start_recording(&mut self) -> Result<(), LoopbackError> {
        self.shared.begin_recording();
        self.drain_until = None;
        if let Err(e) = self.timer.arm(self.config.sample_period) {
            self.shared.end_recording();
            self.state = RecordingState::Idle;
            return Err(LoopbackError::TimerArm(e));
        }
        self.state = RecordingState::Recording;
        Ok(())
    }
}
