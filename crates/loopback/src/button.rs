//! Record button: edge → Start/Stop event mapping with optional debounce.
//!
//! The button is active-low with a pull-up: pressing pulls the pin low
//! (falling edge → [`RecordEvent::StartRecording`]), releasing lets it rise
//! (rising edge → [`RecordEvent::StopRecording`]).
//!
//! `ButtonMonitor` holds no pin; the firmware's button loop awaits edges on
//! the real pin and feeds them in through [`ButtonMonitor::on_edge`] (no
//! debounce) or, after [`ButtonMonitor::settle_time`], through
//! [`ButtonMonitor::on_settled`].

use embassy_time::Duration;
use platform::config::BUTTON_DEBOUNCE_MS;
use platform::{Edge, PinState};

/// Event delivered from the button to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordEvent {
    /// Button pressed.
    StartRecording,
    /// Button released.
    StopRecording,
}

impl RecordEvent {
    /// Event produced by an edge on the active-low button.
    pub fn from_edge(edge: Edge) -> Self {
        match edge {
            Edge::Falling => Self::StartRecording,
            Edge::Rising => Self::StopRecording,
        }
    }

    /// Short static name (for logs without `Debug` formatting).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartRecording => "start recording",
            Self::StopRecording => "stop recording",
        }
    }
}

/// Contact-bounce handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debounce {
    /// Every edge is an event; bounce produces spurious Start/Stop pairs.
    Off,
    /// After an edge, wait this long and report the settled level if it
    /// differs from the last one reported.
    Settle(Duration),
}

impl Default for Debounce {
    fn default() -> Self {
        Self::Settle(Duration::from_millis(BUTTON_DEBOUNCE_MS))
    }
}

/// Button configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonConfig {
    /// Bounce handling.
    pub debounce: Debounce,
}

/// Maps button edges and levels to [`RecordEvent`]s.
pub struct ButtonMonitor {
    debounce: Debounce,
    reported: PinState,
}

impl ButtonMonitor {
    /// Create a monitor for a released (high) button.
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            debounce: config.debounce,
            reported: PinState::High,
        }
    }

    /// How long to wait after an edge before sampling the level, or `None`
    /// when every edge is reported directly.
    pub fn settle_time(&self) -> Option<Duration> {
        match self.debounce {
            Debounce::Off => None,
            Debounce::Settle(d) => Some(d),
        }
    }

    /// Report a raw edge. Always produces an event.
    pub fn on_edge(&mut self, edge: Edge) -> RecordEvent {
        self.reported = edge.level_after();
        RecordEvent::from_edge(edge)
    }

    /// Report the level sampled after the settle time.
    ///
    /// Returns `None` when the level equals the last reported one, which
    /// swallows a press-and-bounce-back shorter than the settle time.
    pub fn on_settled(&mut self, level: PinState) -> Option<RecordEvent> {
        if level == self.reported {
            return None;
        }
        self.reported = level;
        Some(RecordEvent::from_edge(Edge::into_level(level)))
    }

    /// Last level turned into an event.
    pub fn reported_level(&self) -> PinState {
        self.reported
    }
}

impl Default for ButtonMonitor {
    fn default() -> Self {
        Self::new(ButtonConfig::default())
    }
}
