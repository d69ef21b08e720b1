//! Audio loopback core: capture ring, sampler, player and recording state machine
//!
//! Everything here is `no_std`, allocation-free and HAL-agnostic. Peripherals
//! come in through the `platform` traits; the firmware crate wires the
//! handlers to real interrupts.
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]

pub mod audio_buffer;
pub mod button;
pub mod engine;
pub mod error;
pub mod index;
pub mod player;
pub mod sampler;
pub mod shared;

pub use audio_buffer::AudioBuffer;
pub use button::{ButtonConfig, ButtonMonitor, Debounce, RecordEvent};
pub use engine::{
    DrainRestartPolicy, IgnoreReason, LoopbackConfig, RecordingState, RecordingStateMachine,
    Transition,
};
pub use error::LoopbackError;
pub use index::{PlaybackPosition, SampleIndex};
pub use player::Player;
pub use sampler::Sampler;
pub use shared::Loopback;

/// Loopback sized for the device.
pub type DeviceLoopback = Loopback<{ platform::config::BUFFER_LEN }>;
