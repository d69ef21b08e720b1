//! Bring-up sequence for the Echo Loop board.
//!
//! Initialization order:
//!   1. `embassy_rp::init`: clocks to 125 MHz, TIMER time driver at 1 MHz
//!   2. Watchdog armed
//!   3. Sample clock task spawned on the interrupt executor (SWI_IRQ_1)
//!   4. ADC + microphone channel (GP26)
//!   5. PWM slice 0 on GP0, wrap 250, divider 8.0, wrap IRQ unmasked
//!   6. Button input (GP15, pull-up) and the control tasks spawned
//!
//! The sample clock must be running before the microphone-control task can
//! receive its first event, otherwise arming the timer fails with
//! [`platform::TimerError::NotRunning`].

use platform::clock_config::{
    playback_duration_ms, recording_window_ms, PLAYBACK_SAMPLE_RATE_HZ, PWM_WRAP_RATE_HZ,
    SAMPLE_RATE_HZ,
};
use platform::config::HEARTBEAT_MS;

/// Ordered list of boot steps, logged at startup and checked by tests.
///
/// # Correctness Invariants
///
/// - The sample clock task must be spawned before the control tasks.
/// - The player must be installed in its interrupt cell before the PWM wrap
///   interrupt is unmasked in the NVIC.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Clocks: embassy_rp::init (sys 125 MHz, TIMER 1 MHz)",
    "2. Watchdog: arm before any task can stall",
    "3. Sample clock: spawn on interrupt executor (SWI_IRQ_1)",
    "4. ADC: microphone on GP26 / ADC0",
    "5. PWM: slice 0 on GP0, player installed, wrap IRQ unmasked",
    "6. Button + control tasks: spawn on thread executor",
];

/// NVIC priority of the interrupt executor running the sample clock.
///
/// RP2040 implements two priority bits; 0 is the most urgent.
pub const SAMPLE_CLOCK_IRQ_PRIORITY: u8 = 1;

/// NVIC priority of the PWM wrap interrupt.
///
/// Equal to the sample clock so the two audio handlers never nest.
pub const PWM_WRAP_IRQ_PRIORITY: u8 = 1;

/// Watchdog timeout; the heartbeat loop feeds it every [`HEARTBEAT_MS`].
///
/// RP2040 limit is about 8.3 s.
pub const WATCHDOG_TIMEOUT_MS: u64 = 4_000;

const _: () = assert!(HEARTBEAT_MS < WATCHDOG_TIMEOUT_MS);

/// Audio figures of this build, logged once at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioSummary {
    /// Capture rate.
    pub sample_rate_hz: u32,
    /// PWM wrap-interrupt rate.
    pub wrap_rate_hz: u32,
    /// Rate of distinct samples during playback.
    pub playback_rate_hz: u32,
    /// Length of the recording window.
    pub window_ms: u32,
    /// Duration of a full-buffer playback.
    pub playback_ms: u32,
}

impl AudioSummary {
    /// Figures derived from `platform::config`.
    pub const fn current() -> Self {
        Self {
            sample_rate_hz: SAMPLE_RATE_HZ,
            wrap_rate_hz: PWM_WRAP_RATE_HZ,
            playback_rate_hz: PLAYBACK_SAMPLE_RATE_HZ,
            window_ms: recording_window_ms(SAMPLE_RATE_HZ),
            playback_ms: playback_duration_ms(PWM_WRAP_RATE_HZ),
        }
    }
}

/// Log the banner, the boot sequence and the audio figures.
pub fn log_banner() {
    let audio = AudioSummary::current();
    #[cfg(feature = "defmt")]
    {
        use platform::config::{APP_NAME, APP_VERSION};
        defmt::info!("{=str} v{=str}", APP_NAME, APP_VERSION);
        for step in BOOT_SEQUENCE_STEPS {
            defmt::debug!("boot: {=str}", step);
        }
        defmt::info!(
            "capture {=u32} Hz, replay {=u32} Hz, window {=u32} ms",
            audio.sample_rate_hz,
            audio.playback_rate_hz,
            audio.window_ms
        );
    }
    #[cfg(feature = "simulator")]
    {
        use platform::config::{APP_NAME, APP_VERSION};
        tracing::info!("{APP_NAME} v{APP_VERSION}");
        tracing::info!(
            capture_hz = audio.sample_rate_hz,
            replay_hz = audio.playback_rate_hz,
            window_ms = audio.window_ms,
            "audio path"
        );
    }
    #[cfg(not(any(feature = "defmt", feature = "simulator")))]
    let _ = audio;
}

// ─── Tests ────────────────────────────────────────────────────────────────────
