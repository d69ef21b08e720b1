//! Application configuration and constants
//!
//! Every tunable of the device is a compile-time constant: there is no
//! configuration file and no runtime negotiation. All code should reference
//! these constants rather than hardcoding values.
//!
//! # Pin assignments (Raspberry Pi Pico, RP2040)
//!
//! | Signal        | GPIO | Notes                                     |
//! |---------------|------|-------------------------------------------|
//! | Audio out     | GP0  | PWM slice 0 channel A, RC low-pass to amp |
//! | Button        | GP15 | Active-low, internal pull-up, both edges  |
//! | Microphone    | GP26 | ADC input 0, electret pre-amp output      |

/// The application name
pub const APP_NAME: &str = "Echo Loop";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Audio buffer ─────────────────────────────────────────────────────────────

/// Capacity of the audio ring, in 8-bit samples.
///
/// 33 000 samples at the ≈11 kHz capture rate is a three second window.
pub const BUFFER_LEN: usize = 33_000;

/// Each stored sample is repeated on this many consecutive PWM wrap ticks.
pub const HOLD_FACTOR: u32 = 8;

/// `log2(HOLD_FACTOR)`: playback position → buffer offset is `position >> 3`.
pub const HOLD_SHIFT: u32 = 3;

// ── Pins ─────────────────────────────────────────────────────────────────────

/// GPIO number of the PWM audio output.
pub const AUDIO_OUT_PIN: u8 = 0;

/// GPIO number of the record button (active-low).
pub const BUTTON_PIN: u8 = 15;

/// GPIO number of the microphone input (ADC0).
pub const MIC_PIN: u8 = 26;

/// ADC input channel selected before every conversion.
pub const MIC_ADC_CHANNEL: u8 = 0;

/// PWM slice driving [`AUDIO_OUT_PIN`] (GP0 and GP1 belong to slice 0).
pub const AUDIO_PWM_SLICE: u8 = 0;

// ── Timing ───────────────────────────────────────────────────────────────────

/// Sample timer period in microseconds (≈10 989 Hz).
pub const SAMPLE_PERIOD_US: u64 = 91;

/// Delay between button release and the start of playback, in milliseconds.
///
/// Absorbs the audio captured while the release edge settles; fixed
/// empirically rather than derived from the sample rate.
pub const DRAIN_DELAY_MS: u64 = 500;

/// Settle time applied to button edges before the level is sampled.
pub const BUTTON_DEBOUNCE_MS: u64 = 20;

/// Interval at which the playback-control task polls for completion.
pub const PLAYBACK_POLL_MS: u64 = 10;

/// Heartbeat log interval of the main loop.
pub const HEARTBEAT_MS: u64 = 1_000;

/// Depth of the button → microphone task event channel.
pub const EVENT_CHANNEL_DEPTH: usize = 8;

// ── PWM ──────────────────────────────────────────────────────────────────────

/// PWM counter top value: the counter runs 0..=250, so duty levels map
/// 0..=250 to 0–100 %.
pub const PWM_WRAP: u16 = 250;

/// Integer part of the PWM clock divider (8.0).
pub const PWM_CLOCK_DIV_INT: u8 = 8;

/// Fractional part of the PWM clock divider, in 1/16ths.
pub const PWM_CLOCK_DIV_FRAC: u8 = 0;

// ── ADC ──────────────────────────────────────────────────────────────────────

/// Resolution of the RP2040 SAR ADC.
pub const ADC_BITS: u8 = 12;

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn hold_shift_matches_hold_factor() {
        assert_eq!(1u32 << HOLD_SHIFT, HOLD_FACTOR);
    }

    #[test]
    fn audio_pin_belongs_to_pwm_slice() {
        // RP2040: GPIO n is driven by slice (n / 2) % 8.
        assert_eq!((AUDIO_OUT_PIN / 2) % 8, AUDIO_PWM_SLICE);
    }

    #[test]
    fn mic_pin_is_adc0() {
        assert_eq!(MIC_PIN - 26, MIC_ADC_CHANNEL);
    }

    #[test]
    fn playback_positions_fit_in_u32() {
        let positions = (BUFFER_LEN as u64) * u64::from(HOLD_FACTOR);
        assert!(positions < u64::from(u32::MAX));
    }
}
