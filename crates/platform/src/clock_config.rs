//! Clock and rate arithmetic for the RP2040 audio path.
//!
//! The sampler and the player run from two unrelated clocks:
//!
//! ```text
//! TIMER (1 MHz, from the 12 MHz crystal via clk_ref)
//!   → alarm every SAMPLE_PERIOD_US = 91 µs      → capture ≈ 10 989 Hz
//!
//! clk_sys (125 MHz)
//!   → PWM divider 8.0                           → 15.625 MHz counter clock
//!   → wrap at TOP = 250 (251 counts per period) → wrap IRQ ≈ 62 250 Hz
//!   → hold each sample for 8 wraps              → replay ≈ 7 781 Hz
//! ```
//!
//! Capture and replay rates differ, so replay is pitched down by roughly
//! 0.71×. That is the behaviour of the reference hardware and is kept as is.
//!
//! Every function here is `const` so the derived figures can be checked at
//! compile time and logged at boot without runtime cost.

use crate::config::{
    BUFFER_LEN, HOLD_FACTOR, PWM_CLOCK_DIV_FRAC, PWM_CLOCK_DIV_INT, PWM_WRAP, SAMPLE_PERIOD_US,
};

/// System clock configured by `embassy_rp::init` with the default config.
pub const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Tick rate of the RP2040 TIMER peripheral (and of embassy-time on RP2040).
pub const TIMER_TICK_HZ: u32 = 1_000_000;

/// Capture rate produced by a periodic alarm of `period_us` microseconds.
///
/// Returns 0 for a zero period.
#[allow(clippy::arithmetic_side_effects)] // Safety: division guarded against zero
#[allow(clippy::cast_possible_truncation)] // Safety: TIMER_TICK_HZ / period fits u32
pub const fn sample_rate_hz(period_us: u64) -> u32 {
    if period_us == 0 {
        return 0;
    }
    (TIMER_TICK_HZ as u64 / period_us) as u32
}

/// PWM wrap-interrupt rate for a divider of `div_int + div_frac / 16` and a
/// counter top of `wrap`.
///
/// The counter counts `0..=wrap`, so one period is `wrap + 1` counter ticks.
#[allow(clippy::arithmetic_side_effects)] // Safety: u64 math on u32/u16 inputs; divisor >= 1
#[allow(clippy::cast_possible_truncation)] // Safety: result <= sys_hz, fits u32
pub const fn pwm_wrap_rate_hz(sys_hz: u32, div_int: u8, div_frac: u8, wrap: u16) -> u32 {
    // Divider is 8.4 fixed point; scale by 16 to stay in integers.
    let divider_x16 = (div_int as u64) * 16 + (div_frac as u64);
    let period_counts = wrap as u64 + 1;
    let denominator = divider_x16 * period_counts;
    if denominator == 0 {
        return 0;
    }
    ((sys_hz as u64) * 16 / denominator) as u32
}

/// Rate at which distinct stored samples leave the PWM output.
#[allow(clippy::arithmetic_side_effects)] // Safety: HOLD_FACTOR is a non-zero constant
pub const fn playback_sample_rate_hz(wrap_rate_hz: u32) -> u32 {
    wrap_rate_hz / HOLD_FACTOR
}

/// Length of the recording window (the most recent `BUFFER_LEN` samples) in
/// milliseconds.
#[allow(clippy::arithmetic_side_effects)] // Safety: u64 math, divisor guarded
#[allow(clippy::cast_possible_truncation)] // Safety: a few thousand ms
pub const fn recording_window_ms(sample_rate_hz: u32) -> u32 {
    if sample_rate_hz == 0 {
        return 0;
    }
    ((BUFFER_LEN as u64) * 1_000 / sample_rate_hz as u64) as u32
}

/// Time taken to replay a full buffer, in milliseconds.
///
/// Playback emits `HOLD_FACTOR * BUFFER_LEN - 1` levels before stopping.
#[allow(clippy::arithmetic_side_effects)] // Safety: u64 math, divisor guarded
#[allow(clippy::cast_possible_truncation)] // Safety: a few thousand ms
pub const fn playback_duration_ms(wrap_rate_hz: u32) -> u32 {
    if wrap_rate_hz == 0 {
        return 0;
    }
    let ticks = (BUFFER_LEN as u64) * (HOLD_FACTOR as u64) - 1;
    (ticks * 1_000 / wrap_rate_hz as u64) as u32
}

/// Capture rate of this build.
pub const SAMPLE_RATE_HZ: u32 = sample_rate_hz(SAMPLE_PERIOD_US);

/// PWM wrap-interrupt rate of this build.
pub const PWM_WRAP_RATE_HZ: u32 =
    pwm_wrap_rate_hz(SYS_CLOCK_HZ, PWM_CLOCK_DIV_INT, PWM_CLOCK_DIV_FRAC, PWM_WRAP);

/// Replay rate of distinct samples in this build.
pub const PLAYBACK_SAMPLE_RATE_HZ: u32 = playback_sample_rate_hz(PWM_WRAP_RATE_HZ);

// The wrap handler must have time to run: at least one sample period must be
// longer than a wrap period, otherwise the hold factor is meaningless.
const _: () = assert!(PWM_WRAP_RATE_HZ > SAMPLE_RATE_HZ);
const _: () = assert!(SAMPLE_RATE_HZ > 8_000);

// ─── Tests ───────────────────────────────────────────────────────────────────
