//! Property-based tests for audio domain math.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.
//!
//! Run with: cargo test -p platform --test audio_math_proptest
// Test file: unwrap and arithmetic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use platform::audio_types::{AdcResolution, PwmLevel};
use platform::clock_config::{pwm_wrap_rate_hz, sample_rate_hz, SYS_CLOCK_HZ};

proptest::proptest! {
    /// AdcResolution::new never panics for any u8 input.
    #[test]
    fn adc_resolution_new_never_panics(bits in 0u8..=255u8) {
        let _ = AdcResolution::new(bits);
    }

    /// quantize never panics and stays within the 8-bit range for any code.
    #[test]
    fn quantize_never_panics(bits in 1u8..=16u8, raw in 0u16..=u16::MAX) {
        let res = AdcResolution::new(bits).unwrap();
        let _ = res.quantize(raw);
    }

    /// A louder input never yields a quieter sample.
    #[test]
    fn quantize_is_monotone(a in 0u16..=4095u16, b in 0u16..=4095u16) {
        let res = AdcResolution::RP2040;
        if a <= b {
            assert!(res.quantize(a) <= res.quantize(b),
                "code {} → {} should be <= code {} → {}",
                a, res.quantize(a), b, res.quantize(b));
        }
    }

    /// Full-scale input always reaches full-scale output.
    #[test]
    fn quantize_full_scale_is_255(bits in 1u8..=16u8) {
        let res = AdcResolution::new(bits).unwrap();
        #[allow(clippy::cast_possible_truncation)]
        let max = res.max_code() as u16;
        assert_eq!(res.quantize(max), 255);
    }

    /// A PWM level is the stored sample, unchanged.
    #[test]
    fn pwm_level_equals_sample(sample in 0u8..=255u8) {
        assert_eq!(PwmLevel::from_sample(sample).get(), u16::from(sample));
    }

    /// Longer sample periods give lower (or equal) capture rates.
    #[test]
    fn sample_rate_is_monotone_in_period(a in 1u64..=10_000u64, b in 1u64..=10_000u64) {
        if a <= b {
            assert!(sample_rate_hz(a) >= sample_rate_hz(b));
        }
    }

    /// A larger counter top never increases the wrap rate.
    #[test]
    fn wrap_rate_is_monotone_in_top(a in 0u16..=u16::MAX, b in 0u16..=u16::MAX) {
        let ra = pwm_wrap_rate_hz(SYS_CLOCK_HZ, 8, 0, a);
        let rb = pwm_wrap_rate_hz(SYS_CLOCK_HZ, 8, 0, b);
        if a <= b {
            assert!(ra >= rb);
        }
    }
}
