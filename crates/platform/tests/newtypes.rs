//! Type system enforcement tests for audio domain newtypes.
//! These newtypes keep ADC codes and PWM levels from being mixed up with
//! stored 8-bit samples.
//!
//! Run with: cargo test -p platform --test newtypes
// Test file: unwrap and arithmetic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

// ── AdcResolution ────────────────────────────────────────────────────────────

#[test]
fn adc_resolution_rejects_zero_bits() {
    use platform::audio_types::AdcResolution;
    let err = AdcResolution::new(0).unwrap_err();
    assert_eq!(err.value, 0);
    assert_eq!(err.min, 1);
    assert_eq!(err.max, 16);
}

#[test]
fn adc_resolution_rejects_over_16_bits() {
    use platform::audio_types::AdcResolution;
    assert!(AdcResolution::new(17).is_err());
    assert!(AdcResolution::new(255).is_err());
}

#[test]
fn adc_resolution_accepts_valid_range() {
    use platform::audio_types::AdcResolution;
    assert!(AdcResolution::new(1).is_ok());
    assert!(AdcResolution::new(12).is_ok());
    assert!(AdcResolution::new(16).is_ok());
}

#[test]
fn adc_resolution_default_is_rp2040() {
    use platform::audio_types::AdcResolution;
    assert_eq!(AdcResolution::default().bits(), platform::config::ADC_BITS);
    assert_eq!(AdcResolution::default().max_code(), 4095);
}

#[test]
fn adc_resolution_is_one_byte() {
    use platform::audio_types::AdcResolution;
    assert_eq!(core::mem::size_of::<AdcResolution>(), 1);
}

#[test]
fn quantize_12_bit_endpoints() {
    use platform::audio_types::AdcResolution;
    let res = AdcResolution::RP2040;
    assert_eq!(res.quantize(0), 0);
    assert_eq!(res.quantize(4095), 255);
    assert_eq!(res.quantize(2048), 127);
}

#[test]
fn quantize_saturates_codes_above_range() {
    use platform::audio_types::AdcResolution;
    assert_eq!(AdcResolution::RP2040.quantize(0xFFFF), 255);
}

#[test]
fn quantize_8_bit_is_identity() {
    use platform::audio_types::AdcResolution;
    let res = AdcResolution::new(8).unwrap();
    for raw in [0u16, 1, 100, 200, 255] {
        assert_eq!(u16::from(res.quantize(raw)), raw);
    }
}

// ── PwmLevel ─────────────────────────────────────────────────────────────────

#[test]
fn pwm_level_passes_samples_below_top() {
    use platform::audio_types::PwmLevel;
    assert_eq!(PwmLevel::from_sample(0).get(), 0);
    assert_eq!(PwmLevel::from_sample(250).get(), 250);
}

#[test]
fn pwm_level_keeps_samples_above_top() {
    use platform::audio_types::PwmLevel;
    assert_eq!(PwmLevel::from_sample(251).get(), 251);
    assert_eq!(PwmLevel::from_sample(255).get(), 255);
}

// ── OutOfRangeError ──────────────────────────────────────────────────────────

#[test]
fn out_of_range_error_displays_bounds() {
    use platform::audio_types::AdcResolution;
    let err = AdcResolution::new(20).unwrap_err();
    assert_eq!(err.to_string(), "value 20 outside [1, 16]");
}
