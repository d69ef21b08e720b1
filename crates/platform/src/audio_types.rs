//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `AdcResolution`: validates 1–16 bits, owns the raw → 8-bit rescale
//! - `PwmLevel`: a stored sample as a PWM compare value

use core::fmt;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} outside [{}, {}]",
            self.value, self.min, self.max
        )
    }
}

// ── AdcResolution ────────────────────────────────────────────────────────────

/// Bit width of an ADC conversion result, validated to 1–16 bits.
///
/// The loopback stores 8-bit samples; [`AdcResolution::quantize`] maps the
/// full `0..=2^bits - 1` input range linearly onto `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct AdcResolution(u8);

impl AdcResolution {
    /// Largest supported conversion width.
    pub const MAX_BITS: u8 = 16;

    /// RP2040 SAR ADC: 12 bits.
    pub const RP2040: Self = Self(12);

    /// Create a resolution, returning an error outside 1–16 bits.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `bits == 0` or `bits > 16`.
    pub fn new(bits: u8) -> Result<Self, OutOfRangeError> {
        if bits == 0 || bits > Self::MAX_BITS {
            Err(OutOfRangeError {
                value: u32::from(bits),
                min: 1,
                max: u32::from(Self::MAX_BITS),
            })
        } else {
            Ok(Self(bits))
        }
    }

    /// Number of bits.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Largest code the converter can return (`2^bits - 1`).
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // Safety: bits in 1..=16, shift < 32
    pub fn max_code(self) -> u32 {
        (1u32 << self.0) - 1
    }

    /// Linearly rescale a raw conversion result into an 8-bit sample.
    ///
    /// Codes above [`max_code`](Self::max_code) (noise in the unused high
    /// bits) saturate to 255.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // Safety: raw <= max_code <= 65535; 65535 * 255 fits u32; max_code >= 1
    #[allow(clippy::cast_possible_truncation)] // Safety: result <= 255 by construction
    pub fn quantize(self, raw: u16) -> u8 {
        let max = self.max_code();
        let raw = u32::from(raw).min(max);
        (raw * 255 / max) as u8
    }
}

impl Default for AdcResolution {
    fn default() -> Self {
        Self::RP2040
    }
}

// ── PwmLevel ─────────────────────────────────────────────────────────────────

/// A PWM compare value.
///
/// Stored samples are written out unchanged. With a counter top of 250 the
/// counter runs `0..=250`, so a level of 250 is 250/251 duty and any level
/// of 251 or more holds the pin high for the whole period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PwmLevel(u16);

impl PwmLevel {
    /// Silence (0 % duty).
    pub const ZERO: Self = Self(0);

    /// Duty level for a stored sample.
    #[must_use]
    pub fn from_sample(sample: u8) -> Self {
        Self(u16::from(sample))
    }

    /// Raw compare-register value.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}
