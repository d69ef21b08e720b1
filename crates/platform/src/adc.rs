//! Analog input abstraction

use crate::audio_types::AdcResolution;

/// Single-channel analog input, one blocking conversion per call.
///
/// Called from the sample-timer interrupt, so implementations must not
/// await: the RP2040 SAR ADC completes a conversion in 2 µs, well inside
/// the sample period.
pub trait AdcInput {
    /// Run one conversion on the configured channel and return the raw code.
    ///
    /// Implementations report a failed conversion as code 0, so a read error
    /// stores a silent sample instead of stalling the sampler.
    fn convert(&mut self) -> u16;

    /// Width of the codes returned by [`convert`](Self::convert).
    fn resolution(&self) -> AdcResolution;

    /// Convert and rescale to an 8-bit sample.
    fn sample(&mut self) -> u8 {
        let raw = self.convert();
        self.resolution().quantize(raw)
    }
}
