//! PWM audio output abstraction

/// One PWM channel used as a crude DAC, with the slice wrap interrupt.
///
/// The duty level is double-buffered by the hardware: a level written inside
/// the wrap handler takes effect at the next counter wrap. Levels above the
/// counter top give 100 % duty.
pub trait PwmOutput {
    /// Set the compare level of the audio channel.
    fn set_level(&mut self, level: u16);

    /// Enable or disable the wrap interrupt of the slice.
    fn set_wrap_interrupt(&mut self, enabled: bool);

    /// Acknowledge a pending wrap interrupt.
    ///
    /// Must be called from the handler before returning, otherwise the
    /// interrupt re-enters immediately.
    fn clear_wrap_interrupt(&mut self);
}
