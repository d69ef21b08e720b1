//! PWM-wrap handler: replays the ring, holding each sample for 8 wraps.

use platform::audio_types::PwmLevel;
use platform::PwmOutput;

use crate::index::PlaybackPosition;
use crate::shared::Loopback;

/// Consumer side of the loopback, owned by the PWM wrap interrupt.
///
/// The only reader of the buffer during playback and the only writer of the
/// played session.
pub struct Player<'a, P, const N: usize> {
    shared: &'a Loopback<N>,
    pwm: P,
    position: PlaybackPosition<N>,
    session: u32,
    origin: usize,
}

impl<'a, P: PwmOutput, const N: usize> Player<'a, P, N> {
    /// Create a player driving `pwm` from `shared`.
    pub fn new(shared: &'a Loopback<N>, pwm: P) -> Self {
        Self {
            shared,
            pwm,
            position: PlaybackPosition::new(),
            session: shared.played_session(),
            origin: 0,
        }
    }

    /// Enable the wrap interrupt with the output silent.
    pub fn arm(&mut self) {
        self.pwm.set_level(0);
        self.pwm.set_wrap_interrupt(true);
    }

    /// Stop wrap interrupts and force the output to zero.
    pub fn disarm(&mut self) {
        self.pwm.set_wrap_interrupt(false);
        self.pwm.set_level(0);
        self.position.reset();
    }

    /// Wrap interrupt. Returns the level written.
    ///
    /// Playback runs while a request is pending and recording is off. Each
    /// call emits `buffer[origin + (position >> 3)]` and advances until the
    /// position reaches `8N - 1`; then, or when a recording cancels playback,
    /// it emits 0, marks the request done and rewinds.
    #[allow(clippy::arithmetic_side_effects)] // Safety: origin < N and offset < N, sum < 2N
    pub fn on_wrap(&mut self) -> u16 {
        self.pwm.clear_wrap_interrupt();

        let requested = self.shared.play_session();
        let pending = requested != self.shared.played_session();
        let active = pending && !self.shared.is_recording();

        if active && requested != self.session {
            self.session = requested;
            self.origin = self.shared.play_origin();
            self.position.reset();
        }

        let level = if active && !self.position.is_final() {
            let sample = self
                .shared
                .buffer()
                .read(self.origin + self.position.sample_offset());
            self.position.advance();
            PwmLevel::from_sample(sample)
        } else {
            if pending {
                self.session = requested;
                self.shared.finish_playback(requested);
            }
            self.position.reset();
            PwmLevel::ZERO
        };

        self.pwm.set_level(level.get());
        level.get()
    }

    /// Current playback position.
    pub fn position(&self) -> PlaybackPosition<N> {
        self.position
    }

    /// The PWM output.
    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}
