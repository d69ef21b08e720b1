//! Sample-timer handler: one ADC conversion per tick into the ring.

use platform::AdcInput;

use crate::index::SampleIndex;
use crate::shared::Loopback;

/// Producer side of the loopback, owned by the sample-timer interrupt.
///
/// The only writer of the buffer and of the write cursor.
pub struct Sampler<'a, A, const N: usize> {
    shared: &'a Loopback<N>,
    adc: A,
    index: SampleIndex<N>,
    session: u32,
}

impl<'a, A: AdcInput, const N: usize> Sampler<'a, A, N> {
    /// Create a sampler writing into `shared`.
    pub fn new(shared: &'a Loopback<N>, adc: A) -> Self {
        Self {
            shared,
            adc,
            index: SampleIndex::new(),
            session: shared.record_session(),
        }
    }

    /// Timer tick.
    ///
    /// A no-op while recording is off (a tick already pending when the timer
    /// was disarmed). The first tick of a new session restarts at slot 0; the
    /// published cursor is tagged with its session so readers see slot 0 from
    /// the moment the session opens. Returns the stored sample.
    pub fn on_tick(&mut self) -> Option<u8> {
        if !self.shared.is_recording() {
            return None;
        }
        let session = self.shared.record_session();
        if session != self.session {
            self.session = session;
            self.index = SampleIndex::new();
        }

        let sample = self.adc.sample();
        self.shared.store_sample(self.index, sample);
        self.index.advance();
        self.shared.publish_cursor(self.index, session);
        Some(sample)
    }

    /// Current write index.
    pub fn index(&self) -> SampleIndex<N> {
        self.index
    }

    /// The ADC.
    pub fn adc(&self) -> &A {
        &self.adc
    }
}
