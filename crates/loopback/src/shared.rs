//! State shared between the interrupt handlers and the control tasks.
//!
//! Every field has exactly one writer:
//!
//! | Field                               | Writer                  |
//! |-------------------------------------|-------------------------|
//! | buffer slots, write cursor + tag    | `Sampler`               |
//! | recording flag, record session      | `RecordingStateMachine` |
//! | play session, play origin           | `RecordingStateMachine` |
//! | played session                      | `Player`                |
//!
//! The writer-side methods are `pub(crate)`; outside the crate a `Loopback`
//! is read-only.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::audio_buffer::AudioBuffer;
use crate::index::SampleIndex;

/// Buffer plus the session flags that sequence recording and playback.
pub struct Loopback<const N: usize> {
    buffer: AudioBuffer<N>,
    recording: AtomicBool,
    record_session: AtomicU32,
    cursor: AtomicU32,
    cursor_session: AtomicU32,
    play_session: AtomicU32,
    play_origin: AtomicU32,
    played_session: AtomicU32,
}

impl<const N: usize> Loopback<N> {
    /// Create an idle loopback with a silent buffer.
    pub const fn new() -> Self {
        Self {
            buffer: AudioBuffer::new(),
            recording: AtomicBool::new(false),
            record_session: AtomicU32::new(0),
            cursor: AtomicU32::new(0),
            cursor_session: AtomicU32::new(0),
            play_session: AtomicU32::new(0),
            play_origin: AtomicU32::new(0),
            played_session: AtomicU32::new(0),
        }
    }

    /// The sample store.
    pub fn buffer(&self) -> &AudioBuffer<N> {
        &self.buffer
    }

    /// Whether the sampler should store samples.
    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::Acquire)
    }

    /// Identifier of the latest recording session.
    pub fn record_session(&self) -> u32 {
        self.record_session.load(Ordering::Acquire)
    }

    /// Write cursor of the latest recording session.
    ///
    /// A cursor published for an older session reads as the start of the
    /// ring: a session that has not been ticked yet has recorded nothing.
    pub fn write_cursor(&self) -> SampleIndex<N> {
        let tag = self.cursor_session.load(Ordering::Acquire);
        let word = self.cursor.load(Ordering::Acquire);
        if tag == self.record_session() {
            SampleIndex::from_word(word)
        } else {
            SampleIndex::new()
        }
    }

    /// Identifier of the latest playback request.
    pub fn play_session(&self) -> u32 {
        self.play_session.load(Ordering::Acquire)
    }

    /// Slot the latest playback request starts from.
    pub fn play_origin(&self) -> usize {
        self.play_origin.load(Ordering::Acquire) as usize
    }

    /// Identifier of the last playback the player finished (or abandoned).
    pub fn played_session(&self) -> u32 {
        self.played_session.load(Ordering::Acquire)
    }

    /// Whether a playback request has not yet been completed by the player.
    pub fn playback_pending(&self) -> bool {
        self.play_session() != self.played_session()
    }

    /// Chronological view of the whole ring: all `N` slots, starting at the
    /// current write slot and wrapping.
    ///
    /// After a recording that wrapped, this is exactly the last `N` samples
    /// in order. After a shorter one, the captured samples are at the end of
    /// the view, preceded by whatever the ring held before.
    pub fn recorded(&self) -> impl Iterator<Item = u8> + '_ {
        self.buffer.iter_from(self.write_cursor().slot())
    }

    // ── Sampler side ────────────────────────────────────────────────────────

    pub(crate) fn store_sample(&self, index: SampleIndex<N>, sample: u8) {
        self.buffer.write(index.slot(), sample);
    }

    /// Publish `index` as the cursor of `session`.
    ///
    /// The cursor is stored before its tag, so a reader that sees the tag of
    /// a session never pairs it with the cursor of an earlier one.
    pub(crate) fn publish_cursor(&self, index: SampleIndex<N>, session: u32) {
        self.cursor.store(index.to_word(), Ordering::Release);
        self.cursor_session.store(session, Ordering::Release);
    }

    // ── State machine side ──────────────────────────────────────────────────

    /// Open a new recording session; returns its identifier.
    pub(crate) fn begin_recording(&self) -> u32 {
        let session = self.record_session().wrapping_add(1);
        self.record_session.store(session, Ordering::Release);
        self.recording.store(true, Ordering::Release);
        session
    }

    pub(crate) fn end_recording(&self) {
        self.recording.store(false, Ordering::Release);
    }

    /// Ask the player to replay the ring starting at `origin`.
    ///
    /// The origin is published before the session so the player never pairs
    /// a new session with a stale origin.
    #[allow(clippy::cast_possible_truncation)] // Safety: origin < N <= MAX_CAPACITY < 2^32
    pub(crate) fn request_playback(&self, origin: usize) -> u32 {
        self.play_origin.store(origin as u32, Ordering::Release);
        let session = self.play_session().wrapping_add(1);
        self.play_session.store(session, Ordering::Release);
        session
    }

    // ── Player side ─────────────────────────────────────────────────────────

    pub(crate) fn finish_playback(&self, session: u32) {
        self.played_session.store(session, Ordering::Release);
    }
}

impl<const N: usize> Default for Loopback<N> {
    fn default() -> Self {
        Self::new()
    }
}
