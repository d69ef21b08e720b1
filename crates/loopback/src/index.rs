//! Wrapping counters for the write slot and the playback position.
//!
//! Both replace unbounded integer counters: neither ever overflows, and the
//! "has wrapped" fact the chronological view needs is kept explicitly.

use platform::config::{HOLD_FACTOR, HOLD_SHIFT};

/// Write slot of the sampler: `slot` in `[0, N)` plus whether the ring has
/// been filled at least once in the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleIndex<const N: usize> {
    slot: usize,
    wrapped: bool,
}

/// Bit of the packed cursor word that carries the wrapped flag.
const WRAPPED_BIT: u32 = 1 << 31;

impl<const N: usize> SampleIndex<N> {
    /// Start of a session: slot 0, not wrapped.
    pub const fn new() -> Self {
        Self {
            slot: 0,
            wrapped: false,
        }
    }

    /// Slot the next sample goes into.
    pub fn slot(self) -> usize {
        self.slot
    }

    /// Whether older samples have been overwritten.
    pub fn has_wrapped(self) -> bool {
        self.wrapped
    }

    /// Move to the next slot, wrapping at `N`.
    #[allow(clippy::arithmetic_side_effects)] // Safety: slot < N, so slot + 1 <= N
    pub fn advance(&mut self) {
        self.slot += 1;
        if self.slot >= N {
            self.slot = 0;
            self.wrapped = true;
        }
    }

    /// Slot holding the oldest valid sample: the current slot once the ring
    /// has wrapped, otherwise the start of the buffer.
    pub fn oldest(self) -> usize {
        if self.wrapped {
            self.slot
        } else {
            0
        }
    }

    /// Number of valid samples in the current session.
    pub fn recorded_len(self) -> usize {
        if self.wrapped {
            N
        } else {
            self.slot
        }
    }

    #[allow(clippy::cast_possible_truncation)] // Safety: slot < N <= MAX_CAPACITY < 2^31
    pub(crate) fn to_word(self) -> u32 {
        let slot = self.slot as u32;
        if self.wrapped {
            slot | WRAPPED_BIT
        } else {
            slot
        }
    }

    #[allow(clippy::arithmetic_side_effects)] // Safety: N > 0
    pub(crate) fn from_word(word: u32) -> Self {
        Self {
            slot: (word & !WRAPPED_BIT) as usize % N,
            wrapped: word & WRAPPED_BIT != 0,
        }
    }
}

impl<const N: usize> Default for SampleIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Playback position in output ticks, `[0, 8N)`.
///
/// Every stored sample is held for `HOLD_FACTOR` consecutive PWM wraps, so the
/// buffer offset of a position is `ticks >> HOLD_SHIFT`. Playback stops when
/// the position reaches [`PlaybackPosition::LAST`] (`8N - 1`): the final slot
/// is emitted seven times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPosition<const N: usize> {
    ticks: u32,
}

impl<const N: usize> PlaybackPosition<N> {
    /// Position at which playback stops.
    #[allow(clippy::arithmetic_side_effects)] // Safety: N <= MAX_CAPACITY keeps 8N within u32
    #[allow(clippy::cast_possible_truncation)] // Safety: as above
    pub const LAST: u32 = (N as u32) * HOLD_FACTOR - 1;

    /// Start of playback.
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Output ticks emitted so far.
    pub fn ticks(self) -> u32 {
        self.ticks
    }

    /// Buffer offset (relative to the playback origin) of this position.
    pub fn sample_offset(self) -> usize {
        (self.ticks >> HOLD_SHIFT) as usize
    }

    /// Whether the stop-and-reset branch is due.
    pub fn is_final(self) -> bool {
        self.ticks >= Self::LAST
    }

    /// Advance by one output tick, saturating at [`LAST`](Self::LAST).
    pub fn advance(&mut self) {
        self.ticks = self.ticks.saturating_add(1).min(Self::LAST);
    }

    /// Back to the start.
    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

impl<const N: usize> Default for PlaybackPosition<N> {
    fn default() -> Self {
        Self::new()
    }
}
