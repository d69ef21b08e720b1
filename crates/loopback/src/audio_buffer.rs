//! Fixed-capacity sample store shared between two interrupt handlers.
//!
//! `AudioBuffer<N>` holds `N` 8-bit samples in individual `AtomicU8` cells, so
//! the sampler (timer IRQ) and the player (PWM wrap IRQ) can touch the same
//! slot without a lock and without tearing. Only `load`/`store` are used,
//! which thumbv6m supports without compare-and-swap.
//!
//! # Constraints
//!
//! - Every index is taken modulo `N`; there is no valid-length bookkeeping.
//!   The last `N` samples written are always considered valid.
//! - Writes are crate-private: only [`Sampler`](crate::sampler::Sampler)
//!   produces samples.

use core::sync::atomic::{AtomicU8, Ordering};

/// Largest supported capacity: the write cursor packs the slot into 31 bits
/// and playback positions (`8 * N`) must fit a `u32`.
pub const MAX_CAPACITY: usize = (u32::MAX / platform::config::HOLD_FACTOR) as usize;

/// A ring of `N` atomic 8-bit samples.
pub struct AudioBuffer<const N: usize> {
    slots: [AtomicU8; N],
}

impl<const N: usize> AudioBuffer<N> {
    const CAPACITY_OK: () = assert!(N > 0 && N <= MAX_CAPACITY, "buffer capacity out of range");

    /// Create a zero-filled buffer.
    ///
    /// `const` so the buffer can live in a `static` without a runtime
    /// initialiser.
    #[allow(clippy::declare_interior_mutable_const)] // Safety: only used as an array repeat operand
    pub const fn new() -> Self {
        let () = Self::CAPACITY_OK;
        const ZERO: AtomicU8 = AtomicU8::new(0);
        Self { slots: [ZERO; N] }
    }

    /// Number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Read the sample at `index mod N`.
    #[allow(clippy::arithmetic_side_effects)] // Safety: N > 0, checked at compile time
    pub fn read(&self, index: usize) -> u8 {
        self.slots
            .get(index % N)
            .map_or(0, |slot| slot.load(Ordering::Relaxed))
    }

    /// Store `sample` at `index mod N`.
    #[allow(clippy::arithmetic_side_effects)] // Safety: N > 0, checked at compile time
    pub(crate) fn write(&self, index: usize, sample: u8) {
        if let Some(slot) = self.slots.get(index % N) {
            slot.store(sample, Ordering::Relaxed);
        }
    }

    /// Iterate over all `N` slots starting at `start` and wrapping.
    #[allow(clippy::arithmetic_side_effects)] // Safety: start % N + k < 2N, no overflow for N <= MAX_CAPACITY
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = u8> + '_ {
        let start = start % N;
        (0..N).map(move |k| self.read(start + k))
    }
}

impl<const N: usize> Default for AudioBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
