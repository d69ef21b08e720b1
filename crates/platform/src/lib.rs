//! Hardware Abstraction Layer (HAL) for the Echo Loop recorder
//!
//! This crate provides trait-based abstractions for the three peripherals the
//! loopback core talks to, enabling development and testing without physical
//! hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: tasks, bring-up)
//!         ↓
//! Core Layer (loopback: buffer, sampler, player, state machine)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (embassy-rp HAL + PAC)
//! ```
//!
//! # Abstractions
//!
//! - [`AdcInput`] - microphone channel, one blocking conversion per call
//! - [`PwmOutput`] - audio output slice with a wrap interrupt
//! - [`SampleTimer`] - cancellable periodic alarm driving the sampler
//! - [`gpio`] - button edge/level vocabulary (the pin itself is any
//!   `embedded-hal` `InputPin` + `embedded-hal-async` `Wait`)
//!
//! # Features
//!
//! - `std`: host-side mocks in [`mocks`]
//! - `hardware`: physical hardware marker
//! - `defmt`: enable `defmt::Format` derives
//!
//! # Example
//!
//! ```
//! use platform::AdcInput;
//!
//! fn capture<A: AdcInput>(adc: &mut A) -> u8 {
//!     adc.resolution().quantize(adc.convert())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod adc;
pub mod audio_types;
pub mod clock_config;
pub mod config;
pub mod gpio;
pub mod mocks;
pub mod pwm;
pub mod timer;

// Re-export main peripheral traits
pub use adc::AdcInput;
pub use pwm::PwmOutput;
pub use timer::{SampleTimer, TimerError};

// Re-export GPIO types
pub use gpio::{Edge, PinState};
