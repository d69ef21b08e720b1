//! Echo Loop firmware
//!
//! Press-and-hold voice loopback for the RP2040: hold the button to record
//! the microphone, release it to hear the last three seconds played back
//! through the PWM output.
//!
//! # Architecture
//!
//! ```text
//! Application (main.rs, tasks)
//!         ↓
//! Loopback core (loopback crate: buffer, sampler, player, state machine)
//!         ↓
//! Platform HAL traits (platform crate: AdcInput, PwmOutput, SampleTimer)
//!         ↓
//! RP2040 drivers (hardware module, Embassy)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the RP2040 target (embassy-rp, defmt)
//! - `simulator` - Build the host simulator (tokio, tracing)
//! - `std` - Enable standard library (for the simulator and testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv6m-none-eabi --features hardware
//! ```
//!
//! ## Host Simulator
//!
//! ```bash
//! cargo run --example loopback_sim --features simulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

pub mod boot;
pub mod input;
pub mod sampling;
pub mod tasks;

#[cfg(feature = "hardware")]
pub mod hardware;

pub use input::{button_loop, try_send_event, EventChannel, EventSender, RECORD_EVENTS};
pub use sampling::{ClockCommand, ClockTimer, SampleClock};
pub use tasks::{microphone_control, playback_control, SharedMachine};
