//! RP2040 drivers for the platform traits.
//!
//! Only compiled when targeting real hardware (`--features hardware`).
//!
//! - [`RpAdc`]: blocking ADC conversion on GP26
//! - [`RpPwm`]: PWM slice 0 channel A on GP0, programmed through the PAC
//! - [`PLAYER`]: interrupt-safe cell holding the player for the wrap handler

pub mod adc;
pub mod pwm;

use core::cell::RefCell;

use embassy_rp::interrupt::{self, InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use loopback::Player;
use platform::config::BUFFER_LEN;

pub use adc::RpAdc;
pub use pwm::RpPwm;

/// Player as installed on the device.
pub type DevicePlayer = Player<'static, RpPwm, BUFFER_LEN>;

/// Player cell shared between bring-up and the PWM wrap interrupt.
pub static PLAYER: Mutex<CriticalSectionRawMutex, RefCell<Option<DevicePlayer>>> =
    Mutex::new(RefCell::new(None));

/// Map a boot-time priority number onto the NVIC priority levels.
pub fn nvic_priority(level: u8) -> Priority {
    match level {
        0 => Priority::P0,
        1 => Priority::P1,
        2 => Priority::P2,
        _ => Priority::P3,
    }
}

/// Install the player, arm it and unmask `PWM_IRQ_WRAP` in the NVIC.
///
/// The cell is filled before the interrupt is unmasked, so the first wrap
/// always finds a player.
pub fn install_player(mut player: DevicePlayer) {
    player.arm();
    PLAYER.lock(|cell| *cell.borrow_mut() = Some(player));

    interrupt::PWM_IRQ_WRAP.set_priority(nvic_priority(crate::boot::PWM_WRAP_IRQ_PRIORITY));
    // SAFETY: the handler only touches PLAYER, which is initialised above.
    unsafe {
        interrupt::PWM_IRQ_WRAP.enable();
    }
}

/// Body of the `PWM_IRQ_WRAP` handler.
pub fn on_pwm_wrap() {
    PLAYER.lock(|cell| match cell.borrow_mut().as_mut() {
        Some(player) => {
            player.on_wrap();
        }
        None => pwm::acknowledge_wrap(),
    });
}
