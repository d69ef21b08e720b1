//! PWM audio output on slice 0, channel A (GP0).
//!
//! embassy-rp has no wrap-interrupt API, so the slice is programmed directly
//! through the PAC. Owning the `PWM_SLICE0` and `PIN_0` singletons keeps any
//! other driver off the same hardware.

use embassy_rp::pac;
use embassy_rp::peripherals::{PIN_0, PWM_SLICE0};

use platform::config::{AUDIO_OUT_PIN, AUDIO_PWM_SLICE, PWM_CLOCK_DIV_FRAC, PWM_CLOCK_DIV_INT, PWM_WRAP};
use platform::PwmOutput;

/// IO_BANK0 function select for PWM.
const FUNCSEL_PWM: u8 = 4;

const SLICE: usize = AUDIO_PWM_SLICE as usize;

/// Audio PWM channel.
pub struct RpPwm {
    _slice: PWM_SLICE0,
    _pin: PIN_0,
}

impl RpPwm {
    /// Route GP0 to PWM, set divider 8.0 and top 250, start the counter at
    /// 0 % duty with the wrap interrupt masked.
    pub fn new(slice: PWM_SLICE0, pin: PIN_0) -> Self {
        let ch = pac::PWM.ch(SLICE);
        ch.csr().write(|w| w.set_en(false));
        ch.div().write(|w| {
            w.set_int(PWM_CLOCK_DIV_INT);
            w.set_frac(PWM_CLOCK_DIV_FRAC);
        });
        ch.top().write(|w| w.set_top(PWM_WRAP));
        ch.cc().write(|w| w.set_a(0));
        ch.ctr().write(|w| w.set_ctr(0));

        pac::PWM.inte().modify(|w| w.set_ch(SLICE, false));
        acknowledge_wrap();

        pac::IO_BANK0
            .gpio(usize::from(AUDIO_OUT_PIN))
            .ctrl()
            .write(|w| w.set_funcsel(FUNCSEL_PWM));

        ch.csr().write(|w| w.set_en(true));

        Self {
            _slice: slice,
            _pin: pin,
        }
    }
}

/// Clear the slice's pending wrap flag.
pub fn acknowledge_wrap() {
    pac::PWM.intr().write(|w| w.set_ch(SLICE, true));
}

impl PwmOutput for RpPwm {
    fn set_level(&mut self, level: u16) {
        pac::PWM.ch(SLICE).cc().modify(|w| w.set_a(level));
    }

    fn set_wrap_interrupt(&mut self, enabled: bool) {
        pac::PWM.inte().modify(|w| w.set_ch(SLICE, enabled));
    }

    fn clear_wrap_interrupt(&mut self) {
        acknowledge_wrap();
    }
}
