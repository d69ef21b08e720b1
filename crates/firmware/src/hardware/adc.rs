//! Microphone ADC driver.

use embassy_rp::adc::{Adc, Blocking, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{ADC, PIN_26};

use platform::audio_types::AdcResolution;
use platform::AdcInput;

/// Blocking conversions on ADC input 0 (GP26).
pub struct RpAdc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl RpAdc {
    /// Take the ADC and the microphone pin.
    pub fn new(adc: ADC, pin: PIN_26) -> Self {
        Self {
            adc: Adc::new_blocking(adc, Config::default()),
            channel: Channel::new_pin(pin, Pull::None),
        }
    }
}

impl AdcInput for RpAdc {
    fn convert(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => raw,
            Err(_) => {
                defmt::warn!("adc: conversion error, storing silence");
                0
            }
        }
    }

    fn resolution(&self) -> AdcResolution {
        AdcResolution::RP2040
    }
}
