//! Calibration clock output.
//!
//! Routes one of the internal clocks to a pin, so the meter can be checked against itself
//! or used as a crude signal source. Has no effect on measurement.

use crate::selector::Setting;

/// Source of the microcontroller clock output (`RCC_CFGR.MCO`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockSource {
    Off = 0b000,
    Sysclk = 0b100,
    Hsi = 0b101,
    Hse = 0b110,
    PllDiv2 = 0b111,
}

impl ClockSource {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

pub const CLOCK_SOURCES: [Setting<ClockSource>; 5] = [
    Setting { value: ClockSource::Off, label: "OFF" },
    Setting { value: ClockSource::Sysclk, label: "SYSCLK" },
    Setting { value: ClockSource::Hsi, label: "HSI" },
    Setting { value: ClockSource::Hse, label: "HSE" },
    Setting { value: ClockSource::PllDiv2, label: "PLL/2" },
];
