use crate::hal::pins;
use freqmeter::clock_out::ClockSource;
use stm32f1xx_hal::device::RCC;

/// Microcontroller clock output on PA8.
pub struct ClockOut {
    _pin: pins::A8_MCO,
}

impl ClockOut {
    pub fn new(pin: pins::A8_MCO) -> Self {
        let mut out = Self { _pin: pin };
        out.select(ClockSource::Off);
        out
    }

    #[allow(unused_unsafe)]
    pub fn select(&mut self, source: ClockSource) {
        unsafe {
            //NOTE(unsafe) the clock configuration is frozen, so MCO is the only field of CFGR still written
            let rcc = &(*RCC::ptr());
            rcc.cfgr.modify(|_, w| unsafe { w.mco().bits(source.bits()) });
        }
    }
}
