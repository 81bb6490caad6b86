use crate::hal::pins;
use freqmeter::counter::Counter;
use freqmeter::input::{Filter, Prescaler};
use stm32f1xx_hal::device::{RCC, TIM2};
use stm32f1xx_hal::rcc::{Enable, Reset};

/// TIM2, counting edges on its external trigger input (external clock mode 2).
pub struct InputCounter {
    tim: TIM2,
    _etr: pins::A0_TIM2_ETR,
}

impl InputCounter {
    /// Start counting, with no filter and no prescaler, and the update interrupt enabled.
    pub fn new(tim: TIM2, etr: pins::A0_TIM2_ETR) -> Self {
        unsafe {
            //NOTE(unsafe) this reference will only be used for atomic writes with no side effects
            let rcc = &(*RCC::ptr());
            // Enable and reset the timer peripheral
            TIM2::enable(rcc);
            TIM2::reset(rcc);
        }

        let mut counter = Self { tim, _etr: etr };

        // count every edge, over the full 16-bit range
        counter.tim.psc.write(|w| w.psc().bits(0));
        counter.tim.arr.write(|w| w.arr().bits(u16::MAX));
        counter.configure(freqmeter::input::FILTERS[0].value, Prescaler::Div1);

        // load the prescaler, then discard the update event this raises
        counter.tim.egr.write(|w| w.ug().set_bit());
        counter.tim.sr.modify(|_, w| w.uif().clear_bit());

        counter.tim.dier.write(|w| w.uie().set_bit());
        counter.tim.cr1.modify(|_, w| w.cen().set_bit());

        counter
    }
}

impl Counter for InputCounter {
    fn value(&self) -> u16 {
        self.tim.cnt.read().cnt().bits()
    }

    fn set_value(&mut self, value: u16) {
        self.tim.cnt.write(|w| w.cnt().bits(value));
    }

    fn overflow_pending(&self) -> bool {
        self.tim.sr.read().uif().bit_is_set()
    }

    fn take_overflow(&mut self) -> bool {
        let pending = self.overflow_pending();
        // the flag is rc_w0: writing 1 to the other flags leaves them untouched
        self.tim.sr.modify(|_, w| w.uif().clear_bit());
        pending
    }

    fn restart(&mut self) {
        // run the counter up to its top, then through an update event back to zero,
        // which latches the overflow flag whether or not it was already set
        self.set_value(u16::MAX);
        self.tim.egr.write(|w| w.ug().set_bit());
    }

    #[allow(unused_unsafe)]
    fn configure(&mut self, filter: Filter, prescaler: Prescaler) {
        self.tim.smcr.modify(|_, w| unsafe {
            w
                // external clock mode 2
                .ece()
                .set_bit()
                .etps()
                .bits(prescaler.bits())
                .etf()
                .bits(filter.bits())
        });
    }
}
