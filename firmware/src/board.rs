use crate::hal::mco::ClockOut;
use crate::hal::tim::InputCounter;
use freqmeter::clock_out::ClockSource;
use freqmeter::command::Controls;
use freqmeter::input::{Filter, Prescaler};
use freqmeter::WideCounter;
use rtic::Mutex;

/// Hardware controlled from the foreground.
///
/// The input counter is shared with the measurement tasks, so it's reached through its resource lock.
pub struct Board<W> {
    wide: W,
    clock_out: &'static mut ClockOut,
}

impl<W: Mutex<T = WideCounter<InputCounter>>> Board<W> {
    pub fn new(wide: W, clock_out: &'static mut ClockOut) -> Self {
        Self { wide, clock_out }
    }
}

impl<W: Mutex<T = WideCounter<InputCounter>>> Controls for Board<W> {
    fn apply_input(&mut self, filter: Filter, prescaler: Prescaler) {
        self.wide.lock(|wide| wide.configure(filter, prescaler));
    }

    fn select_clock_output(&mut self, source: ClockSource) {
        self.clock_out.select(source);
    }
}
