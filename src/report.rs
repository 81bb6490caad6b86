//! Status line.
//!
//! ```text
//! 12.345678 MHz . [clock Out: OFF] [Hold: OFF] [digital Filter: OFF] [Prescaler: OFF]
//! ```
//!
//! terminated by a carriage return only, so a terminal redraws it in place.

use crate::config;
use crate::state::{Sample, State};
use core::fmt::{self, Write};
use heapless::String;

pub type Line = String<{ config::report::LINE_CAPACITY }>;

/// Everything shown in one status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status {
    /// Hz
    pub frequency: u32,
    pub blink: bool,
    pub clock_out: &'static str,
    pub hold: &'static str,
    pub filter: &'static str,
    pub prescaler: &'static str,
}

impl Status {
    pub fn capture(state: &State, sample: Sample) -> Self {
        Self {
            frequency: sample.frequency,
            blink: sample.blink(),
            clock_out: state.clock_out.label(),
            hold: state.hold.label(),
            filter: state.conditioning.filter().label(),
            prescaler: state.conditioning.prescaler().label(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06} MHz {} [clock Out: {}] [Hold: {}] [digital Filter: {}] [Prescaler: {}]\r",
            self.frequency / 1_000_000,
            self.frequency % 1_000_000,
            if self.blink { '.' } else { ' ' },
            self.clock_out,
            self.hold,
            self.filter,
            self.prescaler,
        )
    }
}

/// Format a status line. A line that doesn't fit is truncated.
pub fn format(status: &Status) -> Line {
    let mut line = Line::new();
    if write!(line, "{}", status).is_err() {
        warn!("Status line truncated at {=usize} bytes", line.len());
    }
    line
}
