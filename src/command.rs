//! Single-character command protocol.

use crate::clock_out::ClockSource;
use crate::config;
use crate::input::{Filter, Prescaler};
use crate::state::State;
use crate::transport::{self, Transport};

/// Hardware affected by commands.
pub trait Controls {
    fn apply_input(&mut self, filter: Filter, prescaler: Prescaler);

    fn select_clock_output(&mut self, source: ClockSource);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    CycleClockOutput,
    ToggleHold,
    CycleFilter,
    CyclePrescaler,
    /// Line ending typed by the user: echo a line break, so the status line isn't overwritten.
    Echo,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte.to_ascii_lowercase() {
            config::command::CYCLE_CLOCK_OUTPUT => Some(Self::CycleClockOutput),
            config::command::TOGGLE_HOLD => Some(Self::ToggleHold),
            config::command::CYCLE_FILTER => Some(Self::CycleFilter),
            config::command::CYCLE_PRESCALER => Some(Self::CyclePrescaler),
            b'\r' | b'\n' => Some(Self::Echo),
            _ => None,
        }
    }

    pub fn execute(self, state: &State, transport: &mut impl Transport, controls: &mut impl Controls) {
        match self {
            Self::CycleClockOutput => {
                let selected = state.clock_out.cycle();
                controls.select_clock_output(selected.value);
                debug!("Clock output: {}", selected.label);
            }
            Self::ToggleHold => {
                let held = state.hold.toggle();
                debug!("Hold: {}", held);
            }
            Self::CycleFilter => {
                let selected = state.conditioning.cycle_filter(controls);
                debug!("Filter: {}", selected.label);
            }
            Self::CyclePrescaler => {
                let selected = state.conditioning.cycle_prescaler(controls);
                debug!("Prescaler: {}", selected.label);
            }
            Self::Echo => transport::write_all(transport, config::command::ECHO),
        }
    }
}

/// Handle the next received byte, if any. Never blocks waiting for input.
pub fn poll(state: &State, transport: &mut impl Transport, controls: &mut impl Controls) -> Option<Command> {
    let byte = transport.read_byte()?;
    match Command::from_byte(byte) {
        Some(command) => {
            command.execute(state, transport, controls);
            Some(command)
        }
        None => {
            trace!("Ignoring byte {=u8:#x}", byte);
            None
        }
    }
}
