use crate::command::{self, Controls};
use crate::config;
use crate::report::{self, Status};
use crate::state::State;
use crate::time::Instant;
use crate::transport::{self, Transport};

/// The foreground side of the meter: interprets commands and periodically reports the latest sample.
pub struct Console {
    last_report: Option<Instant>,
}

impl Console {
    pub const fn new() -> Self {
        Self { last_report: None }
    }

    /// Run one iteration of the foreground loop.
    ///
    /// Returns whether a status line was written.
    pub fn poll(&mut self, state: &State, transport: &mut impl Transport, controls: &mut impl Controls) -> bool {
        command::poll(state, transport, controls);

        let now = state.measurement.now();
        if let Some(last) = self.last_report {
            match now.checked_duration_since(last) {
                Some(elapsed) if elapsed >= config::report::INTERVAL => {}
                _ => return false,
            }
        }

        let sample = state.measurement.sample();
        if !sample.is_settled() {
            return false;
        }

        let line = report::format(&Status::capture(state, sample));
        transport::write_all(transport, line.as_bytes());
        self.last_report = Some(now);
        true
    }
}
