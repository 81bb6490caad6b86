//! State shared between the interrupt handlers and the foreground loop.
//!
//! Every field has exactly one writer context:
//!
//! | Field          | Writer                | Readers              |
//! |----------------|-----------------------|----------------------|
//! | `conditioning` | foreground (commands) | foreground, tick     |
//! | `clock_out`    | foreground (commands) | foreground           |
//! | `hold`         | foreground (commands) | foreground, tick     |
//! | `measurement`  | tick                  | foreground           |
//!
//! so plain atomic loads and stores are sufficient, without read-modify-write operations.

use crate::clock_out::{ClockSource, CLOCK_SOURCES};
use crate::config;
use crate::hold::Hold;
use crate::input::Conditioning;
use crate::selector::Selector;
use crate::time::Instant;
use core::sync::atomic::{AtomicU32, Ordering};

// Measurements are published as single 32-bit stores, which must not tear.
#[cfg(not(target_has_atomic = "32"))]
compile_error!("32-bit loads and stores must be atomic on the target");

pub struct State {
    pub conditioning: Conditioning,
    pub clock_out: Selector<ClockSource>,
    pub hold: Hold,
    pub measurement: Measurement,
}

impl State {
    /// Startup defaults: no filter, no prescaler, clock output off, hold off.
    pub const fn new() -> Self {
        Self {
            conditioning: Conditioning::new(),
            clock_out: Selector::new(&CLOCK_SOURCES),
            hold: Hold::new(),
            measurement: Measurement::new(),
        }
    }
}

/// The latest finalized window, as seen by the foreground.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Number of windows finalized since startup.
    pub window: u32,
    /// Input events per window (Hz), from the latest window that was published.
    pub frequency: u32,
}

impl Sample {
    /// Whether this sample is past the warm-up windows, i.e. fit to be reported.
    pub fn is_settled(&self) -> bool {
        self.window > config::window::WARM_UP
    }

    /// Alternates at every window boundary.
    pub fn blink(&self) -> bool {
        self.window % 2 == 1
    }
}

/// Measurement results, published by the window scheduler.
pub struct Measurement {
    uptime: AtomicU32,
    window: AtomicU32,
    frequency: AtomicU32,
}

impl Measurement {
    pub const fn new() -> Self {
        Self {
            uptime: AtomicU32::new(0),
            window: AtomicU32::new(0),
            frequency: AtomicU32::new(0),
        }
    }

    /// Time since startup, in ticks.
    pub fn now(&self) -> Instant {
        Instant::from_ticks(self.uptime.load(Ordering::Relaxed))
    }

    pub(crate) fn set_now(&self, now: Instant) {
        self.uptime.store(now.ticks(), Ordering::Relaxed);
    }

    /// Publish the end of a window, along with its frequency if it should replace the previous one.
    pub(crate) fn publish(&self, window: u32, frequency: Option<u32>) {
        if let Some(frequency) = frequency {
            self.frequency.store(frequency, Ordering::Relaxed);
        }
        // pairs with the acquire in `sample`, so a reader never sees a window index
        // without the frequency published with it
        self.window.store(window, Ordering::Release);
    }

    pub fn sample(&self) -> Sample {
        let window = self.window.load(Ordering::Acquire);
        let frequency = self.frequency.load(Ordering::Relaxed);
        Sample { window, frequency }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unsettled() {
        let state = State::new();
        let sample = state.measurement.sample();
        assert_eq!(sample, Sample { window: 0, frequency: 0 });
        assert!(!sample.is_settled());
        assert_eq!(state.measurement.now().ticks(), 0);
    }

    #[test]
    fn publish_without_frequency_keeps_previous() {
        let measurement = Measurement::new();
        measurement.publish(2, Some(1000));
        measurement.publish(3, None);
        assert_eq!(measurement.sample(), Sample { window: 3, frequency: 1000 });
    }

    #[test]
    fn settles_after_warm_up() {
        let first = Sample { window: config::window::WARM_UP, frequency: 1 };
        let next = Sample { window: config::window::WARM_UP + 1, frequency: 1 };
        assert!(!first.is_settled());
        assert!(next.is_settled());
    }

    #[test]
    fn blink_alternates() {
        let a = Sample { window: 5, frequency: 0 };
        let b = Sample { window: 6, frequency: 0 };
        assert_ne!(a.blink(), b.blink());
    }
}
