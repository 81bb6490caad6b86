use crate::config;
use crate::input::{Filter, Prescaler};

/// Number of events between two overflows of the hardware counter.
pub const RANGE: u32 = config::counter::RANGE;

/// A narrow hardware counter, clocked by the signal under test.
pub trait Counter {
    /// Current raw counter value.
    fn value(&self) -> u16;

    fn set_value(&mut self, value: u16);

    /// Whether an overflow has been latched and not yet acknowledged.
    fn overflow_pending(&self) -> bool;

    /// Acknowledge a latched overflow, returning whether one was pending.
    fn take_overflow(&mut self) -> bool;

    /// Force the counter through its top value back to zero.
    ///
    /// Must latch exactly one overflow, regardless of whether one was already pending.
    fn restart(&mut self);

    /// Apply input conditioning.
    fn configure(&mut self, filter: Filter, prescaler: Prescaler);
}

/// Extends a narrow hardware counter to 32 bits by accumulating its overflows.
///
/// Both `on_overflow` and `finalize` must be called from interrupt handlers
/// of the same priority, so that neither can preempt the other.
pub struct WideCounter<C> {
    counter: C,
    overflows: u32,
}

impl<C: Counter> WideCounter<C> {
    pub const fn new(counter: C) -> Self {
        Self {
            counter,
            overflows: 0,
        }
    }

    /// Handle an overflow notification.
    pub fn on_overflow(&mut self) {
        if self.counter.take_overflow() {
            self.overflows = self.overflows.wrapping_add(RANGE);
        }
    }

    /// Events accumulated from overflows so far in this window.
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// End the current window: return the number of events counted in it,
    /// and restart counting from zero.
    pub fn finalize(&mut self) -> u32 {
        // An overflow may be latched but not yet serviced, since the overflow handler cannot
        // preempt us. Fold it in, and re-read until the value is consistent with `overflows`.
        let value = loop {
            self.on_overflow();
            let value = self.counter.value();
            if !self.counter.overflow_pending() {
                break value;
            }
        };

        let count = self.overflows.wrapping_add(u32::from(value));

        // Restarting latches one synthetic overflow, which does not belong to any window.
        self.counter.restart();
        if !self.counter.take_overflow() {
            warn!("Counter restart did not latch an overflow");
        }

        self.overflows = 0;

        count
    }

    pub fn configure(&mut self, filter: Filter, prescaler: Prescaler) {
        self.counter.configure(filter, prescaler);
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }
}
