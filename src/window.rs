use crate::config;
use crate::counter::{Counter, WideCounter};
use crate::state::State;
use crate::time::Duration;

/// The end of a measurement window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Boundary {
    /// Number of windows finalized since startup, including this one.
    pub window: u32,
    /// Raw events counted in this window, before prescaler compensation.
    pub count: u32,
    /// The frequency published for this window, if any.
    ///
    /// `None` during warm-up or while on hold.
    pub published: Option<u32>,
}

/// Gates the wide counter into one-second windows, driven by a 1 kHz tick.
///
/// Lives in the tick handler, which must have the same priority as the overflow handler.
pub struct Scheduler {
    ticks: u16,
    window: u32,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            window: 0,
        }
    }

    /// Handle one tick, finalizing the window if this tick ends it.
    pub fn tick<C: Counter>(&mut self, wide: &mut WideCounter<C>, state: &State) -> Option<Boundary> {
        let measurement = &state.measurement;
        measurement.set_now(measurement.now() + Duration::from_ticks(1));

        self.ticks += 1;
        if self.ticks < config::window::TICKS {
            return None;
        }
        self.ticks = 0;

        // read before finalizing, so both are consistent with what was in effect for this window
        let held = state.hold.is_held();
        let shift = state.conditioning.prescaler().value().shift();

        let count = wide.finalize();

        self.window = self.window.wrapping_add(1);
        let published = if held || self.window <= config::window::WARM_UP {
            None
        } else {
            Some(count << shift)
        };

        measurement.publish(self.window, published);

        Some(Boundary {
            window: self.window,
            count,
            published,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::tests::FakeCounter;
    use crate::counter::RANGE;
    use crate::input::Prescaler;

    struct Bench {
        scheduler: Scheduler,
        wide: WideCounter<FakeCounter>,
        state: State,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                scheduler: Scheduler::new(),
                wide: WideCounter::new(FakeCounter::default()),
                state: State::new(),
            }
        }

        /// Run one full window, counting `events` spread evenly over its ticks.
        fn window(&mut self, events: u32) -> Boundary {
            let per_tick = events / u32::from(config::window::TICKS);
            let mut remainder = events % u32::from(config::window::TICKS);
            loop {
                let extra = if remainder > 0 {
                    remainder -= 1;
                    1
                } else {
                    0
                };
                self.wide.counter_mut().count(per_tick + extra);
                if self.wide.counter().overflow_pending() {
                    self.wide.on_overflow();
                }
                if let Some(boundary) = self.scheduler.tick(&mut self.wide, &self.state) {
                    return boundary;
                }
            }
        }
    }

    #[test]
    fn boundary_every_thousand_ticks() {
        let mut bench = Bench::new();
        for _ in 0..999 {
            assert_eq!(bench.scheduler.tick(&mut bench.wide, &bench.state), None);
        }
        let boundary = bench.scheduler.tick(&mut bench.wide, &bench.state);
        assert_eq!(boundary.map(|b| b.window), Some(1));
        assert_eq!(bench.state.measurement.now().ticks(), 1000);
    }

    #[test]
    fn warm_up_window_is_not_published() {
        let mut bench = Bench::new();

        let first = bench.window(5000);
        assert_eq!(first.count, 5000);
        assert_eq!(first.published, None);
        assert_eq!(bench.state.measurement.sample().frequency, 0);

        let second = bench.window(6000);
        assert_eq!(second.published, Some(6000));
        assert_eq!(bench.state.measurement.sample().frequency, 6000);
    }

    #[test]
    fn counts_beyond_counter_width() {
        let mut bench = Bench::new();
        bench.window(0);

        let events = 10 * RANGE + 4321;
        assert_eq!(bench.window(events).published, Some(events));
    }

    #[test]
    fn prescaler_scales_published_value() {
        let mut bench = Bench::new();
        bench.window(0);

        bench.state.conditioning.prescaler().cycle();
        assert_eq!(bench.state.conditioning.prescaler().value(), Prescaler::Div2);

        // one overflow plus 12345 counted after the divider
        bench.wide.counter_mut().count(RANGE);
        bench.wide.on_overflow();
        bench.wide.counter_mut().count(12345);
        let boundary = loop {
            if let Some(b) = bench.scheduler.tick(&mut bench.wide, &bench.state) {
                break b;
            }
        };

        assert_eq!(boundary.count, RANGE + 12345);
        assert_eq!(boundary.published, Some(155762));
    }

    #[test]
    fn hold_freezes_until_cleared() {
        let mut bench = Bench::new();
        bench.window(0);
        bench.window(1000);

        bench.state.hold.toggle();
        for events in [2000, 3000, 4000] {
            assert_eq!(bench.window(events).published, None);
            assert_eq!(bench.state.measurement.sample().frequency, 1000);
        }

        bench.state.hold.toggle();
        assert_eq!(bench.state.measurement.sample().frequency, 1000);
        assert_eq!(bench.window(5000).published, Some(5000));
        assert_eq!(bench.state.measurement.sample().frequency, 5000);
    }

    #[test]
    fn windows_keep_counting_while_held() {
        let mut bench = Bench::new();
        bench.state.hold.toggle();
        for expected in 1..=3 {
            assert_eq!(bench.window(100).window, expected);
        }
        assert_eq!(bench.state.measurement.sample().window, 3);
        assert_eq!(bench.wide.counter().restarts, 3);
    }
}
