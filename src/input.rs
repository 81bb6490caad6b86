//! Signal conditioning of the counter input: digital filter and prescaler.
//!
//! Both map directly onto the external trigger of the STM32F1 general purpose timers
//! (`TIMx_SMCR.ETF` and `TIMx_SMCR.ETPS`).

use crate::command::Controls;
use crate::selector::{Selector, Setting};

/// Digital input filter, as the raw 4-bit `ETF` field.
///
/// Nonzero values require `N` consecutive equal samples at the given sampling clock
/// before an edge is accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Filter(u8);

impl Filter {
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Division of the input edge rate before it reaches the counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Prescaler {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
}

impl Prescaler {
    /// Raw 2-bit `ETPS` field.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Left shift which converts a prescaled count back to the number of input edges.
    pub const fn shift(self) -> u32 {
        self as u32
    }
}

pub const FILTERS: [Setting<Filter>; 16] = [
    Setting { value: Filter(0), label: "OFF" },
    Setting { value: Filter(1), label: "CK/1 N=2" },
    Setting { value: Filter(2), label: "CK/1 N=4" },
    Setting { value: Filter(3), label: "CK/1 N=8" },
    Setting { value: Filter(4), label: "DTS/2 N=6" },
    Setting { value: Filter(5), label: "DTS/2 N=8" },
    Setting { value: Filter(6), label: "DTS/4 N=6" },
    Setting { value: Filter(7), label: "DTS/4 N=8" },
    Setting { value: Filter(8), label: "DTS/8 N=6" },
    Setting { value: Filter(9), label: "DTS/8 N=8" },
    Setting { value: Filter(10), label: "DTS/16 N=5" },
    Setting { value: Filter(11), label: "DTS/16 N=6" },
    Setting { value: Filter(12), label: "DTS/16 N=8" },
    Setting { value: Filter(13), label: "DTS/32 N=5" },
    Setting { value: Filter(14), label: "DTS/32 N=6" },
    Setting { value: Filter(15), label: "DTS/32 N=8" },
];

pub const PRESCALERS: [Setting<Prescaler>; 4] = [
    Setting { value: Prescaler::Div1, label: "OFF" },
    Setting { value: Prescaler::Div2, label: "/2" },
    Setting { value: Prescaler::Div4, label: "/4" },
    Setting { value: Prescaler::Div8, label: "/8" },
];

/// Runtime-selectable input filter and prescaler.
///
/// The prescaler read by the window scheduler to scale counts is always the entry
/// most recently applied to the hardware, since both come from the same table slot.
pub struct Conditioning {
    filter: Selector<Filter>,
    prescaler: Selector<Prescaler>,
}

impl Conditioning {
    pub const fn new() -> Self {
        Self {
            filter: Selector::new(&FILTERS),
            prescaler: Selector::new(&PRESCALERS),
        }
    }

    pub fn filter(&self) -> &Selector<Filter> {
        &self.filter
    }

    pub fn prescaler(&self) -> &Selector<Prescaler> {
        &self.prescaler
    }

    /// Apply the current selection to the hardware.
    pub fn apply(&self, controls: &mut impl Controls) {
        controls.apply_input(self.filter.value(), self.prescaler.value());
    }

    pub fn cycle_filter(&self, controls: &mut impl Controls) -> &'static Setting<Filter> {
        let selected = self.filter.cycle();
        self.apply(controls);
        selected
    }

    pub fn cycle_prescaler(&self, controls: &mut impl Controls) -> &'static Setting<Prescaler> {
        let selected = self.prescaler.cycle();
        self.apply(controls);
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock_out::ClockSource;

    #[derive(Default)]
    struct Recorder {
        applied: Vec<(Filter, Prescaler)>,
    }

    impl Controls for Recorder {
        fn apply_input(&mut self, filter: Filter, prescaler: Prescaler) {
            self.applied.push((filter, prescaler));
        }

        fn select_clock_output(&mut self, _: ClockSource) {
            unreachable!("input changes must not touch the clock output")
        }
    }

    #[test]
    fn tables_are_in_register_order() {
        for (i, setting) in FILTERS.iter().enumerate() {
            assert_eq!(usize::from(setting.value.bits()), i);
        }
        for (i, setting) in PRESCALERS.iter().enumerate() {
            assert_eq!(usize::from(setting.value.bits()), i);
            assert_eq!(setting.value.shift(), i as u32);
        }
    }

    #[test]
    fn defaults_are_unfiltered_and_unscaled() {
        let conditioning = Conditioning::new();
        assert_eq!(conditioning.filter().label(), "OFF");
        assert_eq!(conditioning.prescaler().value(), Prescaler::Div1);
        assert_eq!(conditioning.prescaler().value().shift(), 0);
    }

    #[test]
    fn cycling_reapplies_both_settings() {
        let conditioning = Conditioning::new();
        let mut controls = Recorder::default();

        conditioning.cycle_prescaler(&mut controls);
        conditioning.cycle_filter(&mut controls);

        assert_eq!(
            controls.applied,
            [
                (Filter(0), Prescaler::Div2),
                (Filter(1), Prescaler::Div2),
            ]
        );
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let conditioning = Conditioning::new();
        let mut controls = Recorder::default();

        for _ in 0..FILTERS.len() {
            conditioning.cycle_filter(&mut controls);
        }
        for _ in 0..PRESCALERS.len() {
            conditioning.cycle_prescaler(&mut controls);
        }

        assert_eq!(conditioning.filter().index(), 0);
        assert_eq!(conditioning.filter().label(), "OFF");
        assert_eq!(conditioning.prescaler().index(), 0);
        assert_eq!(conditioning.prescaler().label(), "OFF");
        assert_eq!(controls.applied.len(), FILTERS.len() + PRESCALERS.len());
    }
}
