use core::sync::atomic::{AtomicU8, Ordering};

/// A hardware setting, together with the label shown for it in the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Setting<T> {
    pub value: T,
    pub label: &'static str,
}

/// Cyclic selection from a fixed table of settings.
///
/// The index is only ever written from the foreground (by the command interpreter),
/// and read from both the foreground and interrupt handlers,
/// so plain atomic loads and stores are sufficient.
pub struct Selector<T: 'static> {
    table: &'static [Setting<T>],
    index: AtomicU8,
}

impl<T: 'static> Selector<T> {
    /// Create a selector, initially selecting the first entry of `table`.
    pub const fn new(table: &'static [Setting<T>]) -> Self {
        assert!(!table.is_empty(), "selector table must not be empty");
        assert!(table.len() <= u8::MAX as usize, "selector table too long");
        Self {
            table,
            index: AtomicU8::new(0),
        }
    }

    pub fn index(&self) -> usize {
        usize::from(self.index.load(Ordering::Relaxed))
    }

    /// The currently selected entry.
    pub fn current(&self) -> &'static Setting<T> {
        // the index is only ever stored by `cycle`, which keeps it in bounds
        &self.table[self.index() % self.table.len()]
    }

    pub fn label(&self) -> &'static str {
        self.current().label
    }

    /// Advance to the next entry, wrapping around at the end of the table.
    ///
    /// Must only be called from a single context.
    pub fn cycle(&self) -> &'static Setting<T> {
        let next = (self.index() + 1) % self.table.len();
        // fits, since the table length is checked in `new`
        #[allow(clippy::cast_possible_truncation)]
        let stored = next as u8;
        self.index.store(stored, Ordering::Relaxed);
        &self.table[next]
    }
}

impl<T: Copy + 'static> Selector<T> {
    /// The value of the currently selected entry.
    pub fn value(&self) -> T {
        self.current().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FOUR: [Setting<u8>; 4] = [
        Setting { value: 0, label: "zero" },
        Setting { value: 1, label: "one" },
        Setting { value: 2, label: "two" },
        Setting { value: 3, label: "three" },
    ];

    #[test]
    fn starts_at_first_entry() {
        let selector = Selector::new(&FOUR);
        assert_eq!(selector.index(), 0);
        assert_eq!(selector.value(), 0);
        assert_eq!(selector.label(), "zero");
    }

    #[test]
    fn cycles_and_wraps() {
        let selector = Selector::new(&FOUR);
        for _ in 0..3 {
            selector.cycle();
        }
        assert_eq!(selector.index(), 3);
        assert_eq!(selector.label(), "three");

        let wrapped = selector.cycle();
        assert_eq!(selector.index(), 0);
        assert_eq!(wrapped, &FOUR[0]);
    }

    #[test]
    fn cycle_returns_new_selection() {
        let selector = Selector::new(&FOUR);
        let selected = selector.cycle();
        assert_eq!(selected.label, "one");
        assert_eq!(selector.current(), selected);
    }

    #[test]
    fn single_entry_table_stays_put() {
        static ONE: [Setting<u8>; 1] = [Setting { value: 7, label: "only" }];
        let selector = Selector::new(&ONE);
        selector.cycle();
        selector.cycle();
        assert_eq!(selector.index(), 0);
        assert_eq!(selector.value(), 7);
    }
}
