use core::sync::atomic::{AtomicBool, Ordering};

/// Freezes the reported frequency, without pausing the measurement.
///
/// Toggled from the foreground, read by the window scheduler at each boundary.
pub struct Hold {
    held: AtomicBool,
}

impl Hold {
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }

    /// Flip the hold state, returning the new state.
    ///
    /// Takes effect at the next window boundary.
    pub fn toggle(&self) -> bool {
        let held = !self.is_held();
        self.held.store(held, Ordering::Relaxed);
        held
    }

    pub fn label(&self) -> &'static str {
        if self.is_held() {
            "ON"
        } else {
            "OFF"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles() {
        let hold = Hold::new();
        assert!(!hold.is_held());
        assert_eq!(hold.label(), "OFF");

        assert!(hold.toggle());
        assert!(hold.is_held());
        assert_eq!(hold.label(), "ON");

        assert!(!hold.toggle());
        assert_eq!(hold.label(), "OFF");
    }
}
