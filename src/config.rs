/// Hardware counter configuration
pub mod counter {
    /// Width of the hardware counter (STM32F1 general purpose timers are 16-bit)
    pub const BITS: u32 = 16;

    /// Number of events counted between two overflow notifications
    pub const RANGE: u32 = 1 << BITS;
}

/// Measurement window configuration
pub mod window {
    /// Rate of the tick notification driving the window scheduler
    pub const TICK_HZ: u32 = 1000;

    /// Ticks per window, i.e. a one second gate
    pub const TICKS: u16 = 1000;

    const _: () = assert!(TICKS as u32 == TICK_HZ, "window must be one second long");

    /// Number of windows after startup whose value is discarded.
    ///
    /// The first window starts at an arbitrary point relative to the counter being enabled,
    /// so its count is meaningless.
    pub const WARM_UP: u32 = 1;
}

/// Status line configuration
pub mod report {
    use crate::time::Duration;

    /// Minimum interval between two status lines
    pub const INTERVAL: Duration = Duration::millis(100);

    /// Capacity of the formatted status line.
    ///
    /// The longest possible line (all labels at their longest) is 96 bytes.
    pub const LINE_CAPACITY: usize = 128;
}

/// Command bytes
///
/// Letters are matched case-insensitively.
pub mod command {
    pub const CYCLE_CLOCK_OUTPUT: u8 = b'c';
    pub const TOGGLE_HOLD: u8 = b'h';
    pub const CYCLE_FILTER: u8 = b'f';
    pub const CYCLE_PRESCALER: u8 = b'p';

    /// Sent back when a line ending is received
    pub const ECHO: &[u8] = b"\r\n";
}
