use crate::config;

/// Milliseconds since startup, as counted by the window scheduler.
pub type Instant = fugit::Instant<u32, 1, { config::window::TICK_HZ }>;
pub type Duration = fugit::Duration<u32, 1, { config::window::TICK_HZ }>;
