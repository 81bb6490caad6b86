//! Host-side companions to the frequency meter firmware.

#[macro_use]
pub mod defer;

pub mod err;
pub mod inductance;
pub mod keys;
pub mod parse;
pub mod serial;
