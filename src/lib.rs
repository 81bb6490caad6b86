//! Frequency measurement engine.
//!
//! A narrow hardware counter clocked by the signal under test is extended into a wide count
//! by accumulating its overflows, gated into one-second windows by a 1 kHz tick,
//! and reported as a status line over a byte stream that also carries single-character commands.
//!
//! Hardware is reached only through the [`counter::Counter`], [`transport::Transport`]
//! and [`command::Controls`] traits; the firmware crate provides the STM32F1 implementations.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::let_and_return, clippy::new_without_default)]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::ptr_as_ptr
)]

#[macro_use]
mod log;

pub mod clock_out;
pub mod command;
pub mod config;
pub mod console;
pub mod counter;
pub mod hold;
pub mod input;
pub mod report;
pub mod selector;
pub mod state;
pub mod time;
pub mod transport;
pub mod window;

pub use self::{
    console::Console,
    counter::{Counter, WideCounter},
    state::State,
    window::Scheduler,
};
