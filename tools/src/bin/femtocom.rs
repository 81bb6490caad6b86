//! Minimal terminal for the meter: shows its output, and sends it single key presses.

use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use freqmeter_tools::defer;
use freqmeter_tools::err::{DebugFromDisplay, Error};
use freqmeter_tools::keys;
use freqmeter_tools::serial::{self, ReadMode};
use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::exit;
use std::thread;
use std::time::Duration;

/// Show everything the meter sends, and send it every key pressed
#[derive(Parser)]
#[command(after_help = "Press Ctrl-C to exit.")]
struct Args {
    /// Serial device of the meter (e.g. /dev/ttyACM0)
    tty: PathBuf,
}

fn main() -> Result<(), DebugFromDisplay<Error>> {
    Ok(run(Args::parse())?)
}

fn run(args: Args) -> Result<(), Error> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(Error::StdinNotTerminal);
    }

    let mut device = serial::open(&args.tty, ReadMode::Timeout)?;
    let keyboard = device.try_clone()?;

    enable_raw_mode()?;
    defer! { let _ = disable_raw_mode(); }

    // forward key presses on a background thread, exiting on Ctrl-C
    thread::spawn(move || {
        let status = {
            defer! { let _ = disable_raw_mode(); }

            match forward_keys(keyboard) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Failed to forward input: {}", e);
                    1
                }
            }
        };

        println!();
        exit(status);
    });

    copy_output(&mut device)
}

/// Returns when Ctrl-C is pressed.
fn forward_keys(mut device: File) -> Result<(), io::Error> {
    loop {
        if event::poll(Duration::from_secs(365 * 86400))? {
            if let Event::Key(key) = event::read()? {
                if keys::is_interrupt(&key) {
                    return Ok(());
                }
                if let Some(byte) = keys::to_byte(&key) {
                    device.write_all(&[byte])?;
                }
            }
        }
    }
}

fn copy_output(device: &mut File) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let mut buf = [0; 512];
    loop {
        let len = match device.read(&mut buf) {
            // read timed out
            Ok(0) => continue,
            Ok(len) => len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        stdout.write_all(&buf[..len])?;
        stdout.flush()?;
    }
}
