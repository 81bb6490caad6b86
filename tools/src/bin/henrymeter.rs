//! Reads frequencies from the meter and shows the inductance of an LC tank resonating at them.

use clap::Parser;
use freqmeter_tools::err::{DebugFromDisplay, Error};
use freqmeter_tools::inductance::{Shorthand, Tank};
use freqmeter_tools::parse;
use freqmeter_tools::serial::{self, Lines, ReadMode};
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Measure inductance with the frequency meter and a reference capacitor
#[derive(Parser)]
#[command(
    after_help = "Example: henrymeter -d /dev/ttyACM1 -c 224 -p -o 104\n\
                  (220nF reference, 100uH offset, Pierce/Colpitts oscillator, on ttyACM1)"
)]
struct Args {
    /// Serial device of the meter, or `-` to read from stdin
    #[arg(short, long, default_value = "/dev/ttyACM0")]
    device: PathBuf,

    /// Reference capacitance in shorthand picofarads (e.g. 104 = 100nF)
    #[arg(short, long, default_value = "223")]
    capacitance: Shorthand,

    /// Inductance offset in shorthand nanohenries (e.g. 105 = 1mH)
    #[arg(short, long)]
    offset: Option<Shorthand>,

    /// Pierce/Colpitts oscillator: the tank sees half the reference capacitance
    #[arg(short, long)]
    pierce: bool,
}

fn main() -> Result<(), DebugFromDisplay<Error>> {
    Ok(run(Args::parse())?)
}

fn run(args: Args) -> Result<(), Error> {
    let capacitance = args.capacitance.value() / 1e12;
    let offset = args.offset.map_or(0.0, |o| o.value() / 1e9);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    writeln!(
        stdout,
        "Device: {}\nCapacitance: {:.3} nF\nPierce/Colpitts: {}\nOffset: {:.3} uH\n",
        args.device.display(),
        capacitance * 1e9,
        if args.pierce { "yes" } else { "no" },
        offset * 1e6,
    )?;

    let tank = Tank::new(capacitance, offset, args.pierce);

    let input: Box<dyn Read> = if args.device.as_os_str() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(Error::StdinIsTerminal);
        }
        Box::new(io::stdin())
    } else {
        Box::new(serial::open(&args.device, ReadMode::Blocking)?)
    };

    for line in Lines::new(input) {
        let line = line?;
        let reading = parse::line(&line)?;
        let henries = tank.inductance(reading.hz);

        write!(
            stdout,
            "{:15.3} uH {} ({:9.0} Hz)\r",
            henries * 1e6,
            if reading.blink { '.' } else { ' ' },
            reading.hz,
        )?;
        // no line feed, so nothing else flushes
        stdout.flush()?;
    }

    Ok(())
}
