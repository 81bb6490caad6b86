use crate::err::Error;

/// One status line from the meter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reading {
    pub hz: f64,
    /// The blink indicator: set on every other window.
    pub blink: bool,
}

/// Parse the leading `"<MHz> MHz <blink>"` of a status line.
///
/// The indicator is the first non-blank character after the unit, so a line with
/// the indicator off reads the opening bracket of the next field instead.
pub fn line(line: &str) -> Result<Reading, Error> {
    let err = || Error::Parse {
        line: line.to_owned(),
    };

    let rest = line.trim_start();
    let (mhz, rest) = rest.split_once(char::is_whitespace).ok_or_else(err)?;
    let mhz: f64 = mhz.parse().map_err(|_| err())?;
    let rest = rest.trim_start().strip_prefix("MHz").ok_or_else(err)?;
    let indicator = rest.trim_start().chars().next().ok_or_else(err)?;

    if mhz < 0.0 {
        return Err(Error::NegativeFrequency(mhz));
    }

    Ok(Reading {
        hz: mhz * 1e6,
        blink: indicator == '.',
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line() {
        let reading = line(
            "12.345678 MHz . [clock Out: OFF] [Hold: OFF] [digital Filter: OFF] [Prescaler: OFF]",
        )
        .unwrap();
        assert!((reading.hz - 12_345_678.0).abs() < 1e-3);
        assert!(reading.blink);
    }

    #[test]
    fn indicator_off() {
        let reading = line("0.155762 MHz   [clock Out: HSE] [Hold: ON]").unwrap();
        assert!((reading.hz - 155_762.0).abs() < 1e-3);
        assert!(!reading.blink);
    }

    #[test]
    fn zero() {
        assert_eq!(line("0.000000 MHz . [").unwrap().hz, 0.0);
    }

    #[test]
    fn rejects_garbage() {
        for garbage in ["", "MHz", "abc MHz .", "1.0 kHz .", "1.0 MHz", "1.0 MHz   "] {
            assert!(
                matches!(line(garbage), Err(Error::Parse { .. })),
                "{:?}",
                garbage
            );
        }
    }

    #[test]
    fn rejects_negative() {
        assert!(matches!(
            line("-1.5 MHz ."),
            Err(Error::NegativeFrequency(f)) if f == -1.5
        ));
    }
}
