//! LC tank arithmetic.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Above this, the tank is treated as open circuit.
const MAX_HENRIES: f64 = 10.0;

/// Component value in shorthand notation, as printed on capacitors:
/// all digits but the last are the value, the last is a power of ten.
///
/// `223` is 22 * 10^3.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Shorthand {
    pub significand: u32,
    pub exponent: u32,
}

impl Shorthand {
    pub fn value(self) -> f64 {
        f64::from(self.significand) * 10f64.powi(self.exponent as i32)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("`{0}` is not a shorthand value (at least two digits, e.g. 104)")]
pub struct ShorthandError(String);

impl FromStr for Shorthand {
    type Err = ShorthandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u32>() {
            Ok(code) if code >= 10 => Ok(Self {
                significand: code / 10,
                exponent: code % 10,
            }),
            _ => Err(ShorthandError(s.to_owned())),
        }
    }
}

impl fmt::Display for Shorthand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.significand, self.exponent)
    }
}

/// An unknown inductor resonating with a known capacitance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tank {
    /// F, as seen by the inductor
    capacitance: f64,
    /// H, subtracted from every result
    offset: f64,
}

impl Tank {
    /// `capacitance` in F, `offset` in H.
    ///
    /// In a Pierce or Colpitts oscillator, the reference capacitance is split into two
    /// equal capacitors in series, so the inductor sees half of it.
    pub fn new(capacitance: f64, offset: f64, pierce: bool) -> Self {
        Self {
            capacitance: if pierce { capacitance / 2.0 } else { capacitance },
            offset,
        }
    }

    /// Inductance in H which resonates at `hz`.
    ///
    /// No signal reads as zero. A result too large to be an inductor reads as infinite.
    pub fn inductance(&self, hz: f64) -> f64 {
        if hz == 0.0 {
            return 0.0;
        }

        let henries = 1.0 / (4.0 * PI * PI) / (hz * hz) / self.capacitance;
        let henries = if henries > MAX_HENRIES {
            f64::INFINITY
        } else {
            henries
        };

        henries - self.offset
    }
}
