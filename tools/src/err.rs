use std::fmt::{self, Debug, Display};
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open serial port {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot configure serial port: {0}")]
    Configure(#[from] nix::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot parse frequency from line `{line}`")]
    Parse { line: String },
    #[error("invalid frequency `{0}`")]
    NegativeFrequency(f64),
    #[error("input must be piped into stdin")]
    StdinIsTerminal,
    #[error("stdin must be a terminal")]
    StdinNotTerminal,
}

/// Returning this from `main` prints the error's `Display` output instead of its `Debug` output.
pub struct DebugFromDisplay<E>(E);

impl<E> From<E> for DebugFromDisplay<E> {
    fn from(e: E) -> Self {
        Self(e)
    }
}

impl<E: Display> Debug for DebugFromDisplay<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
