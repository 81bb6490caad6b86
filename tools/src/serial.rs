//! The meter's USB serial port, as seen from the host.

use crate::err::Error;
use nix::libc;
use nix::sys::termios::{self, BaudRate, FlushArg, SetArg, SpecialCharacterIndices};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Bytes, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

nix::ioctl_none_bad!(set_exclusive, libc::TIOCEXCL);

/// How reads wait for data.
#[derive(Copy, Clone, Debug)]
pub enum ReadMode {
    /// Block until at least one byte arrives.
    Blocking,
    /// Give up after 100 ms without data, returning nothing.
    Timeout,
}

/// Open a serial device for exclusive raw access.
///
/// The baud rate is irrelevant for USB CDC-ACM, but some drivers insist on one.
pub fn open(path: &Path, mode: ReadMode) -> Result<File, Error> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NOCTTY)
        .open(path)
        .map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;
    let fd = file.as_raw_fd();

    unsafe {
        // SAFETY: `fd` is open for as long as `file` lives
        set_exclusive(fd)?;
    }

    let mut tio = termios::tcgetattr(fd)?;
    termios::cfmakeraw(&mut tio);
    termios::cfsetspeed(&mut tio, BaudRate::B115200)?;
    let (min, time) = match mode {
        ReadMode::Blocking => (1, 0),
        ReadMode::Timeout => (0, 1),
    };
    tio.control_chars[SpecialCharacterIndices::VMIN as usize] = min;
    tio.control_chars[SpecialCharacterIndices::VTIME as usize] = time;
    termios::tcsetattr(fd, SetArg::TCSANOW, &tio)?;

    // drop anything received before we were listening
    termios::tcflush(fd, FlushArg::TCIFLUSH)?;

    Ok(file)
}

/// Splits a byte stream into lines ending in `\r` or `\n`.
///
/// The first line is discarded, since reading may have started partway through it.
/// Empty lines (e.g. between a `\r\n` pair) are skipped.
pub struct Lines<R> {
    bytes: Bytes<BufReader<R>>,
    synced: bool,
}

impl<R: Read> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            synced: false,
        }
    }

    fn is_end(byte: u8) -> bool {
        byte == b'\r' || byte == b'\n'
    }
}

impl<R: Read> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.synced {
            loop {
                match self.bytes.next()? {
                    Ok(b) if Self::is_end(b) => break,
                    Ok(_) => {}
                    Err(e) => return Some(Err(e)),
                }
            }
            self.synced = true;
        }

        let mut line = Vec::new();
        loop {
            match self.bytes.next() {
                Some(Ok(b)) if Self::is_end(b) => {
                    if !line.is_empty() {
                        break;
                    }
                }
                Some(Ok(b)) => line.push(b),
                Some(Err(e)) => return Some(Err(e)),
                None if line.is_empty() => return None,
                None => break,
            }
        }
        Some(Ok(String::from_utf8_lossy(&line).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[u8]) -> Vec<String> {
        Lines::new(input).map(Result::unwrap).collect()
    }

    #[test]
    fn skips_partial_first_line() {
        assert_eq!(lines(b"MHz . [Hold\rone\rtwo\r"), ["one", "two"]);
    }

    #[test]
    fn any_line_ending() {
        assert_eq!(lines(b"\rone\r\ntwo\n\nthree\r"), ["one", "two", "three"]);
    }

    #[test]
    fn unterminated_last_line() {
        assert_eq!(lines(b"\rone\rtwo"), ["one", "two"]);
    }

    #[test]
    fn nothing_without_a_line_ending() {
        assert!(lines(b"no line ending").is_empty());
        assert!(lines(b"").is_empty());
    }
}
