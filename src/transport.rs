/// A duplex byte stream to the host (USB CDC-ACM on the device).
pub trait Transport {
    /// Largest write the transport accepts at once.
    const MAX_PACKET_SIZE: usize;

    /// Next received byte, if one is available. Must not block.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write up to `MAX_PACKET_SIZE` bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> usize;
}

/// Write all of `buf`, in packet-sized fragments, retrying until every byte is accepted.
pub fn write_all<T: Transport>(transport: &mut T, buf: &[u8]) {
    for fragment in buf.chunks(T::MAX_PACKET_SIZE) {
        let mut remaining = fragment;
        while !remaining.is_empty() {
            let written = transport.write(remaining).min(remaining.len());
            remaining = &remaining[written..];
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Accepts at most `accept` bytes per write (cycling through the list), recording each write.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub rx: VecDeque<u8>,
        pub writes: Vec<Vec<u8>>,
        pub accept: VecDeque<usize>,
    }

    impl FakeTransport {
        pub fn with_input(input: &[u8]) -> Self {
            Self {
                rx: input.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn written(&self) -> Vec<u8> {
            self.writes.concat()
        }
    }

    impl Transport for FakeTransport {
        const MAX_PACKET_SIZE: usize = 8;

        fn read_byte(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn write(&mut self, buf: &[u8]) -> usize {
            assert!(buf.len() <= Self::MAX_PACKET_SIZE, "oversized write");
            let accepted = match self.accept.pop_front() {
                Some(n) => {
                    self.accept.push_back(n);
                    n.min(buf.len())
                }
                None => buf.len(),
            };
            self.writes.push(buf[..accepted].to_vec());
            accepted
        }
    }

    #[test]
    fn fragments_to_packet_size() {
        let mut transport = FakeTransport::default();
        write_all(&mut transport, b"0123456789abcdefXYZ");

        assert_eq!(
            transport.writes,
            [b"01234567".to_vec(), b"89abcdef".to_vec(), b"XYZ".to_vec()]
        );
    }

    #[test]
    fn retries_partial_writes() {
        let mut transport = FakeTransport {
            accept: [0, 3].into_iter().collect(),
            ..FakeTransport::default()
        };
        write_all(&mut transport, b"0123456789");

        assert_eq!(transport.written(), b"0123456789");
        assert!(transport.writes.iter().all(|w| w.len() <= 3));
    }

    #[test]
    fn empty_buffer_writes_nothing() {
        let mut transport = FakeTransport::default();
        write_all(&mut transport, b"");
        assert!(transport.writes.is_empty());
    }
}
