use std::io;
use std::time::Duration;

/// The byte stream a client talks through.
///
/// Implementations are owned by the caller; the client only borrows one.
pub trait ByteTransport {
    /// Number of received bytes that can be read without blocking.
    fn bytes_available(&mut self) -> io::Result<usize>;

    /// Read one byte, waiting at most `timeout`.
    ///
    /// Returns `Ok(None)` when nothing arrived in time. A zero timeout polls
    /// without blocking.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;

    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Drop everything already received. Returns the number of bytes dropped
    /// when the transport can tell.
    fn discard_input(&mut self) -> io::Result<usize> {
        let mut dropped = 0;
        while self.bytes_available()? > 0 {
            if self.read_byte(Duration::ZERO)?.is_none() {
                break;
            }
            dropped += 1;
        }
        Ok(dropped)
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    fn bytes_available(&mut self) -> io::Result<usize> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).read_byte(timeout)
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write_all(data)
    }

    fn discard_input(&mut self) -> io::Result<usize> {
        (**self).discard_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Queue(VecDeque<u8>);

    impl ByteTransport for Queue {
        fn bytes_available(&mut self) -> io::Result<usize> {
            Ok(self.0.len())
        }

        fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
            Ok(self.0.pop_front())
        }

        fn write_all(&mut self, _data: &[u8]) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn default_discard_drains_everything() {
        let mut q = Queue(b"stale\nbytes".iter().copied().collect());
        assert_eq!(q.discard_input().unwrap(), 11);
        assert_eq!(q.bytes_available().unwrap(), 0);
        assert_eq!(q.discard_input().unwrap(), 0);
    }

    #[test]
    fn mutable_reference_forwards() {
        fn drain<T: ByteTransport>(mut t: T) -> usize {
            t.discard_input().unwrap()
        }

        let mut q = Queue(VecDeque::from(vec![b'x', b'y']));
        assert_eq!(drain(&mut q), 2);
        assert_eq!(q.read_byte(Duration::ZERO).unwrap(), None);
    }
}
