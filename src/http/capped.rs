//! Byte-capped reading.
//!
//! The request line and header block of a request must fit inside a fixed
//! number of bytes; the body is read from the underlying stream and is not
//! subject to the cap. Capping only the header region keeps a hostile
//! client from growing an unbounded header block while leaving body sizes
//! unrestricted.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Marker error carried inside the [`io::Error`] raised when the cap is hit.
#[derive(Debug, thiserror::Error)]
#[error("read cap of {0} bytes exhausted")]
pub struct CapExceeded(pub usize);

/// Returns true if `err` was raised by a [`CappedReader`] hitting its cap.
pub fn is_cap_exceeded(err: &io::Error) -> bool {
    err.get_ref().is_some_and(|inner| inner.is::<CapExceeded>())
}

/// Wraps a stream and fails any read attempted after `cap` bytes have been
/// consumed.
///
/// Reads are clamped so that the total number of consumed bytes never
/// exceeds the cap; a read at or under the cap always succeeds. Only a
/// read attempted once the cap is exhausted fails.
pub struct CappedReader<'a, R> {
    inner: &'a mut R,
    cap: usize,
    consumed: usize,
}

impl<'a, R: AsyncRead + Unpin> CappedReader<'a, R> {
    pub fn new(inner: &'a mut R, cap: usize) -> Self {
        Self {
            inner,
            cap,
            consumed: 0,
        }
    }

    /// Bytes consumed through this reader so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.consumed >= self.cap {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                CapExceeded(self.cap),
            ));
        }
        let allowed = (self.cap - self.consumed).min(buf.len());
        let n = self.inner.read(&mut buf[..allowed]).await?;
        self.consumed += n;
        Ok(n)
    }

    /// Reads a single byte, `None` on end of stream.
    pub async fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.read(&mut byte).await? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
