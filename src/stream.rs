use std::io::{self, Read};

/// Byte reader with a single byte of pushback.
///
/// Header tokenizing needs to look one byte past the end of a token
/// without consuming it. `ByteStream` keeps that byte in a one-slot
/// buffer, and its `Read` impl hands it out before touching the inner
/// reader again, so payload reads pick up exactly where the header
/// parser stopped.
#[derive(Debug)]
pub struct ByteStream<R> {
    inner: R,
    pushed: Option<u8>,
    position: u64,
}

impl<R: Read> ByteStream<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushed: None,
            position: 0,
        }
    }

    /// Number of bytes consumed so far, net of any pushed-back byte.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read one byte, or `None` at end of stream.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.pushed.take() {
            self.position += 1;
            return Ok(Some(b));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Push a byte back so the next read returns it.
    ///
    /// Only one byte may be pending at a time.
    pub fn unread(&mut self, byte: u8) -> io::Result<()> {
        if self.pushed.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "pushback slot already occupied",
            ));
        }
        self.pushed = Some(byte);
        self.position = self.position.saturating_sub(1);
        Ok(())
    }

    /// Look at the next byte without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        let next = self.next_byte()?;
        if let Some(b) = next {
            self.unread(b)?;
        }
        Ok(next)
    }

    /// Read until `buf` is full or the stream ends; returns the byte count.
    ///
    /// Unlike `read_exact`, a short read still reports how much arrived,
    /// which is what truncation diagnostics need.
    pub fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Read for ByteStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(b) = self.pushed.take() {
            buf[0] = b;
            self.position += 1;
            return Ok(1);
        }
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}
