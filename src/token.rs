/// Capacity of a header token. Generous for any realistic dimension.
pub const TOKEN_CAPACITY: usize = 32;

/// Fixed-capacity byte accumulator for header tokens.
#[derive(Debug, Clone)]
pub struct TokenBuf {
    bytes: [u8; TOKEN_CAPACITY],
    len: usize,
}

/// Returned by [`TokenBuf::push`] when the buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded;

impl Default for TokenBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuf {
    pub fn new() -> Self {
        Self {
            bytes: [0u8; TOKEN_CAPACITY],
            len: 0,
        }
    }

    pub fn push(&mut self, byte: u8) -> Result<(), CapacityExceeded> {
        if self.len == TOKEN_CAPACITY {
            return Err(CapacityExceeded);
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parse the token as an unsigned decimal number.
    ///
    /// Returns `None` if the token is empty, holds a non-digit, or
    /// overflows `u32`.
    pub fn parse_u32(&self) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        self.as_bytes().iter().try_fold(0u32, |acc, &b| {
            if !b.is_ascii_digit() {
                return None;
            }
            acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
        })
    }
}
