use crate::error::{InterlaceError, Result};
use crate::stream::ByteStream;
use crate::token::{TokenBuf, TOKEN_CAPACITY};
use std::io::{Read, Write};

/// Signature of a binary (raw) 8-bit graymap.
pub const MAGIC: [u8; 2] = *b"P5";

/// Largest maxval representable with one byte per sample.
pub const MAX_SAMPLE: u32 = 255;

/// Parsed PGM header
///
/// Layout: `<magic> <width> <height> <maxval><one whitespace byte>`, fields
/// separated by any run of whitespace and `#` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    pub magic: [u8; 2],
    pub width: u32,
    pub height: u32,
    pub max_value: u32,
}

impl PgmHeader {
    /// Create a P5 header with the given geometry
    pub fn new(width: u32, height: u32, max_value: u32) -> Self {
        Self {
            magic: MAGIC,
            width,
            height,
            max_value,
        }
    }

    /// Magic identifier as text, for diagnostics
    pub fn magic_str(&self) -> String {
        String::from_utf8_lossy(&self.magic).into_owned()
    }

    /// Number of payload bytes following the header
    pub fn payload_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Whitespace as the netpbm formats define it (C `isspace`).
pub fn is_pnm_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Parse a PGM header, leaving the stream at the first pixel byte.
pub fn parse_header<R: Read>(stream: &mut ByteStream<R>) -> Result<PgmHeader> {
    let magic = read_magic(stream)?;
    skip_separators(stream)?;
    let width = read_number(stream, "width")?;
    skip_separators(stream)?;
    let height = read_number(stream, "height")?;
    skip_separators(stream)?;
    let max_value = read_number(stream, "maxval")?;

    // Exactly one whitespace byte ends the header; anything after it is pixel data
    match stream.next_byte()? {
        Some(b) if is_pnm_space(b) => {}
        Some(b) => return Err(InterlaceError::BadSeparator(b)),
        None => return Err(InterlaceError::TruncatedHeader),
    }

    Ok(PgmHeader {
        magic,
        width,
        height,
        max_value,
    })
}

/// Write a header in the one-field-per-line form `parse_header` accepts.
pub fn write_header<W: Write>(writer: &mut W, header: &PgmHeader) -> Result<()> {
    writer.write_all(&header.magic)?;
    write!(
        writer,
        "\n{}\n{}\n{}\n",
        header.width, header.height, header.max_value
    )?;
    Ok(())
}

fn read_magic<R: Read>(stream: &mut ByteStream<R>) -> Result<[u8; 2]> {
    let mut token = TokenBuf::new();
    let mut overflow = false;
    let mut at_eof = true;
    while let Some(b) = stream.next_byte()? {
        at_eof = false;
        if is_pnm_space(b) || b == b'#' {
            stream.unread(b)?;
            break;
        }
        if token.push(b).is_err() {
            overflow = true;
            break;
        }
    }

    if at_eof {
        return Err(InterlaceError::TruncatedHeader);
    }
    if overflow || token.as_bytes() != MAGIC {
        return Err(InterlaceError::BadMagic(
            String::from_utf8_lossy(token.as_bytes()).into_owned(),
        ));
    }
    Ok(MAGIC)
}

/// Consume whitespace and `#` comments (to end of line) between two fields.
fn skip_separators<R: Read>(stream: &mut ByteStream<R>) -> Result<()> {
    while let Some(b) = stream.next_byte()? {
        if b == b'#' {
            while let Some(c) = stream.next_byte()? {
                if c == b'\n' || c == b'\r' {
                    break;
                }
            }
        } else if !is_pnm_space(b) {
            stream.unread(b)?;
            break;
        }
    }
    Ok(())
}

fn read_number<R: Read>(stream: &mut ByteStream<R>, field: &'static str) -> Result<u32> {
    let mut token = TokenBuf::new();
    let mut at_eof = true;
    while let Some(b) = stream.next_byte()? {
        if !b.is_ascii_digit() {
            stream.unread(b)?;
            at_eof = false;
            break;
        }
        token
            .push(b)
            .map_err(|_| InterlaceError::TokenTooLong {
                field,
                capacity: TOKEN_CAPACITY,
            })?;
    }

    if token.is_empty() {
        return Err(if at_eof {
            InterlaceError::TruncatedHeader
        } else {
            InterlaceError::EmptyToken(field)
        });
    }
    token
        .parse_u32()
        .ok_or(InterlaceError::NumberOverflow(field))
}
