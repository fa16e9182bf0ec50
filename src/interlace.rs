//! Recombine slice payloads into one row-major raster.
//!
//! Row mode copies whole rows, taking output row `y` from slice `y mod N`.
//! Column mode builds each output row from one `size / N` chunk per slice
//! and places pixel `x` from slice `x mod N`. Streams are only ever read
//! forward and the output is written strictly in order.

use crate::error::{InterlaceError, Result};
use crate::geometry::{Geometry, Orientation};
use crate::header::{write_header, PgmHeader};
use crate::stream::ByteStream;
use log::{debug, warn};
use std::io::{Read, Write};

/// What to do when a slice runs out of pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Abort with `UnexpectedEof`
    #[default]
    Fatal,
    /// Column mode only: substitute this byte for the missing pixels
    Pad(u8),
}

/// Write the combined header and payload to `out`.
///
/// `slices` must be positioned at their first pixel byte, i.e. right after
/// `parse_header`. On error, output already written is left as is.
pub fn interleave<R: Read, W: Write>(
    out: &mut W,
    canonical: &PgmHeader,
    geometry: &Geometry,
    slices: &mut [ByteStream<R>],
    policy: EofPolicy,
) -> Result<()> {
    if slices.is_empty() {
        return Err(InterlaceError::NoSlices);
    }
    if slices.len() != geometry.slices {
        return Err(InterlaceError::GeometryMismatch {
            width: canonical.width,
            height: canonical.height,
            slices: slices.len(),
        });
    }

    write_header(out, &geometry.output_header(canonical))?;

    debug!(
        "interleaving {} slice(s) by {} into {}x{}",
        slices.len(),
        geometry.orientation,
        geometry.size,
        geometry.size
    );

    match geometry.orientation {
        Orientation::PassThrough | Orientation::Rows => interleave_rows(out, geometry, slices),
        Orientation::Columns => interleave_columns(out, geometry, slices, policy),
    }
}

fn interleave_rows<R: Read, W: Write>(
    out: &mut W,
    geometry: &Geometry,
    slices: &mut [ByteStream<R>],
) -> Result<()> {
    let size = geometry.size as usize;
    let starts: Vec<u64> = slices.iter().map(ByteStream::position).collect();
    let mut row = vec![0u8; size];

    for y in 0..size {
        let index = y % slices.len();
        let stream = &mut slices[index];
        if stream.fill(&mut row)? < size {
            return Err(InterlaceError::UnexpectedEof {
                slice: index,
                position: stream.position() - starts[index],
            });
        }
        out.write_all(&row)?;
    }
    Ok(())
}

fn interleave_columns<R: Read, W: Write>(
    out: &mut W,
    geometry: &Geometry,
    slices: &mut [ByteStream<R>],
    policy: EofPolicy,
) -> Result<()> {
    let size = geometry.size as usize;
    let count = slices.len();
    let chunk_len = geometry.chunk_len();
    let starts: Vec<u64> = slices.iter().map(ByteStream::position).collect();

    let mut chunks = vec![vec![0u8; chunk_len]; count];
    let mut exhausted = vec![false; count];
    let mut row = vec![0u8; size];

    for _ in 0..size {
        // Gather this row's pixels from every slice before writing any of them
        for (index, (stream, chunk)) in slices.iter_mut().zip(chunks.iter_mut()).enumerate() {
            let got = if exhausted[index] {
                0
            } else {
                stream.fill(chunk)?
            };
            if got == chunk_len {
                continue;
            }

            let position = stream.position() - starts[index];
            match policy {
                EofPolicy::Fatal => {
                    return Err(InterlaceError::UnexpectedEof {
                        slice: index,
                        position,
                    })
                }
                EofPolicy::Pad(byte) => {
                    if !exhausted[index] {
                        warn!(
                            "slice {} ended at payload byte {}; padding with 0x{:02x}",
                            index, position, byte
                        );
                        exhausted[index] = true;
                    }
                    chunk[got..].fill(byte);
                }
            }
        }

        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = chunks[x % count][x / count];
        }
        out.write_all(&row)?;
    }
    Ok(())
}
