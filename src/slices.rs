use crate::error::{InterlaceError, Result};
use crate::geometry::{check_agreement, validate, Geometry};
use crate::header::{parse_header, PgmHeader};
use crate::interlace::{interleave, EofPolicy};
use crate::stream::ByteStream;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Ordered set of slice streams, owned for the duration of one combine
#[derive(Debug)]
pub struct SliceSet<R> {
    streams: Vec<ByteStream<R>>,
}

impl SliceSet<BufReader<File>> {
    /// Open every slice, or none of them.
    ///
    /// If any open fails, the files opened so far are closed (dropped)
    /// before the error is returned.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        if paths.is_empty() {
            return Err(InterlaceError::NoSlices);
        }
        let mut streams = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let file = File::open(path).map_err(|source| InterlaceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            streams.push(ByteStream::new(BufReader::new(file)));
        }
        Ok(Self { streams })
    }
}

impl<R: Read> SliceSet<R> {
    pub fn from_readers<I: IntoIterator<Item = R>>(readers: I) -> Result<Self> {
        let streams: Vec<_> = readers.into_iter().map(ByteStream::new).collect();
        if streams.is_empty() {
            return Err(InterlaceError::NoSlices);
        }
        Ok(Self { streams })
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Parse every header and check it against slice 0.
    ///
    /// Slice 0 establishes the canonical header and geometry; every other
    /// slice must carry an identical header. Leaves each stream at its
    /// first pixel byte.
    pub fn read_headers(&mut self) -> Result<(PgmHeader, Geometry)> {
        let count = self.streams.len();
        let first = self.streams.first_mut().ok_or(InterlaceError::NoSlices)?;
        let canonical = parse_header(first)?;
        let geometry = validate(&canonical, count)?;

        for (index, stream) in self.streams.iter_mut().enumerate().skip(1) {
            let header = parse_header(stream)?;
            check_agreement(&canonical, &header, index)?;
            debug!("slice {} header matches slice 0", index);
        }

        Ok((canonical, geometry))
    }

    /// Validate all headers, then write the combined image to `out`.
    pub fn combine<W: Write>(&mut self, out: &mut W, policy: EofPolicy) -> Result<Geometry> {
        let (canonical, geometry) = self.read_headers()?;
        info!(
            "Full image size will be {}x{}, using {} slices",
            geometry.size, geometry.size, geometry.slices
        );
        interleave(out, &canonical, &geometry, &mut self.streams, policy)?;
        Ok(geometry)
    }
}
