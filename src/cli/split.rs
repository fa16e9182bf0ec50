use crate::error::{InterlaceError, Result};
use crate::geometry::{validate, Orientation};
use crate::header::{parse_header, write_header, PgmHeader};
use crate::stream::ByteStream;
use log::info;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Options for the split command
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Number of slices to produce
    pub slices: usize,
    pub orientation: Orientation,
    /// Output prefix; slices are written to `<prefix>.<index>.pgm`
    pub prefix: Option<PathBuf>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            slices: 2,
            orientation: Orientation::Rows,
            prefix: None,
        }
    }
}

/// Split a square image into interlaced slices that `combine` reassembles.
///
/// Returns the paths written, in slice order.
pub fn split_image(input: &Path, options: &SplitOptions) -> Result<Vec<PathBuf>> {
    let file = File::open(input).map_err(|source| InterlaceError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let mut stream = ByteStream::new(BufReader::new(file));
    let header = parse_header(&mut stream)?;
    let count = options.slices;

    if header.width != header.height {
        return Err(InterlaceError::InvalidSplit(format!(
            "image is {}x{}, not square",
            header.width, header.height
        )));
    }
    if count == 0 || header.width as usize % count != 0 {
        return Err(InterlaceError::InvalidSplit(format!(
            "size {} is not divisible into {} slices",
            header.width, count
        )));
    }
    // Same field checks combine applies to slice headers
    validate(&header, 1)?;

    let mut payload = vec![0u8; header.payload_len()];
    let got = stream.fill(&mut payload)?;
    if got < payload.len() {
        return Err(InterlaceError::UnexpectedEof {
            slice: 0,
            position: got as u64,
        });
    }

    let orientation = if count == 1 {
        Orientation::PassThrough
    } else {
        options.orientation
    };
    let size = header.width;
    let parts = split_payload(&payload, size as usize, count, orientation);
    let slice_header = slice_header(&header, count as u32, orientation);

    let prefix = match &options.prefix {
        Some(prefix) => prefix.clone(),
        None => input.with_extension(""),
    };

    let mut written = Vec::with_capacity(count);
    for (index, part) in parts.iter().enumerate() {
        let path = slice_path(&prefix, index);
        let mut writer = BufWriter::new(File::create(&path)?);
        write_header(&mut writer, &slice_header)?;
        writer.write_all(part)?;
        writer.flush()?;
        written.push(path);
    }

    info!(
        "Split {}x{} image into {} slices by {}",
        size, size, count, orientation
    );
    Ok(written)
}

/// Distribute a `size`x`size` payload over `count` slices.
pub fn split_payload(
    payload: &[u8],
    size: usize,
    count: usize,
    orientation: Orientation,
) -> Vec<Vec<u8>> {
    let mut parts = vec![Vec::with_capacity(payload.len() / count.max(1)); count];
    for (y, row) in payload.chunks(size).enumerate() {
        match orientation {
            Orientation::PassThrough => parts[0].extend_from_slice(row),
            Orientation::Rows => parts[y % count].extend_from_slice(row),
            Orientation::Columns => {
                for (x, &pixel) in row.iter().enumerate() {
                    parts[x % count].push(pixel);
                }
            }
        }
    }
    parts
}

fn slice_header(full: &PgmHeader, count: u32, orientation: Orientation) -> PgmHeader {
    let size = full.width;
    match orientation {
        Orientation::PassThrough => *full,
        Orientation::Rows => PgmHeader {
            height: size / count,
            ..*full
        },
        Orientation::Columns => PgmHeader {
            width: size / count,
            ..*full
        },
    }
}

fn slice_path(prefix: &Path, index: usize) -> PathBuf {
    let mut os: OsString = prefix.as_os_str().to_os_string();
    os.push(format!(".{}.pgm", index));
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::combine::{combine_slices, CombineOptions};
    use tempfile::tempdir;

    fn gradient(size: usize) -> Vec<u8> {
        (0..size * size).map(|i| (i % 251) as u8).collect()
    }

    fn write_image(path: &Path, size: u32, payload: &[u8]) {
        let mut bytes = Vec::new();
        write_header(&mut bytes, &PgmHeader::new(size, size, 255)).unwrap();
        bytes.extend_from_slice(payload);
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_split_payload_rows() {
        let parts = split_payload(b"AAAABBBBCCCCDDDD", 4, 2, Orientation::Rows);
        assert_eq!(parts, vec![b"AAAACCCC".to_vec(), b"BBBBDDDD".to_vec()]);
    }

    #[test]
    fn test_split_payload_columns() {
        let parts = split_payload(b"ABCDabcdEFGHefgh", 4, 2, Orientation::Columns);
        assert_eq!(parts, vec![b"ACacEGeg".to_vec(), b"BDbdFHfh".to_vec()]);
    }

    #[test]
    fn test_split_then_combine_restores_image() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("image.pgm");
        let payload = gradient(12);
        write_image(&input, 12, &payload);

        for orientation in [Orientation::Rows, Orientation::Columns] {
            for count in [1, 2, 3, 4, 6] {
                let prefix = dir.path().join(format!("{}-{}", orientation, count));
                let options = SplitOptions {
                    slices: count,
                    orientation,
                    prefix: Some(prefix),
                };
                let paths = split_image(&input, &options).unwrap();
                assert_eq!(paths.len(), count);

                let output = dir.path().join(format!("{}-{}.full.pgm", orientation, count));
                let combine = CombineOptions {
                    output: Some(output.clone()),
                    ..Default::default()
                };
                combine_slices(&paths, &combine).unwrap();
                assert_eq!(std::fs::read(&output).unwrap(), std::fs::read(&input).unwrap());
            }
        }
    }

    #[test]
    fn test_default_prefix_and_names() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.pgm");
        write_image(&input, 2, b"abcd");

        let paths = split_image(&input, &SplitOptions::default()).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("photo.0.pgm"), dir.path().join("photo.1.pgm")]
        );
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"P5\n2\n1\n255\nab");
        assert_eq!(std::fs::read(&paths[1]).unwrap(), b"P5\n2\n1\n255\ncd");
    }

    #[test]
    fn test_rejects_unsplittable_images() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("odd.pgm");
        write_image(&input, 5, &gradient(5));
        let options = SplitOptions {
            slices: 2,
            ..Default::default()
        };
        assert!(matches!(
            split_image(&input, &options),
            Err(InterlaceError::InvalidSplit(_))
        ));

        let wide = dir.path().join("wide.pgm");
        std::fs::write(&wide, b"P5 4 2 255\nAAAABBBB").unwrap();
        assert!(matches!(
            split_image(&wide, &SplitOptions::default()),
            Err(InterlaceError::InvalidSplit(_))
        ));
    }

    #[test]
    fn test_rejects_short_payload() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("short.pgm");
        write_image(&input, 4, b"0123456789");
        assert!(matches!(
            split_image(&input, &SplitOptions::default()),
            Err(InterlaceError::UnexpectedEof {
                slice: 0,
                position: 10
            })
        ));
    }
}
