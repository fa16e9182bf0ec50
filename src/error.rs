use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterlaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad magic {0:?}: expected \"P5\" (binary 8-bit graymap)")]
    BadMagic(String),

    #[error("Expected a decimal number for {0}")]
    EmptyToken(&'static str),

    #[error("Value for {field} is longer than {capacity} digits")]
    TokenTooLong { field: &'static str, capacity: usize },

    #[error("Value for {0} does not fit in 32 bits")]
    NumberOverflow(&'static str),

    #[error("Header is truncated")]
    TruncatedHeader,

    #[error("Expected whitespace after maxval, found byte 0x{0:02x}")]
    BadSeparator(u8),

    #[error("Image dimensions must be positive (got {width}x{height})")]
    DimensionsNotPositive { width: u32, height: u32 },

    #[error("Maxval must be positive")]
    MaxValueNotPositive,

    #[error("Maxval {0} exceeds 255; only 8-bit samples are supported")]
    MaxValueTooLarge(u32),

    #[error(
        "Slice geometry {width}x{height} cannot form a square image from {slices} slices"
    )]
    GeometryMismatch {
        width: u32,
        height: u32,
        slices: usize,
    },

    #[error("Header of slice {index} does not match slice 0")]
    HeaderMismatch { index: usize },

    #[error("Slice {slice} ended early at payload byte {position}")]
    UnexpectedEof { slice: usize, position: u64 },

    #[error("No slices given")]
    NoSlices,

    #[error("Cannot split: {0}")]
    InvalidSplit(String),
}

pub type Result<T> = std::result::Result<T, InterlaceError>;
