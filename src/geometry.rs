use crate::error::{InterlaceError, Result};
use crate::header::{PgmHeader, MAX_SAMPLE};
use serde::Serialize;

/// How the slices divide the square image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Single slice, already the full image
    PassThrough,
    /// Slice `i` holds rows `i, i+N, i+2N, ...`
    Rows,
    /// Slice `i` holds columns `i, i+N, i+2N, ...`
    Columns,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass-through"),
            Self::Rows => write!(f, "rows"),
            Self::Columns => write!(f, "columns"),
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = InterlaceError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rows" | "row" => Ok(Self::Rows),
            "columns" | "column" | "cols" => Ok(Self::Columns),
            _ => Err(InterlaceError::InvalidSplit(format!(
                "unknown orientation: {}",
                s
            ))),
        }
    }
}

/// Shape of the reconstructed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Side length of the square output
    pub size: u32,
    /// Number of slices
    pub slices: usize,
    pub orientation: Orientation,
}

impl Geometry {
    /// Pixels each slice contributes to one output row
    pub fn chunk_len(&self) -> usize {
        match self.orientation {
            Orientation::Columns => self.size as usize / self.slices,
            Orientation::PassThrough | Orientation::Rows => self.size as usize,
        }
    }

    /// Header of the combined image
    pub fn output_header(&self, canonical: &PgmHeader) -> PgmHeader {
        PgmHeader {
            magic: canonical.magic,
            width: self.size,
            height: self.size,
            max_value: canonical.max_value,
        }
    }
}

/// Check a slice header on its own and derive the output geometry for `slices` slices.
pub fn validate(header: &PgmHeader, slices: usize) -> Result<Geometry> {
    let PgmHeader {
        width,
        height,
        max_value,
        ..
    } = *header;

    if width == 0 || height == 0 {
        return Err(InterlaceError::DimensionsNotPositive { width, height });
    }
    if max_value == 0 {
        return Err(InterlaceError::MaxValueNotPositive);
    }
    if max_value > MAX_SAMPLE {
        return Err(InterlaceError::MaxValueTooLarge(max_value));
    }
    if slices == 0 {
        return Err(InterlaceError::NoSlices);
    }

    let mismatch = || InterlaceError::GeometryMismatch {
        width,
        height,
        slices,
    };
    let n = u64::try_from(slices).map_err(|_| mismatch())?;
    let (w, h) = (u64::from(width), u64::from(height));

    let orientation = if slices == 1 {
        if w != h {
            return Err(mismatch());
        }
        Orientation::PassThrough
    } else if h * n == w {
        Orientation::Rows
    } else if w * n == h {
        Orientation::Columns
    } else {
        return Err(mismatch());
    };

    let size = width.max(height);
    Ok(Geometry {
        size,
        slices,
        orientation,
    })
}

/// Require `other` (slice `index`) to match the canonical header exactly.
pub fn check_agreement(canonical: &PgmHeader, other: &PgmHeader, index: usize) -> Result<()> {
    if canonical != other {
        return Err(InterlaceError::HeaderMismatch { index });
    }
    Ok(())
}
