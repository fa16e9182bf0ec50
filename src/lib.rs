//! pgm-interlace - reassemble a square graymap from interlaced slices
//!
//! An image of `size`x`size` pixels is cut into N slices, either by rows
//! (slice `i` holds rows `i, i+N, ...`) or by columns (slice `i` holds
//! columns `i, i+N, ...`). Each slice is a complete binary PGM (`P5`) file
//! of its own. This crate validates the slice headers against each other
//! and weaves the pixel data back into the original raster.
//!
//! ## Pipeline
//!
//! ```text
//! open N slices → parse header 0 → validate geometry → parse + agree 1..N → interleave → output
//! ```
//!
//! The orientation is inferred from the slice shape: `width == height * N`
//! means row slices, `height == width * N` means column slices. A single
//! slice must already be square and is copied through.
//!
//! ## Example
//!
//! ```no_run
//! use pgm_interlace::cli::{combine_slices, CombineOptions};
//! use std::path::PathBuf;
//!
//! let options = CombineOptions {
//!     output: Some(PathBuf::from("full.pgm")),
//!     ..Default::default()
//! };
//! combine_slices(&["slice0.pgm", "slice1.pgm"], &options).unwrap();
//! ```

pub mod cli;
pub mod error;
pub mod geometry;
pub mod header;
pub mod interlace;
pub mod slices;
pub mod stream;
pub mod token;

pub use error::{InterlaceError, Result};
pub use geometry::{check_agreement, validate, Geometry, Orientation};
pub use header::{parse_header, write_header, PgmHeader};
pub use interlace::{interleave, EofPolicy};
pub use slices::SliceSet;
pub use stream::ByteStream;
