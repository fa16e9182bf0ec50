use crate::error::Result;
use crate::geometry::Orientation;
use crate::slices::SliceSet;
use serde::Serialize;
use std::path::Path;

/// Summary of a validated slice set
#[derive(Debug, Clone, Serialize)]
pub struct SliceInfo {
    pub magic: String,
    pub slice_width: u32,
    pub slice_height: u32,
    pub max_value: u32,
    pub slices: usize,
    pub orientation: Orientation,
    /// Side length of the combined image
    pub size: u32,
}

/// Parse and validate every slice header without reading pixel data.
pub fn inspect_slices<P: AsRef<Path>>(inputs: &[P]) -> Result<SliceInfo> {
    let mut slices = SliceSet::open(inputs)?;
    let (header, geometry) = slices.read_headers()?;
    Ok(SliceInfo {
        magic: header.magic_str(),
        slice_width: header.width,
        slice_height: header.height,
        max_value: header.max_value,
        slices: geometry.slices,
        orientation: geometry.orientation,
        size: geometry.size,
    })
}

/// Describe a slice set, as text or as JSON
pub fn show_info<P: AsRef<Path>>(inputs: &[P], json: bool) -> Result<String> {
    let info = inspect_slices(inputs)?;
    if json {
        let mut out = serde_json::to_string_pretty(&info)?;
        out.push('\n');
        return Ok(out);
    }

    let mut output = String::new();
    output.push_str("Slice Set Information\n");
    output.push_str("=====================\n\n");

    for (index, path) in inputs.iter().enumerate() {
        output.push_str(&format!("Slice {}: {}\n", index, path.as_ref().display()));
    }
    output.push('\n');

    output.push_str("Slice Header:\n");
    output.push_str(&format!("  Magic: {}\n", info.magic));
    output.push_str(&format!(
        "  Dimensions: {}x{}\n",
        info.slice_width, info.slice_height
    ));
    output.push_str(&format!("  Maxval: {}\n", info.max_value));
    output.push('\n');

    output.push_str("Combined Image:\n");
    output.push_str(&format!("  Interlace: {}\n", info.orientation));
    output.push_str(&format!("  Size: {}x{}\n", info.size, info.size));
    output.push_str(&format!(
        "  Payload: {} bytes\n",
        info.size as u64 * info.size as u64
    ));

    Ok(output)
}
