use crate::error::Result;
use crate::geometry::Geometry;
use crate::interlace::EofPolicy;
use crate::slices::SliceSet;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Options for the combine command
#[derive(Debug, Clone, Default)]
pub struct CombineOptions {
    /// Destination file; stdout when `None`
    pub output: Option<PathBuf>,
    pub eof_policy: EofPolicy,
}

/// Reassemble the slices at `inputs` (in slice order) into one image.
///
/// A file destination is only created once the whole image has been
/// written; on failure nothing is left at `output`.
pub fn combine_slices<P: AsRef<Path>>(inputs: &[P], options: &CombineOptions) -> Result<Geometry> {
    let mut slices = SliceSet::open(inputs)?;

    match &options.output {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let mut writer = BufWriter::new(staging_file(dir, path)?);
            let geometry = slices.combine(&mut writer, options.eof_policy)?;
            let staged = writer.into_inner().map_err(|e| e.into_error())?;
            staged.persist(path).map_err(|e| e.error)?;
            Ok(geometry)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let geometry = slices.combine(&mut writer, options.eof_policy)?;
            writer.flush()?;
            Ok(geometry)
        }
    }
}

/// Temp file beside `target` carrying the mode `target` will end up with:
/// the existing file's mode, or 0o666 less the umask for a new file.
fn staging_file(dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let staged = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(target) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    Ok(staged)
}
