use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// Encode `image` as PNG and replace the file at `path` with it.
///
/// The bytes go to a temporary file next to `path` first and are renamed over
/// the original only once fully written, so an encode failure leaves the
/// source untouched. The original file's permissions are carried over, and a
/// symlink is written through to its target rather than replaced.
pub fn write_png_in_place(path: &Path, image: &RgbaImage) -> Result<()> {
    let target = if path.is_symlink() {
        fs::canonicalize(path)?
    } else {
        path.to_path_buf()
    };
    let path = target.as_path();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let original_perms = fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    if let Some(perms) = original_perms {
        fs::set_permissions(tmp.path(), perms)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {}x{} PNG to {:?}", image.width(), image.height(), path);
    Ok(())
}
