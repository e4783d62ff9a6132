use std::path::Path;

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::error::Result;

/// Decode any supported image and normalize it to 8-bit RGBA.
///
/// The format is sniffed from the file contents, so a PNG with an unexpected
/// suffix still decodes.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let decoded = reader.decode()?;
    debug!(
        "Decoded {:?}: {}x{} {:?} ({:?})",
        path,
        decoded.width(),
        decoded.height(),
        decoded.color(),
        format
    );
    Ok(decoded.into_rgba8())
}
