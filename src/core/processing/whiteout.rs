use image::RgbaImage;

use crate::types::Tolerance;

/// True when every color channel is at or above `255 - tolerance`.
#[inline]
pub fn is_background(r: u8, g: u8, b: u8, tolerance: Tolerance) -> bool {
    let threshold = tolerance.threshold();
    r >= threshold && g >= threshold && b >= threshold
}

/// Zero the alpha of background pixels in an interleaved RGBA8 buffer.
///
/// Color channels are never touched, and pixels that fail the test keep their
/// original alpha. Trailing bytes that do not form a whole pixel are ignored.
/// Returns the number of pixels made transparent.
pub fn clear_background_rgba(buf: &mut [u8], tolerance: Tolerance) -> usize {
    let mut cleared = 0;
    for px in buf.chunks_exact_mut(4) {
        if is_background(px[0], px[1], px[2], tolerance) {
            px[3] = 0;
            cleared += 1;
        }
    }
    cleared
}

/// In-place variant over a decoded image.
pub fn clear_background(image: &mut RgbaImage, tolerance: Tolerance) -> usize {
    clear_background_rgba(image, tolerance)
}
