//! Vertical alpha gradients.
//!
//! Row `i` of a gradient gets alpha `round(255 * i / length)`, clamped to
//! 255. `length` is the fade distance and may be shorter than the image,
//! in which case every row past `length` is fully opaque.

use image::{RgbaImage, imageops};

use crate::color::Rgb;

/// Alpha for row `row` of a fade of `length` pixels.
#[inline]
pub fn alpha_at(row: u32, length: f32) -> u8 {
    if length <= 0.0 {
        return 255;
    }
    (255.0 * row as f32 / length).round().clamp(0.0, 255.0) as u8
}

/// A `size` image of `color` fading from transparent (top row) to opaque.
pub fn make_gradient(length: f32, size: (u32, u32), color: Rgb) -> RgbaImage {
    let (width, height) = size;
    let mut gradient = RgbaImage::new(width, height);
    for (row, pixels) in gradient.enumerate_rows_mut() {
        let rgba = color.with_alpha(alpha_at(row, length));
        for (_, _, px) in pixels {
            *px = rgba;
        }
    }
    gradient
}

/// The same gradient turned upside down: opaque at the top row.
pub fn make_gradient_flipped(length: f32, size: (u32, u32), color: Rgb) -> RgbaImage {
    imageops::rotate180(&make_gradient(length, size, color))
}
