//! # Rendering Module
//!
//! Raster building blocks for poster composition.
//!
//! ## Modules
//!
//! - [`gradient`]: vertical alpha fades between the photo and the solid bands
//! - [`background`]: center-crop a photo to fill the poster body
//! - [`composer`]: sequences everything into a finished poster
//!
//! ## Usage Example
//!
//! ```
//! use postmaker::color::Rgb;
//! use postmaker::render::{alpha_composite, fill_rect, gradient};
//! use image::RgbaImage;
//!
//! let mut canvas = RgbaImage::from_pixel(200, 100, Rgb::WHITE.opaque());
//! let fade = gradient::make_gradient(80.0, (200, 100), Rgb::BLACK);
//! alpha_composite(&mut canvas, &fade, 0, 0);
//! fill_rect(&mut canvas, 0, 0, 200, 10, Rgb::BLACK.opaque());
//! ```

pub mod background;
pub mod composer;
pub mod gradient;

use image::{Rgba, RgbaImage, imageops};

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend `color` over `dst` at the given coverage (0.0..=1.0), scaled by
/// the color's own alpha.
#[inline]
pub fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let a = (coverage.clamp(0.0, 1.0) * color[3] as f32) / 255.0;
    if a <= 0.0 {
        return;
    }
    for c in 0..3 {
        dst[c] = lerp(dst[c] as f32, color[c] as f32, a).round() as u8;
    }
    dst[3] = lerp(dst[3] as f32, 255.0, a).round() as u8;
}

/// Composite `src` over `canvas` with its top-left at `(x, y)`, honoring
/// per-pixel alpha. Parts outside the canvas are clipped.
pub fn alpha_composite(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, src, x, y);
}

/// Copy `src` onto `canvas` at `(x, y)` without blending.
pub fn paste(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    imageops::replace(canvas, src, x, y);
}

/// Fill a `width`×`height` rectangle with a solid color, clipped to the
/// canvas.
pub fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}
