//! Fit a background photo to the poster body.
//!
//! The source is center-cropped to the target aspect ratio, then scaled to
//! the exact target size. Nothing is letterboxed.

use image::{DynamicImage, RgbaImage, imageops::FilterType};

/// Crop rectangle `(x, y, width, height)` of a `src` image that has the
/// aspect ratio of `target`, centered.
pub fn center_crop(src: (u32, u32), target: (u32, u32)) -> (u32, u32, u32, u32) {
    let (sw, sh) = (src.0 as u64, src.1 as u64);
    let (tw, th) = (target.0.max(1) as u64, target.1.max(1) as u64);

    if sw * th > tw * sh {
        // Source is wider: trim the sides
        let crop_w = ((sh * tw + th / 2) / th).clamp(1, sw);
        ((sw - crop_w) as u32 / 2, 0, crop_w as u32, sh as u32)
    } else {
        // Source is taller (or equal): trim top and bottom
        let crop_h = ((sw * th + tw / 2) / tw).clamp(1, sh.max(1));
        (0, (sh - crop_h) as u32 / 2, sw as u32, crop_h as u32)
    }
}

/// Center-crop and scale `image` to exactly `target`.
pub fn fit(image: &DynamicImage, target: (u32, u32)) -> RgbaImage {
    let (x, y, w, h) = center_crop((image.width(), image.height()), target);
    image
        .crop_imm(x, y, w, h)
        .resize_exact(target.0, target.1, FilterType::Lanczos3)
        .to_rgba8()
}
