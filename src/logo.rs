//! # Logo and QR Placement
//!
//! Places the organizer's logo in the bottom-right corner, optionally with
//! a QR code for the event link to its left:
//!
//! ```text
//! ┌──────────────┬──────────────┐
//! │   QR code    │     logo     │   height = logo height
//! └──────────────┴──────────────┘   width  = 2 × logo width
//! ```
//!
//! The artwork is scaled to the largest size that keeps its aspect ratio
//! and fits in the space the text layout left free: right of the wider of
//! place/date, and below the top of the place block.

use image::{DynamicImage, Rgba, RgbaImage, imageops, imageops::FilterType};
use qrcode::{Color, EcLevel, QrCode};
use tracing::{debug, warn};

use crate::error::PosterError;
use crate::layout::{BoundingBox, LayoutResult};
use crate::render::{alpha_composite, fill_rect, paste};

/// Link value meaning "no QR code".
pub const PLACEHOLDER_LINK: &str = "PlaceholderLink";

/// Quiet zone around the QR code, in modules.
pub const QR_BORDER: u32 = 4;
/// Pixels per module before the final resize.
pub const QR_MODULE_SIZE: u32 = 10;
/// Gap between the logo and the right canvas edge.
pub const LOGO_RIGHT_OFFSET: u32 = 5;
/// Gap between the text column and the logo.
pub const LOGO_TEXT_SPACING: i32 = 10;
/// Fallback box is `width / 5` × `height / 5.4`.
const FALLBACK_WIDTH_DIVISOR: u32 = 5;
const FALLBACK_HEIGHT_DIVISOR: f64 = 5.4;

/// The QR payload for a link, or `None` for empty/placeholder links.
pub fn qr_payload(link: &str) -> Option<&str> {
    let link = link.trim();
    (!link.is_empty() && link != PLACEHOLDER_LINK).then_some(link)
}

/// Encode `data` as a black-on-white QR code scaled to `size` with
/// nearest-neighbor sampling.
pub fn generate_qr(data: &str, size: (u32, u32)) -> Result<RgbaImage, PosterError> {
    let code = QrCode::with_error_correction_level(data, EcLevel::M)
        .map_err(|e| PosterError::QrGeneration(format!("{} ({} bytes)", e, data.len())))?;

    let modules = code.width() as u32;
    let side = (modules + 2 * QR_BORDER) * QR_MODULE_SIZE;
    let mut img = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));

    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] == Color::Dark {
                fill_rect(
                    &mut img,
                    (qx + QR_BORDER) * QR_MODULE_SIZE,
                    (qy + QR_BORDER) * QR_MODULE_SIZE,
                    QR_MODULE_SIZE,
                    QR_MODULE_SIZE,
                    Rgba([0, 0, 0, 255]),
                );
            }
        }
    }

    debug!(modules, side, target = ?size, "generated QR code");
    Ok(imageops::resize(&img, size.0, size.1, FilterType::Nearest))
}

/// Put a QR code of the logo's size to the left of the logo.
pub fn combine_with_qr(logo: &RgbaImage, payload: &str) -> Result<RgbaImage, PosterError> {
    let (w, h) = logo.dimensions();
    let qr = generate_qr(payload, (w, h))?;
    let mut combined = RgbaImage::new(w * 2, h);
    paste(&mut combined, logo, w as i64, 0);
    paste(&mut combined, &qr, 0, 0);
    Ok(combined)
}

/// Largest `(width, height)` with the artwork's aspect ratio that fits in
/// `space`. `None` if nothing fits.
pub fn fit_within(space: (i64, i64), artwork: (u32, u32)) -> Option<(u32, u32)> {
    let (aw, ah) = artwork;
    if aw == 0 || ah == 0 || space.0 <= 0 || space.1 <= 0 {
        return None;
    }
    let inverse_ratio = ah as f64 / aw as f64;
    let mut width = space.0 as f64;
    let height_room = space.1 as f64;
    if height_room / width < inverse_ratio {
        width = (height_room / inverse_ratio).floor();
    }
    let height = (width * inverse_ratio).floor();

    (width >= 1.0 && height >= 1.0).then_some((width as u32, height as u32))
}

/// Size the artwork for this canvas. Without a layout the artwork fits a
/// fixed fraction of the canvas.
pub fn target_size(
    canvas: (u32, u32),
    artwork: (u32, u32),
    layout: Option<&LayoutResult>,
) -> Option<(u32, u32)> {
    let (cw, ch) = (canvas.0 as i64, canvas.1 as i64);
    let space = match layout {
        Some(layout) => {
            let text_right = layout.date.bbox.right.max(layout.place.bbox.right) as i64;
            let text_top = layout.place.bbox.top.min(layout.place.bbox.bottom) as i64;
            (cw - text_right - LOGO_TEXT_SPACING as i64, ch - text_top)
        }
        None => (
            (canvas.0 / FALLBACK_WIDTH_DIVISOR) as i64,
            (canvas.1 as f64 / FALLBACK_HEIGHT_DIVISOR).floor() as i64,
        ),
    };
    let space = (space.0.min(cw - LOGO_RIGHT_OFFSET as i64), space.1.min(ch));
    fit_within(space, artwork)
}

/// Composite the logo (and QR code, if any) in the bottom-right corner.
///
/// Returns the box the artwork occupies, or `None` when the text leaves no
/// room for it.
pub fn place_logo(
    canvas: &mut RgbaImage,
    logo: &DynamicImage,
    qr_payload: Option<&str>,
    layout: Option<&LayoutResult>,
) -> Result<Option<BoundingBox>, PosterError> {
    let logo = logo.to_rgba8();
    if logo.width() == 0 || logo.height() == 0 {
        return Ok(None);
    }

    let (artwork, filter) = match qr_payload {
        Some(payload) => (combine_with_qr(&logo, payload)?, FilterType::Nearest),
        None => (logo, FilterType::Lanczos3),
    };

    let Some((width, height)) = target_size(canvas.dimensions(), artwork.dimensions(), layout)
    else {
        warn!(
            canvas = ?canvas.dimensions(),
            "no room left for the logo, skipping"
        );
        return Ok(None);
    };

    let resized = imageops::resize(&artwork, width, height, filter);
    let x = canvas.width() as i64 - (width + LOGO_RIGHT_OFFSET) as i64;
    let y = canvas.height() as i64 - height as i64;
    alpha_composite(canvas, &resized, x, y);

    debug!(x, y, width, height, qr = qr_payload.is_some(), "placed logo");
    Ok(Some(BoundingBox::new(
        x as i32,
        y as i32,
        x as i32 + width as i32,
        y as i32 + height as i32,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Placement;

    fn placement(bbox: BoundingBox) -> Placement {
        Placement {
            origin: (bbox.left, bbox.top),
            bbox,
        }
    }

    fn layout(place: BoundingBox, date: BoundingBox) -> LayoutResult {
        let empty = placement(BoundingBox::default());
        LayoutResult {
            title: empty,
            description: empty,
            place: placement(place),
            date: placement(date),
            corrected: false,
        }
    }

    #[test]
    fn test_qr_payload_sentinels() {
        assert_eq!(qr_payload(""), None);
        assert_eq!(qr_payload("  "), None);
        assert_eq!(qr_payload(PLACEHOLDER_LINK), None);
        assert_eq!(qr_payload("https://example.com"), Some("https://example.com"));
    }

    #[test]
    fn test_generate_qr_has_quiet_zone_and_is_binary() {
        let qr = generate_qr("https://example.com", (290, 290)).unwrap();
        assert_eq!(qr.dimensions(), (290, 290));
        assert_eq!(*qr.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert!(qr.pixels().all(|p| p.0 == [0, 0, 0, 255] || p.0 == [255, 255, 255, 255]));
        assert!(qr.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_generate_qr_finder_pattern_corner() {
        // version 2 for this payload is 25 modules; native size (25 + 8) * 10
        let qr = generate_qr("https://example.com", (330, 330)).unwrap();
        let dark = Rgba([0, 0, 0, 255]);
        assert_eq!(*qr.get_pixel(45, 45), dark);
        assert_eq!(*qr.get_pixel(35, 35), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_generate_qr_rejects_oversized_payload() {
        let data = "x".repeat(5000);
        let err = generate_qr(&data, (100, 100)).unwrap_err();
        assert!(matches!(err, PosterError::QrGeneration(_)));
    }

    #[test]
    fn test_combine_doubles_width() {
        let logo = RgbaImage::from_pixel(120, 80, Rgba([200, 0, 0, 255]));
        let combined = combine_with_qr(&logo, "https://example.com").unwrap();
        assert_eq!(combined.dimensions(), (240, 80));
        assert_eq!(*combined.get_pixel(239, 79), Rgba([200, 0, 0, 255]));
        assert_eq!(*combined.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_fit_within_width_bound() {
        // wide space, square artwork: height is the limit
        assert_eq!(fit_within((500, 100), (50, 50)), Some((100, 100)));
    }

    #[test]
    fn test_fit_within_height_bound() {
        // tall space, 2:1 artwork: width is the limit
        assert_eq!(fit_within((100, 500), (200, 100)), Some((100, 50)));
    }

    #[test]
    fn test_fit_within_no_room() {
        assert_eq!(fit_within((0, 100), (10, 10)), None);
        assert_eq!(fit_within((100, -3), (10, 10)), None);
        assert_eq!(fit_within((100, 100), (0, 10)), None);
    }

    #[test]
    fn test_target_size_fallback_fraction() {
        // 1200/5 = 240, 675/5.4 = 125 → square logo limited by height
        assert_eq!(target_size((1200, 675), (400, 400), None), Some((125, 125)));
    }

    #[test]
    fn test_target_size_from_layout() {
        let l = layout(BoundingBox::new(55, 597, 319, 621), BoundingBox::new(55, 621, 307, 645));
        // x room: 1200 - 319 - 10 = 871, y room: 675 - 597 = 78
        assert_eq!(target_size((1200, 675), (200, 100), Some(&l)), Some((156, 78)));
    }

    #[test]
    fn test_place_logo_stays_on_canvas() {
        let mut canvas = RgbaImage::from_pixel(1200, 675, Rgba([255, 255, 255, 255]));
        let l = layout(BoundingBox::new(55, 500, 400, 560), BoundingBox::new(55, 560, 380, 600));
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 900, Rgba([0, 0, 255, 255])));
        let placed = place_logo(&mut canvas, &logo, None, Some(&l)).unwrap().unwrap();
        assert!(placed.right <= 1200);
        assert!(placed.bottom <= 675);
        assert_eq!(placed.right, 1200 - LOGO_RIGHT_OFFSET as i32);
        assert_eq!(placed.bottom, 675);
        assert_eq!(*canvas.get_pixel(1190, 670), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_place_logo_skips_when_text_fills_width() {
        let mut canvas = RgbaImage::from_pixel(300, 300, Rgba([255, 255, 255, 255]));
        let l = layout(BoundingBox::new(55, 200, 400, 240), BoundingBox::new(55, 240, 380, 280));
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        assert_eq!(place_logo(&mut canvas, &logo, None, Some(&l)).unwrap(), None);
    }

    #[test]
    fn test_place_logo_with_qr_keeps_modules_crisp() {
        let mut canvas = RgbaImage::from_pixel(1200, 675, Rgba([255, 255, 255, 255]));
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([9, 9, 9, 255])));
        let placed = place_logo(&mut canvas, &logo, Some("https://example.com"), None)
            .unwrap()
            .unwrap();
        // fallback box 240×125, 2:1 artwork → 240×120
        assert_eq!((placed.width(), placed.height()), (240, 120));
        let qr_half = placed.left..placed.left + placed.width() / 2;
        for x in qr_half {
            for y in placed.top..placed.bottom {
                let p = canvas.get_pixel(x as u32, y as u32).0;
                assert!(p == [0, 0, 0, 255] || p == [255, 255, 255, 255], "{:?} at {},{}", p, x, y);
            }
        }
    }
}
