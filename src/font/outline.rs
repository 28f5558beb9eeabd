//! Outline (TrueType/OpenType) text layout using ab_glyph.
//!
//! Glyphs are laid out relative to a `(0, 0)` origin at the top-left of
//! the first line (ascender line). Callers translate by an integer offset,
//! so a box measured at one anchor is the exact translation of the box at
//! any other anchor.

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont, point};

use super::{LINE_SPACING, TAB_WIDTH};
use crate::layout::BoundingBox;

/// Pixel scale for a point size, where the size is the em height in
/// pixels.
pub fn px_scale(font: &FontArc, size: u32) -> PxScale {
    let size = size as f32;
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
        _ => PxScale::from(size),
    }
}

/// Positioned glyphs plus the horizontal advance of the widest line.
struct GlyphRun {
    glyphs: Vec<Glyph>,
    advance: f32,
}

fn layout(font: &FontArc, scale: PxScale, text: &str) -> GlyphRun {
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent();
    let line_advance = (scaled.ascent() - scaled.descent()).ceil() + LINE_SPACING as f32;
    let space = scaled.h_advance(font.glyph_id(' '));

    let mut glyphs = Vec::new();
    let mut widest = 0.0f32;

    for (line_idx, line) in text.split('\n').enumerate() {
        let baseline = ascent + line_idx as f32 * line_advance;
        let mut caret = 0.0f32;
        let mut prev = None;

        for ch in line.chars() {
            if ch == '\t' {
                caret += space * TAB_WIDTH as f32;
                prev = None;
                continue;
            }
            let id = font.glyph_id(ch);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        widest = widest.max(caret);
    }

    GlyphRun {
        glyphs,
        advance: widest,
    }
}

/// Box of `text` at the origin: horizontal extent from the pen advance,
/// vertical extent from the glyph ink.
pub fn extent(font: &FontArc, scale: PxScale, text: &str) -> BoundingBox {
    if text.is_empty() {
        return BoundingBox::default();
    }
    let run = layout(font, scale, text);

    let mut ink: Option<BoundingBox> = None;
    for glyph in run.glyphs {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let b = outlined.px_bounds();
            let glyph_box = BoundingBox::new(
                b.min.x as i32,
                b.min.y as i32,
                b.max.x as i32,
                b.max.y as i32,
            );
            ink = Some(match ink {
                Some(acc) => acc.union(&glyph_box),
                None => glyph_box,
            });
        }
    }

    let advance = run.advance.ceil() as i32;
    match ink {
        Some(ink) => BoundingBox::new(ink.left.min(0), ink.top, ink.right.max(advance), ink.bottom),
        None => BoundingBox::new(0, 0, advance, 0),
    }
}

/// Rasterize `text` relative to the origin with anti-aliased coverage.
pub fn rasterize(font: &FontArc, scale: PxScale, text: &str, mut plot: impl FnMut(i32, i32, f32)) {
    for glyph in layout(font, scale, text).glyphs {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|px, py, coverage| {
                plot(left + px as i32, top + py as i32, coverage.min(1.0));
            });
        }
    }
}
