//! Fixed-size bitmap fonts in PSF2 format.
//!
//! The built-in fallback is Spleen 12×24. PSF2 files loaded from disk go
//! through the same Spleen parser, so any PSF2 font works as a bitmap
//! fallback for a font reference that is not an outline font.

use spleen_font::{FONT_12X24, PSF2Font};
use std::borrow::Cow;
use std::fmt;

use super::{LINE_SPACING, TAB_WIDTH};
use crate::layout::BoundingBox;

const PSF2_MAGIC: [u8; 4] = [0x72, 0xb5, 0x4a, 0x86];
const PSF2_HEIGHT_OFFSET: usize = 24;
const PSF2_WIDTH_OFFSET: usize = 28;

/// A parsed PSF2 font with a fixed cell size.
pub struct BitmapFont {
    name: String,
    data: Cow<'static, [u8]>,
    cell_width: u32,
    cell_height: u32,
}

impl fmt::Debug for BitmapFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitmapFont")
            .field("name", &self.name)
            .field("cell_width", &self.cell_width)
            .field("cell_height", &self.cell_height)
            .finish()
    }
}

impl BitmapFont {
    /// The built-in Spleen 12×24 font.
    pub fn builtin() -> Option<Self> {
        let data: &'static [u8] = FONT_12X24;
        Self::parse("spleen-12x24", Cow::Borrowed(data))
    }

    /// Parse PSF2 bytes. Returns `None` if the data is not a PSF2 font.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        Self::parse(name.into(), Cow::Owned(bytes))
    }

    fn parse(name: impl Into<String>, data: Cow<'static, [u8]>) -> Option<Self> {
        if !data.starts_with(&PSF2_MAGIC) {
            return None;
        }
        let cell_height = header_u32(&data, PSF2_HEIGHT_OFFSET)?;
        let cell_width = header_u32(&data, PSF2_WIDTH_OFFSET)?;
        if cell_width == 0 || cell_height == 0 {
            return None;
        }
        // Make sure the glyph parser accepts it too
        PSF2Font::new(&data[..]).ok()?;

        Some(Self {
            name: name.into(),
            data,
            cell_width,
            cell_height,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    fn line_advance(&self) -> i32 {
        (self.cell_height + LINE_SPACING) as i32
    }

    /// Cells occupied by one line (tabs expand to spaces).
    fn line_cells(line: &str) -> i32 {
        line.chars()
            .map(|ch| if ch == '\t' { TAB_WIDTH } else { 1 })
            .sum::<u32>() as i32
    }

    /// Box of `text` drawn with its top-left corner at the origin.
    pub fn extent(&self, text: &str) -> BoundingBox {
        if text.is_empty() {
            return BoundingBox::default();
        }
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines.iter().map(|l| Self::line_cells(l)).max().unwrap_or(0);
        let count = lines.len() as i32;

        BoundingBox::new(
            0,
            0,
            widest * self.cell_width as i32,
            count * self.cell_height as i32 + (count - 1) * LINE_SPACING as i32,
        )
    }

    /// Rasterize `text` relative to the origin. `plot` receives
    /// `(x, y, coverage)` for every lit pixel.
    pub fn rasterize(&self, text: &str, mut plot: impl FnMut(i32, i32, f32)) {
        let Ok(mut font) = PSF2Font::new(&self.data[..]) else {
            return;
        };
        let cw = self.cell_width as i32;
        let ch_h = self.cell_height as i32;
        let mut utf8 = [0u8; 4];

        for (line_idx, line) in text.split('\n').enumerate() {
            let top = line_idx as i32 * self.line_advance();
            let mut cell = 0i32;

            for ch in line.chars() {
                match ch {
                    '\t' => cell += TAB_WIDTH as i32,
                    ' ' => cell += 1,
                    _ => {
                        let left = cell * cw;
                        let encoded = ch.encode_utf8(&mut utf8);
                        if let Some(glyph) = font.glyph_for_utf8(encoded.as_bytes()) {
                            for (row_y, row) in glyph.enumerate() {
                                for (col_x, on) in row.enumerate() {
                                    if on && (col_x as i32) < cw && (row_y as i32) < ch_h {
                                        plot(left + col_x as i32, top + row_y as i32, 1.0);
                                    }
                                }
                            }
                        } else {
                            // Unknown character: hollow box
                            for x in 0..cw {
                                plot(left + x, top, 1.0);
                                plot(left + x, top + ch_h - 1, 1.0);
                            }
                            for y in 0..ch_h {
                                plot(left, top + y, 1.0);
                                plot(left + cw - 1, top + y, 1.0);
                            }
                        }
                        cell += 1;
                    }
                }
            }
        }
    }
}

fn header_u32(data: &[u8], offset: usize) -> Option<u32> {
    let b = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}
