//! # Text Layout
//!
//! Places the four event text blocks on a canvas.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │▓▓▓▓▓▓▓▓ top band ▓▓▓▓▓▓▓▓▓▓▓▓│  vertical padding
//! │   TITLE                      │  anchor: pad_v + title_size
//! │   description                │  anchor: title_y + title_h + desc_size + 15
//! │                              │
//! │   place                      │  anchor: height - pad_v - place_size
//! │   date                 [logo]│  anchor: place_bottom + 5
//! └──────────────────────────────┘  date_bottom must stay above height - 25
//! ```
//!
//! All text is left-aligned at `pad_h + 55`. Each box is measured from a
//! fixed anchor, never from a sibling's width, so an empty field leaves
//! the others where they were.
//!
//! When the date would run into the bottom margin, the place/date pair is
//! lifted once, as a unit, by the overflow amount. There is no second pass.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::font::FontHandle;
use crate::preset::Padding;

/// Offset of the text column from the horizontal padding.
pub const TEXT_LEFT_MARGIN: i32 = 55;
/// Gap between the title block and the description anchor.
pub const DESCRIPTION_GAP: i32 = 15;
/// Gap between place and date.
pub const PLACE_DATE_GAP: i32 = 5;
/// Distance the date must keep from the bottom edge.
pub const BOTTOM_MARGIN: i32 = 25;

/// Rectangle in canvas pixels. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

/// A text block ready to lay out: expanded content plus resolved font.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub font: FontHandle,
    pub size: u32,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font: FontHandle, size: u32) -> Self {
        Self {
            text: text.into(),
            font,
            size,
        }
    }

    fn place(&self, origin: (i32, i32)) -> Placement {
        Placement {
            origin,
            bbox: self.font.measure(&self.text, origin),
        }
    }
}

/// The four blocks of a poster, in the order the layout reads them.
#[derive(Debug, Clone)]
pub struct TextBlocks {
    pub title: TextBlock,
    pub description: TextBlock,
    pub place: TextBlock,
    pub date: TextBlock,
}

/// Where a block is anchored and the box it occupies there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub origin: (i32, i32),
    pub bbox: BoundingBox,
}

/// Final placement of all four blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub title: Placement,
    pub description: Placement,
    pub place: Placement,
    pub date: Placement,
    /// Whether the place/date pair was lifted off the bottom margin.
    pub corrected: bool,
}

/// Compute placements for all four blocks on a canvas of `canvas_height`.
pub fn plan(canvas_height: u32, padding: Padding, blocks: &TextBlocks) -> LayoutResult {
    let height = canvas_height as i32;
    let pad_v = padding.vertical as i32;
    let left = padding.horizontal as i32 + TEXT_LEFT_MARGIN;
    let bottom_padding = height - pad_v;
    let limit = height - BOTTOM_MARGIN;

    let title_y = pad_v + blocks.title.size as i32;
    let title = blocks.title.place((left, title_y));

    let mut place = blocks.place.place((left, bottom_padding - blocks.place.size as i32));
    let mut date = blocks.date.place((left, place.bbox.bottom + PLACE_DATE_GAP));

    let overflow = date.bbox.bottom - limit;
    let corrected = overflow > 0;
    if corrected {
        place = blocks.place.place((left, place.origin.1 - overflow));
        date = blocks.date.place((left, place.bbox.bottom));
        debug!(overflow, date_bottom = date.bbox.bottom, "lifted place/date off the bottom margin");
    }

    let description_y = title.bbox.height() + title_y + blocks.description.size as i32 + DESCRIPTION_GAP;
    let description = blocks.description.place((left, description_y));

    LayoutResult {
        title,
        description,
        place,
        date,
        corrected,
    }
}

/// Draw the blocks at their planned positions. Title and description use
/// `primary`; place and date use `secondary`.
pub fn draw(
    canvas: &mut RgbaImage,
    layout: &LayoutResult,
    blocks: &TextBlocks,
    primary: Rgba<u8>,
    secondary: Rgba<u8>,
) {
    let order = [
        (&blocks.title, &layout.title, primary),
        (&blocks.place, &layout.place, secondary),
        (&blocks.date, &layout.date, secondary),
        (&blocks.description, &layout.description, primary),
    ];
    for (block, placement, color) in order {
        block.font.draw(canvas, &block.text, placement.origin, color);
    }
}

/// Plan and draw in one step.
pub fn write_event_info(
    canvas: &mut RgbaImage,
    blocks: &TextBlocks,
    padding: Padding,
    primary: Rgba<u8>,
    secondary: Rgba<u8>,
) -> LayoutResult {
    let layout = plan(canvas.height(), padding, blocks);
    draw(canvas, &layout, blocks, primary, secondary);
    layout
}
