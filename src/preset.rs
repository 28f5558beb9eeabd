//! # Canvas Presets
//!
//! Fixed canvas sizes for each supported social media placement.
//!
//! ## Supported Presets
//!
//! | Preset | Size (px) | Padding (h, v) |
//! |--------|-----------|----------------|
//! | IG_POST | 1080×1350 | 0, 135 |
//! | IG_STORY | 1080×1920 | 100, 120 |
//! | IG_REELS | 1080×1920 | 0, 0 |
//! | FB_POST | 1200×1200 | 0, 0 |
//! | FB_STORY | 1080×1920 | 100, 120 |
//! | FB_REELS | 1080×1920 | 0, 0 |
//! | X_POST | 1200×675 | 0, 0 |
//!
//! ## Usage
//!
//! ```
//! use postmaker::preset::CanvasPreset;
//!
//! let preset: CanvasPreset = "X_POST".parse()?;
//! assert_eq!(preset.dimensions(), (1200, 675));
//! # Ok::<(), postmaker::PosterError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PosterError;

/// Margin reserved for the top/bottom solid bands and background inset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Padding {
    pub const NONE: Self = Self::new(0, 0);

    pub const fn new(horizontal: u32, vertical: u32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// A social media placement with a fixed canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanvasPreset {
    IgPost,
    IgStory,
    IgReels,
    FbPost,
    FbStory,
    FbReels,
    XPost,
}

impl CanvasPreset {
    /// All presets in registry order.
    pub const ALL: [CanvasPreset; 7] = [
        Self::IgPost,
        Self::IgStory,
        Self::IgReels,
        Self::FbPost,
        Self::FbStory,
        Self::FbReels,
        Self::XPost,
    ];

    /// Canvas identifier as used on the command line and in file names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::IgPost => "IG_POST",
            Self::IgStory => "IG_STORY",
            Self::IgReels => "IG_REELS",
            Self::FbPost => "FB_POST",
            Self::FbStory => "FB_STORY",
            Self::FbReels => "FB_REELS",
            Self::XPost => "X_POST",
        }
    }

    /// Canvas size in pixels as `(width, height)`.
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::IgPost => (1080, 1350),
            Self::IgStory | Self::IgReels | Self::FbStory | Self::FbReels => (1080, 1920),
            Self::FbPost => (1200, 1200),
            Self::XPost => (1200, 675),
        }
    }

    /// Band/inset padding. Story placements reserve room for the platform's
    /// own overlays; IG_POST only needs vertical bands.
    pub const fn padding(self) -> Padding {
        match self {
            Self::IgStory | Self::FbStory => Padding::new(100, 120),
            Self::IgPost => Padding::new(0, 135),
            _ => Padding::NONE,
        }
    }

    #[inline]
    pub const fn width(self) -> u32 {
        self.dimensions().0
    }

    #[inline]
    pub const fn height(self) -> u32 {
        self.dimensions().1
    }
}

impl fmt::Display for CanvasPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanvasPreset {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| {
                PosterError::invalid_argument(
                    "canvas",
                    format!("unknown preset '{}' (expected one of {})", s, list_presets().join(", ")),
                )
            })
    }
}

/// List all preset identifiers.
pub fn list_presets() -> Vec<&'static str> {
    CanvasPreset::ALL.iter().map(|p| p.name()).collect()
}

/// Look up `(width, height)` for a preset identifier.
pub fn dimensions_for(preset_id: &str) -> Result<(u32, u32), PosterError> {
    preset_id.parse::<CanvasPreset>().map(CanvasPreset::dimensions)
}

/// Look up `(horizontal, vertical)` padding for a preset identifier.
pub fn padding_for(preset_id: &str) -> Result<(u32, u32), PosterError> {
    preset_id
        .parse::<CanvasPreset>()
        .map(|p| (p.padding().horizontal, p.padding().vertical))
}
