//! # Font Resolution
//!
//! Turns a font reference from an [`EventInformation`](crate::event::EventInformation)
//! field into a [`FontHandle`] that can measure and draw text.
//!
//! ## Resolution order
//!
//! ```text
//! "PlaceholderFont"      → built-in Spleen 12×24 bitmap (size ignored)
//! outline font file      → ab_glyph at the requested size
//! PSF2 bitmap font file  → fixed-size bitmap (size ignored)
//! anything else          → PosterError::FontNotFound
//! ```
//!
//! A reference that does not exist as given is also looked up in the
//! resolver's search directory, so `"Roboto.ttf"` can name a file in a
//! `Fonts/` folder.
//!
//! Loaded font data is cached per path. Failed loads are never cached.

mod bitmap;
mod outline;

pub use bitmap::BitmapFont;

use ab_glyph::{FontArc, FontRef, PxScale};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::error::PosterError;
use crate::event::{PLACEHOLDER_FONT, TextField};
use crate::layout::BoundingBox;
use crate::render::blend_pixel;

/// Extra pixels between lines of multi-line text.
pub const LINE_SPACING: u32 = 4;

/// Width of a tab, in spaces.
pub const TAB_WIDTH: u32 = 4;

/// File extensions listed as fonts.
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "psf", "psfu"];

/// A font ready to measure and draw text.
///
/// Scalable fonts carry their pixel scale; bitmap fonts draw at their
/// native cell size.
#[derive(Clone)]
pub enum FontHandle {
    Scalable { font: FontArc, scale: PxScale },
    Bitmap(Arc<BitmapFont>),
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalable { scale, .. } => write!(f, "FontHandle::Scalable({}px)", scale.y),
            Self::Bitmap(font) => write!(f, "FontHandle::Bitmap({})", font.name()),
        }
    }
}

impl FontHandle {
    pub fn is_scalable(&self) -> bool {
        matches!(self, Self::Scalable { .. })
    }

    /// Box of `text` anchored at the origin.
    pub fn extent(&self, text: &str) -> BoundingBox {
        match self {
            Self::Scalable { font, scale } => outline::extent(font, *scale, text),
            Self::Bitmap(font) => font.extent(text),
        }
    }

    /// Box of `text` with its top-left anchor at `origin`.
    pub fn measure(&self, text: &str, origin: (i32, i32)) -> BoundingBox {
        self.extent(text).translate(origin.0, origin.1)
    }

    /// Draw `text` onto the canvas, blending glyph coverage over the
    /// existing pixels. Pixels outside the canvas are clipped.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, origin: (i32, i32), color: Rgba<u8>) {
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        let mut plot = |x: i32, y: i32, coverage: f32| {
            let (cx, cy) = (origin.0 + x, origin.1 + y);
            if cx < 0 || cy < 0 || cx >= width || cy >= height {
                return;
            }
            blend_pixel(canvas.get_pixel_mut(cx as u32, cy as u32), color, coverage);
        };
        match self {
            Self::Scalable { font, scale } => outline::rasterize(font, *scale, text, &mut plot),
            Self::Bitmap(font) => font.rasterize(text, &mut plot),
        }
    }
}

#[derive(Clone)]
enum LoadedFont {
    Outline(FontArc),
    Bitmap(Arc<BitmapFont>),
}

/// Resolves font references, memoizing loaded font data.
///
/// Safe to share between threads; batch composition resolves fonts for
/// several presets through one resolver.
#[derive(Default)]
pub struct FontResolver {
    search_dir: Option<PathBuf>,
    cache: RwLock<HashMap<PathBuf, LoadedFont>>,
    builtin: RwLock<Option<Arc<BitmapFont>>>,
}

impl fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResolver")
            .field("search_dir", &self.search_dir)
            .field("cached", &self.cached_fonts())
            .finish()
    }
}

impl FontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also look up bare font names in `dir`.
    pub fn with_search_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn search_dir(&self) -> Option<&Path> {
        self.search_dir.as_deref()
    }

    /// Resolve a font reference at a point size.
    pub fn resolve(&self, reference: &str, size: u32) -> Result<FontHandle, PosterError> {
        self.resolve_named("font", reference, size)
    }

    /// Resolve the font of a text field; errors name the field.
    pub fn resolve_field(&self, field: &str, text: &TextField) -> Result<FontHandle, PosterError> {
        self.resolve_named(field, &text.font, text.size)
    }

    fn resolve_named(&self, field: &str, reference: &str, size: u32) -> Result<FontHandle, PosterError> {
        if reference == PLACEHOLDER_FONT {
            return self.builtin(field).map(FontHandle::Bitmap);
        }

        let path = self
            .locate(reference)
            .ok_or_else(|| PosterError::font_not_found(field, reference))?;

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&path)
            .cloned();
        let loaded = match cached {
            Some(loaded) => loaded,
            None => {
                let loaded = load_font_file(&path)
                    .ok_or_else(|| PosterError::font_not_found(field, reference))?;
                self.cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(path, loaded.clone());
                loaded
            }
        };

        Ok(match loaded {
            LoadedFont::Outline(font) => {
                let scale = outline::px_scale(&font, size);
                FontHandle::Scalable { font, scale }
            }
            LoadedFont::Bitmap(font) => FontHandle::Bitmap(font),
        })
    }

    fn builtin(&self, field: &str) -> Result<Arc<BitmapFont>, PosterError> {
        if let Some(font) = self.builtin.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(font.clone());
        }
        let font = Arc::new(
            BitmapFont::builtin().ok_or_else(|| PosterError::font_not_found(field, PLACEHOLDER_FONT))?,
        );
        *self.builtin.write().unwrap_or_else(PoisonError::into_inner) = Some(font.clone());
        Ok(font)
    }

    fn locate(&self, reference: &str) -> Option<PathBuf> {
        let direct = Path::new(reference);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        let candidate = self.search_dir.as_ref()?.join(reference);
        candidate.is_file().then_some(candidate)
    }

    /// Number of font files currently cached.
    pub fn cached_fonts(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop all cached font data. Later resolutions reload from disk.
    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Load a font file: outline first, then PSF2 bitmap.
fn load_font_file(path: &Path) -> Option<LoadedFont> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "font file unreadable");
            return None;
        }
    };

    if FontRef::try_from_slice(&bytes).is_ok() {
        debug!(path = %path.display(), "loading outline font");
        return FontArc::try_from_vec(bytes).ok().map(LoadedFont::Outline);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match BitmapFont::from_bytes(name, bytes) {
        Some(font) => {
            debug!(path = %path.display(), cell = ?font.cell_size(), "loaded bitmap font");
            Some(LoadedFont::Bitmap(Arc::new(font)))
        }
        None => {
            debug!(path = %path.display(), "neither an outline nor a bitmap font");
            None
        }
    }
}

/// List font files in a directory, sorted by file name.
pub fn list_fonts(dir: &Path) -> Result<Vec<PathBuf>, PosterError> {
    let mut fonts: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .collect();
    fonts.sort();
    Ok(fonts)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Rgba;

    /// A TrueType font from the host, if one is installed.
    pub(crate) fn system_ttf() -> Option<PathBuf> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
        ]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
    }

    fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("postmaker-font-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_placeholder_is_bitmap() {
        let resolver = FontResolver::new();
        let handle = resolver.resolve(PLACEHOLDER_FONT, 100).unwrap();
        assert!(!handle.is_scalable());
        // size is ignored for the built-in font
        let small = resolver.resolve(PLACEHOLDER_FONT, 10).unwrap();
        assert_eq!(handle.extent("abc"), small.extent("abc"));
    }

    #[test]
    fn test_missing_font_is_font_not_found() {
        let resolver = FontResolver::new();
        let err = resolver.resolve("/nonexistent/font.ttf", 40).unwrap_err();
        assert!(matches!(err, PosterError::FontNotFound { ref reference, .. } if reference == "/nonexistent/font.ttf"));
        assert_eq!(resolver.cached_fonts(), 0);
    }

    #[test]
    fn test_garbage_file_is_font_not_found_and_not_cached() {
        let path = write_temp("garbage.ttf", b"definitely not a font");
        let resolver = FontResolver::new();
        let field = TextField::new("x", path.to_string_lossy(), 30);
        let err = resolver.resolve_field("place", &field).unwrap_err();
        assert_eq!(err.field(), Some("place"));
        assert_eq!(resolver.cached_fonts(), 0);
    }

    #[test]
    fn test_psf2_file_resolves_as_bitmap() {
        let data: &'static [u8] = spleen_font::FONT_12X24;
        let path = write_temp("spleen.psfu", data);
        let resolver = FontResolver::new();
        let handle = resolver.resolve(&path.to_string_lossy(), 80).unwrap();
        assert!(!handle.is_scalable());
        assert_eq!(handle.extent("ab"), BoundingBox::new(0, 0, 24, 24));
        assert_eq!(resolver.cached_fonts(), 1);

        resolver.resolve(&path.to_string_lossy(), 20).unwrap();
        assert_eq!(resolver.cached_fonts(), 1);
        resolver.clear();
        assert_eq!(resolver.cached_fonts(), 0);
    }

    #[test]
    fn test_search_dir_lookup() {
        let data: &'static [u8] = spleen_font::FONT_12X24;
        let path = write_temp("lookup.psfu", data);
        let resolver = FontResolver::with_search_dir(path.parent().unwrap());
        assert!(resolver.resolve("lookup.psfu", 10).is_ok());
        assert!(FontResolver::new().resolve("lookup.psfu", 10).is_err());
    }

    #[test]
    fn test_measure_translates_extent() {
        let handle = FontResolver::new().resolve(PLACEHOLDER_FONT, 1).unwrap();
        let at_origin = handle.extent("Date");
        let moved = handle.measure("Date", (55, 600));
        assert_eq!(moved, at_origin.translate(55, 600));
    }

    #[test]
    fn test_draw_clips_outside_canvas() {
        let handle = FontResolver::new().resolve(PLACEHOLDER_FONT, 1).unwrap();
        let white = Rgba([255, 255, 255, 255]);
        let mut canvas = RgbaImage::from_pixel(40, 30, white);
        handle.draw(&mut canvas, "WWWWWW", (-30, -10), Rgba([0, 0, 0, 255]));
        handle.draw(&mut canvas, "WWWWWW", (30, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.dimensions(), (40, 30));

        let mut fresh = RgbaImage::from_pixel(40, 30, white);
        handle.draw(&mut fresh, "WWW", (0, 0), Rgba([0, 0, 0, 255]));
        assert!(fresh.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_scalable_font_from_system() {
        let Some(path) = system_ttf() else {
            eprintln!("no system TrueType font found, skipping");
            return;
        };
        let resolver = FontResolver::new();
        let small = resolver.resolve(&path.to_string_lossy(), 20).unwrap();
        let large = resolver.resolve(&path.to_string_lossy(), 80).unwrap();
        assert!(small.is_scalable());
        assert!(large.extent("Title").height() > small.extent("Title").height());
        assert!(large.extent("Title").width() > small.extent("Title").width());
        assert_eq!(resolver.cached_fonts(), 1);

        let two_lines = large.extent("Title\nTitle");
        assert!(two_lines.height() > large.extent("Title").height());
    }

    #[test]
    fn test_list_fonts_filters_extensions() {
        let dir = std::env::temp_dir().join(format!("postmaker-list-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.TTF"), b"").unwrap();
        fs::write(dir.join("a.psfu"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();

        let names: Vec<String> = list_fonts(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.psfu", "b.TTF"]);
    }
}
