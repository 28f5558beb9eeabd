//! Loading input images and saving finished posters.

use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::PosterError;
use crate::event::EventInformation;
use crate::preset::CanvasPreset;

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `{title}_{date}_{PRESET}.png`, sanitized.
pub fn poster_file_name(event: &EventInformation, preset: CanvasPreset) -> String {
    format!(
        "{}_{}_{}.png",
        sanitize(&event.title.content),
        sanitize(&event.date.content),
        sanitize(preset.name())
    )
}

/// Write `image` as PNG into `dir`, creating it if needed.
pub fn save_png(
    image: &RgbaImage,
    dir: &Path,
    event: &EventInformation,
    preset: CanvasPreset,
) -> Result<PathBuf, PosterError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(poster_file_name(event, preset));
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| PosterError::Image(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "saved poster");
    Ok(path)
}

/// Decode an image file. Missing or undecodable files are reported
/// against `field`.
pub fn load_image(path: &Path, field: &str) -> Result<DynamicImage, PosterError> {
    image::open(path).map_err(|e| PosterError::unreadable_image(field, format!("{}: {}", path.display(), e)))
}

/// One line of a batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub preset: CanvasPreset,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ReportEntry {
    pub fn saved(preset: CanvasPreset, path: PathBuf) -> Self {
        let (width, height) = preset.dimensions();
        Self {
            preset,
            width,
            height,
            path: Some(path),
            error: None,
            field: None,
        }
    }

    pub fn failed(preset: CanvasPreset, error: &PosterError) -> Self {
        let (width, height) = preset.dimensions();
        Self {
            preset,
            width,
            height,
            path: None,
            error: Some(error.to_string()),
            field: error.field().map(str::to_owned),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a batch run, written by `render --report`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub succeeded: usize,
    pub failed: usize,
    pub entries: Vec<ReportEntry>,
}

impl RenderReport {
    pub fn push(&mut self, entry: ReportEntry) {
        if entry.is_ok() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.entries.push(entry);
    }

    pub fn to_json(&self) -> Result<String, PosterError> {
        serde_json::to_string_pretty(self).map_err(|e| PosterError::Io(e.into()))
    }

    pub fn write(&self, path: &Path) -> Result<(), PosterError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TextField;
    use image::Rgba;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("postmaker-output-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Rust Meetup #3"), "Rust_Meetup__3");
        assert_eq!(sanitize("2024-05-01"), "2024-05-01");
        assert_eq!(sanitize("a/b\\c"), "a_b_c");
        assert_eq!(sanitize("Café"), "Caf_");
    }

    #[test]
    fn test_poster_file_name() {
        let mut event = EventInformation::default();
        event.title = TextField::placeholder("Rust Meetup", 100);
        event.date = TextField::placeholder("May 1, 2024", 60);
        assert_eq!(
            poster_file_name(&event, CanvasPreset::IgStory),
            "Rust_Meetup_May_1__2024_IG_STORY.png"
        );
    }

    #[test]
    fn test_save_png_creates_directory() {
        let dir = temp_dir("save").join("nested");
        let _ = fs::remove_dir_all(&dir);
        let image = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]));
        let event = EventInformation::default();
        let path = save_png(&image, &dir, &event, CanvasPreset::XPost).unwrap();
        assert!(path.ends_with("Title__Not_decided_yet_Date__Not_decided_yet_X_POST.png"));

        let reloaded = load_image(&path, "background").unwrap().to_rgba8();
        assert_eq!(reloaded, image);
    }

    #[test]
    fn test_load_image_missing_file() {
        let err = load_image(Path::new("/nonexistent/logo.png"), "logo").unwrap_err();
        assert!(matches!(err, PosterError::UnreadableImage { .. }));
        assert_eq!(err.field(), Some("logo"));
    }

    #[test]
    fn test_load_image_not_an_image() {
        let dir = temp_dir("garbage");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.png");
        fs::write(&path, b"not a png").unwrap();
        let err = load_image(&path, "background").unwrap_err();
        assert_eq!(err.field(), Some("background"));
    }

    #[test]
    fn test_report_counts_and_json() {
        let mut report = RenderReport::default();
        report.push(ReportEntry::saved(CanvasPreset::XPost, PathBuf::from("out/x.png")));
        report.push(ReportEntry::failed(
            CanvasPreset::IgPost,
            &PosterError::font_not_found("title", "/nonexistent/font.ttf"),
        ));
        assert_eq!((report.succeeded, report.failed), (1, 1));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["entries"][0]["preset"], "X_POST");
        assert_eq!(json["entries"][0]["width"], 1200);
        assert!(json["entries"][0].get("error").is_none());
        assert_eq!(json["entries"][1]["field"], "title");
    }
}
