//! # Poster Composer
//!
//! Sequences the raster steps into one finished poster per preset:
//!
//! ```text
//! canvas(bg) → background photo → top fade (fg) → bottom fade (bg)
//!            → top band (fg) → text layout → logo/QR
//! ```
//!
//! Everything that can fail on caller input (preset id, colors, sizes,
//! fonts) is checked before the canvas is allocated, so a failed
//! composition never produces a partial image.
//!
//! ## Example
//!
//! ```
//! use postmaker::{EventInformation, PosterComposer};
//!
//! let composer = PosterComposer::new();
//! let event = EventInformation::default();
//! let poster = composer.compose("X_POST", "#ffffff", "#eb4034", &event, "", None, None)?;
//! assert_eq!(poster.dimensions(), (1200, 675));
//! # Ok::<(), postmaker::PosterError>(())
//! ```

use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::color::Rgb;
use crate::error::PosterError;
use crate::event::{EventInformation, TextField};
use crate::font::FontResolver;
use crate::layout::{self, LayoutResult, TextBlock, TextBlocks};
use crate::logo;
use crate::preset::CanvasPreset;
use crate::render::{alpha_composite, background, fill_rect, gradient, paste};

/// Fade length as a fraction of the canvas height.
pub const FADE_FRACTION: f32 = 0.8;

/// Everything a poster needs apart from the preset.
#[derive(Debug, Clone)]
pub struct PosterRequest {
    pub background_color: Rgb,
    pub foreground_color: Rgb,
    pub event: EventInformation,
    pub qr_payload: Option<String>,
    pub background_image: Option<DynamicImage>,
    pub logo_image: Option<DynamicImage>,
}

impl PosterRequest {
    /// Parse the two `#RRGGBB` colors. No link, background or logo.
    pub fn new(background_hex: &str, foreground_hex: &str, event: EventInformation) -> Result<Self, PosterError> {
        Ok(Self {
            background_color: Rgb::parse_hex("bg_color", background_hex)?,
            foreground_color: Rgb::parse_hex("fg_color", foreground_hex)?,
            event,
            qr_payload: None,
            background_image: None,
            logo_image: None,
        })
    }

    /// Encode `link` as a QR code next to the logo. Empty and placeholder
    /// links mean no QR code.
    pub fn link(mut self, link: &str) -> Self {
        self.qr_payload = logo::qr_payload(link).map(str::to_owned);
        self
    }

    pub fn background(mut self, image: DynamicImage) -> Self {
        self.background_image = Some(image);
        self
    }

    pub fn logo(mut self, image: DynamicImage) -> Self {
        self.logo_image = Some(image);
        self
    }
}

/// Result of composing one preset, with the placements downstream
/// consumers care about.
#[derive(Debug, Clone)]
pub struct Composition {
    pub image: RgbaImage,
    pub layout: LayoutResult,
    pub logo: Option<layout::BoundingBox>,
}

/// Composes posters. Holds the font cache shared by all compositions.
#[derive(Debug, Default)]
pub struct PosterComposer {
    resolver: FontResolver,
}

impl PosterComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(resolver: FontResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }

    /// Compose one poster from raw caller values.
    #[allow(clippy::too_many_arguments)]
    pub fn compose(
        &self,
        preset_id: &str,
        background_hex: &str,
        foreground_hex: &str,
        event: &EventInformation,
        qr_payload: &str,
        background_image: Option<&DynamicImage>,
        logo_image: Option<&DynamicImage>,
    ) -> Result<RgbaImage, PosterError> {
        let preset: CanvasPreset = preset_id.parse()?;
        let background_color = Rgb::parse_hex("bg_color", background_hex)?;
        let foreground_color = Rgb::parse_hex("fg_color", foreground_hex)?;
        let inputs = Inputs {
            background_color,
            foreground_color,
            event,
            qr_payload: logo::qr_payload(qr_payload),
            background_image,
            logo_image,
        };
        self.render(preset, &inputs).map(|c| c.image)
    }

    /// Compose `request` for one preset.
    pub fn compose_preset(&self, preset: CanvasPreset, request: &PosterRequest) -> Result<RgbaImage, PosterError> {
        self.compose_detailed(preset, request).map(|c| c.image)
    }

    /// Like [`compose_preset`](Self::compose_preset), also returning the
    /// text and logo placements.
    pub fn compose_detailed(&self, preset: CanvasPreset, request: &PosterRequest) -> Result<Composition, PosterError> {
        self.render(preset, &Inputs::from(request))
    }

    /// Compose `request` for every preset, in parallel. Results keep the
    /// order of `presets`; one preset failing does not stop the others.
    pub fn compose_batch(
        &self,
        presets: &[CanvasPreset],
        request: &PosterRequest,
    ) -> Vec<(CanvasPreset, Result<RgbaImage, PosterError>)> {
        presets
            .par_iter()
            .map(|&preset| {
                let result = self.compose_preset(preset, request);
                if let Err(e) = &result {
                    warn!(preset = %preset, error = %e, "composition failed");
                }
                (preset, result)
            })
            .collect()
    }

    #[tracing::instrument(skip_all, fields(preset = %preset))]
    fn render(&self, preset: CanvasPreset, inputs: &Inputs<'_>) -> Result<Composition, PosterError> {
        let event = inputs.event;
        event.validate()?;

        let blocks = TextBlocks {
            title: self.block("title", &event.title)?,
            description: self.block("description", &event.description)?,
            place: self.block("place", &event.place)?,
            date: self.block("date", &event.date)?,
        };

        let (width, height) = preset.dimensions();
        let padding = preset.padding();
        let body = (width, height - 2 * padding.vertical);
        let (bg, fg) = (inputs.background_color, inputs.foreground_color);

        let mut canvas = RgbaImage::from_pixel(width, height, bg.opaque());

        if let Some(photo) = inputs.background_image {
            let fitted = background::fit(photo, body);
            paste(&mut canvas, &fitted, 0, padding.vertical as i64);
            debug!(source_width = photo.width(), source_height = photo.height(), target = ?body, "placed background");
        }

        let fade = height as f32 * FADE_FRACTION;
        let upper = gradient::make_gradient_flipped(fade, body, fg);
        alpha_composite(&mut canvas, &upper, 0, padding.vertical as i64);
        let lower = gradient::make_gradient(fade, body, bg);
        alpha_composite(&mut canvas, &lower, 0, padding.vertical as i64);
        debug!(fade, "composited gradients");

        fill_rect(&mut canvas, 0, 0, width, padding.vertical, fg.opaque());

        let layout = layout::write_event_info(&mut canvas, &blocks, padding, bg.opaque(), fg.opaque());
        debug!(corrected = layout.corrected, "laid out text");

        let logo = match inputs.logo_image {
            Some(artwork) => logo::place_logo(&mut canvas, artwork, inputs.qr_payload, Some(&layout))?,
            None => None,
        };

        info!(width, height, logo = logo.is_some(), "composed poster");
        Ok(Composition {
            image: canvas,
            layout,
            logo,
        })
    }

    fn block(&self, field: &str, text: &TextField) -> Result<TextBlock, PosterError> {
        let font = self.resolver.resolve_field(field, text)?;
        Ok(TextBlock::new(text.display_text(), font, text.size))
    }
}

/// Borrowed view of a request, shared by the raw and request entry points.
struct Inputs<'a> {
    background_color: Rgb,
    foreground_color: Rgb,
    event: &'a EventInformation,
    qr_payload: Option<&'a str>,
    background_image: Option<&'a DynamicImage>,
    logo_image: Option<&'a DynamicImage>,
}

impl<'a> From<&'a PosterRequest> for Inputs<'a> {
    fn from(request: &'a PosterRequest) -> Self {
        Self {
            background_color: request.background_color,
            foreground_color: request.foreground_color,
            event: &request.event,
            qr_payload: request.qr_payload.as_deref(),
            background_image: request.background_image.as_ref(),
            logo_image: request.logo_image.as_ref(),
        }
    }
}
