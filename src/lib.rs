//! # Postmaker - Event Poster Composition Library
//!
//! Postmaker renders social media event posters: a background photo faded
//! into solid color bands, four text blocks (title, description, place,
//! date), and an optional logo with a QR code for the event link. It
//! provides:
//!
//! - **Canvas presets**: fixed sizes for Instagram, Facebook and X placements
//! - **Text layout**: anchored placement with bottom-margin correction
//! - **Font resolution**: outline fonts via `ab_glyph`, PSF2 bitmap fonts,
//!   and a built-in fallback
//! - **Logo/QR placement**: sized to the space the text leaves free
//!
//! ## Quick Start
//!
//! ```no_run
//! use postmaker::{CanvasPreset, EventInformation, PosterComposer, PosterRequest, TextField};
//! use std::path::Path;
//!
//! let event = EventInformation::new(
//!     TextField::new("Rust Meetup", "Fonts/Inter-Bold.ttf", 100),
//!     TextField::placeholder(r"Talks, pizza\nand crabs", 54),
//!     TextField::placeholder("Community Hall", 75),
//!     TextField::placeholder("May 1, 19:00", 60),
//! );
//!
//! let request = PosterRequest::new("#ffffff", "#eb4034", event)?
//!     .link("https://example.com/meetup")
//!     .logo(postmaker::output::load_image(Path::new("logo.png"), "logo")?);
//!
//! let composer = PosterComposer::new();
//! for (preset, poster) in composer.compose_batch(&CanvasPreset::ALL, &request) {
//!     let poster = poster?;
//!     postmaker::output::save_png(&poster, Path::new("out"), &request.event, preset)?;
//! }
//! # Ok::<(), postmaker::PosterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`preset`] | Canvas sizes and paddings |
//! | [`color`] | `#RRGGBB` colors |
//! | [`event`] | Text fields of an event |
//! | [`font`] | Font resolution, measuring and drawing |
//! | [`layout`] | Text block placement |
//! | [`logo`] | Logo and QR code placement |
//! | [`render`] | Raster primitives, gradients, background fit, composer |
//! | [`output`] | Image loading, PNG output, batch reports |
//! | [`error`] | Error types |

pub mod color;
pub mod error;
pub mod event;
pub mod font;
pub mod layout;
pub mod logo;
pub mod output;
pub mod preset;
pub mod render;

// Re-exports for convenience
pub use error::PosterError;
pub use event::{EventInformation, TextField};
pub use font::FontResolver;
pub use preset::CanvasPreset;
pub use render::composer::{PosterComposer, PosterRequest};
