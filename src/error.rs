//! # Error Types
//!
//! This module defines error types used throughout the postmaker library.
//!
//! Every variant that originates from a caller-supplied value names the
//! offending field (`"title"`, `"background"`, `"bg_color"`, ...).

use thiserror::Error;

/// Main error type for postmaker operations
#[derive(Debug, Error)]
pub enum PosterError {
    /// Unknown preset, malformed color, non-positive size
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Font reference is neither a scalable nor a bitmap font
    #[error("Font not found for `{field}`: {reference}")]
    FontNotFound { field: String, reference: String },

    /// Background or logo is not a decodable image
    #[error("Unreadable image for `{field}`: {reason}")]
    UnreadableImage { field: String, reason: String },

    /// Payload could not be encoded as a QR code
    #[error("QR generation failed: {0}")]
    QrGeneration(String),

    /// Image encoding error (saving output)
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PosterError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn font_not_found(field: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::FontNotFound {
            field: field.into(),
            reference: reference.into(),
        }
    }

    pub fn unreadable_image(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableImage {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the input field this error points at, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { field, .. }
            | Self::FontNotFound { field, .. }
            | Self::UnreadableImage { field, .. } => Some(field),
            Self::QrGeneration(_) => Some("link"),
            Self::Image(_) | Self::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_is_named_in_message() {
        let err = PosterError::font_not_found("title", "/nonexistent/font.ttf");
        assert_eq!(err.field(), Some("title"));
        assert_eq!(
            err.to_string(),
            "Font not found for `title`: /nonexistent/font.ttf"
        );
    }

    #[test]
    fn test_qr_error_points_at_link() {
        let err = PosterError::QrGeneration("data too long".into());
        assert_eq!(err.field(), Some("link"));
    }

    #[test]
    fn test_io_has_no_field() {
        let err: PosterError = std::io::Error::other("disk full").into();
        assert!(err.field().is_none());
    }
}
