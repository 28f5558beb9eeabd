//! Event text fields.

use serde::{Deserialize, Serialize};

use crate::error::PosterError;

/// Font reference meaning "no font specified": resolves to the built-in
/// bitmap font.
pub const PLACEHOLDER_FONT: &str = "PlaceholderFont";

/// One block of poster text with its font and point size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    pub content: String,
    pub font: String,
    pub size: u32,
}

impl TextField {
    pub fn new(content: impl Into<String>, font: impl Into<String>, size: u32) -> Self {
        Self {
            content: content.into(),
            font: font.into(),
            size,
        }
    }

    /// A field drawn with the built-in bitmap font.
    pub fn placeholder(content: impl Into<String>, size: u32) -> Self {
        Self::new(content, PLACEHOLDER_FONT, size)
    }

    /// Content with literal `\n` / `\t` sequences expanded. Both measuring
    /// and drawing go through this so boxes match what is drawn.
    pub fn display_text(&self) -> String {
        expand_escapes(&self.content)
    }

    fn validate(&self, field: &str) -> Result<(), PosterError> {
        if self.size == 0 {
            return Err(PosterError::invalid_argument(
                format!("{}_size", field),
                "font size must be positive",
            ));
        }
        if self.font.trim().is_empty() {
            return Err(PosterError::invalid_argument(
                format!("{}_font", field),
                "font reference is empty",
            ));
        }
        Ok(())
    }
}

/// The four text blocks of an event poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInformation {
    pub title: TextField,
    pub description: TextField,
    pub place: TextField,
    pub date: TextField,
}

impl EventInformation {
    pub fn new(title: TextField, description: TextField, place: TextField, date: TextField) -> Self {
        Self {
            title,
            description,
            place,
            date,
        }
    }

    /// Fields paired with their names, in layout order.
    pub fn fields(&self) -> [(&'static str, &TextField); 4] {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("place", &self.place),
            ("date", &self.date),
        ]
    }

    pub fn validate(&self) -> Result<(), PosterError> {
        self.fields()
            .into_iter()
            .try_for_each(|(name, field)| field.validate(name))
    }
}

impl Default for EventInformation {
    fn default() -> Self {
        Self {
            title: TextField::placeholder("Title: Not decided yet", 100),
            description: TextField::placeholder("Description: Not decided yet", 54),
            place: TextField::placeholder("Place: Not decided yet", 75),
            date: TextField::placeholder("Date: Not decided yet", 60),
        }
    }
}

/// Check a user-supplied size before it reaches the engine.
pub fn validate_size(field: &str, size: i64) -> Result<u32, PosterError> {
    if size <= 0 {
        return Err(PosterError::invalid_argument(
            field,
            format!("{} must be a positive integer", size),
        ));
    }
    u32::try_from(size).map_err(|_| PosterError::invalid_argument(field, format!("{} is too large", size)))
}

/// Replace literal two-character `\n` and `\t` sequences with a newline
/// and a tab.
pub fn expand_escapes(s: &str) -> String {
    s.replace("\\n", "\n").replace("\\t", "\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_escapes() {
        assert_eq!(expand_escapes(r"Line 1\nLine 2"), "Line 1\nLine 2");
        assert_eq!(expand_escapes(r"a\tb"), "a\tb");
        assert_eq!(expand_escapes("plain"), "plain");
        assert_eq!(expand_escapes(""), "");
    }

    #[test]
    fn test_display_text_uses_expansion() {
        let field = TextField::placeholder(r"Hall A\nFloor 2", 40);
        assert_eq!(field.display_text(), "Hall A\nFloor 2");
    }

    #[test]
    fn test_default_event_is_valid() {
        assert!(EventInformation::default().validate().is_ok());
    }

    #[test]
    fn test_zero_size_names_field() {
        let mut event = EventInformation::default();
        event.date.size = 0;
        let err = event.validate().unwrap_err();
        assert_eq!(err.field(), Some("date_size"));
    }

    #[test]
    fn test_empty_font_rejected() {
        let mut event = EventInformation::default();
        event.place.font = "  ".into();
        assert_eq!(event.validate().unwrap_err().field(), Some("place_font"));
    }

    #[test]
    fn test_validate_size() {
        assert_eq!(validate_size("title_size", 100).unwrap(), 100);
        assert!(validate_size("title_size", 0).is_err());
        assert!(validate_size("title_size", -5).is_err());
        assert!(validate_size("title_size", i64::MAX).is_err());
    }

    #[test]
    fn test_empty_content_is_valid() {
        let mut event = EventInformation::default();
        event.description.content.clear();
        assert!(event.validate().is_ok());
    }
}
