use std::fmt::{Display, Formatter};

use garden_core::{AppError, AppResult};

/// Maximum slug length in UTF-16 code units.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Identifier of a published content item, as it appears in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Creates a slug after checking presence and length.
    ///
    /// Length is measured in UTF-16 code units, so characters outside the
    /// Basic Multilingual Plane count twice.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Validation("Slug is required".to_owned()));
        }

        if value.encode_utf16().count() > MAX_SLUG_LENGTH {
            return Err(AppError::Validation("Invalid slug".to_owned()));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Slug {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}
