//! Deterministic object keys for product images
//!
//! Key format: `products/{product}/view_{NN}.{ext}`. Consumers build URLs from
//! this layout, so it must never change.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use strum::{AsRefStr, Display, EnumString};

use super::UploadError;

/// Longest product segment kept in a key
pub const MAX_PRODUCT_SEGMENT_LEN: usize = 120;

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("static regex is valid"));

/// Product identifier made safe for use as a single key segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSegment(String);

impl ProductSegment {
    /// Trims `raw`, collapses every run of characters outside
    /// `[A-Za-z0-9_-]` into one `_` and caps the result at 120 characters.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MissingProductId` if `raw` is blank
    pub fn sanitize(raw: &str) -> Result<Self, UploadError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UploadError::MissingProductId);
        }

        // Only ASCII survives the replacement, so byte truncation is safe
        let mut segment = UNSAFE_RUN.replace_all(trimmed, "_").into_owned();
        segment.truncate(MAX_PRODUCT_SEGMENT_LEN);
        Ok(Self(segment))
    }

    /// The sanitized segment
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Two-digit view number, `00` to `99`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewIndex([u8; 2]);

impl ViewIndex {
    /// The two digits as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII digits
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for ViewIndex {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UploadError::MissingViewIndex);
        }

        match trimmed.as_bytes() {
            &[a, b] if a.is_ascii_digit() && b.is_ascii_digit() => Ok(Self([a, b])),
            _ => Err(UploadError::InvalidViewIndex),
        }
    }
}

/// Supported image extensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImageExt {
    /// Portable Network Graphics, used when no extension is declared
    #[default]
    Png,
    /// JPEG under its short name
    Jpg,
    /// JPEG under its long name
    Jpeg,
    /// WebP
    Webp,
}

impl ImageExt {
    /// Parses a declared extension. An absent or empty value means `png`.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsupportedExt` for any other value
    pub fn from_declared(declared: Option<&str>) -> Result<Self, UploadError> {
        match declared {
            None | Some("") => Ok(Self::default()),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| UploadError::UnsupportedExt),
        }
    }

    /// MIME type stored with the object. The declared extension is trusted;
    /// the bytes are never sniffed.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jpg | Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Png => "image/png",
        }
    }
}

/// Storage address of one product view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Builds the key for a product view. Same inputs, same key.
    #[must_use]
    pub fn new(product: &ProductSegment, view: ViewIndex, ext: ImageExt) -> Self {
        Self(format!(
            "products/{}/view_{}.{}",
            product.as_str(),
            view.as_str(),
            ext
        ))
    }

    /// The key as stored in the bucket
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the inner string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
