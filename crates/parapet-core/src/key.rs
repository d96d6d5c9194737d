//! # Cover Keys — Fixed-Width Cover Identifiers
//!
//! A `CoverKey` names one cover product. Keys are fixed-width 32-byte
//! values built from short ASCII slugs, right-padded with zeros, so they
//! hash, order, and compare as plain byte arrays regardless of the slug
//! length. The engine never interprets a key beyond equality.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Width of a cover key in bytes.
pub const COVER_KEY_LEN: usize = 32;

/// Fixed-width identifier for a cover product.
///
/// Built from an ASCII slug like `"animated-brands"` via
/// [`CoverKey::from_slug()`]. The slug occupies the leading bytes; the
/// remainder is zero padding. Two keys are the same cover iff their 32
/// bytes are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoverKey([u8; COVER_KEY_LEN]);

impl CoverKey {
    /// Build a key from an ASCII slug.
    ///
    /// # Errors
    ///
    /// Rejects empty slugs, slugs longer than [`COVER_KEY_LEN`] bytes,
    /// and slugs containing anything but printable non-space ASCII.
    pub fn from_slug(slug: &str) -> Result<Self, CoreError> {
        if slug.is_empty() {
            return Err(CoreError::InvalidCoverKey {
                reason: "slug is empty".to_string(),
            });
        }
        if slug.len() > COVER_KEY_LEN {
            return Err(CoreError::InvalidCoverKey {
                reason: format!(
                    "slug is {} bytes, maximum is {COVER_KEY_LEN}",
                    slug.len()
                ),
            });
        }
        if !slug.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(CoreError::InvalidCoverKey {
                reason: format!("slug contains non-printable or non-ASCII bytes: {slug:?}"),
            });
        }

        let mut bytes = [0u8; COVER_KEY_LEN];
        bytes[..slug.len()].copy_from_slice(slug.as_bytes());
        Ok(Self(bytes))
    }

    /// Adopt a raw 32-byte key, for hosts that store keys in fixed-width
    /// columns.
    pub fn from_bytes(bytes: [u8; COVER_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The full 32-byte representation, padding included.
    pub fn as_bytes(&self) -> &[u8; COVER_KEY_LEN] {
        &self.0
    }

    /// The slug portion: leading bytes up to the first zero.
    fn slug_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(COVER_KEY_LEN);
        &self.0[..end]
    }
}

impl std::fmt::Display for CoverKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.slug_bytes()))
    }
}
