//! Duration keys and priced duration entries.

use serde::{Serialize, Serializer};

use super::DurationId;

/// Literal token for an unlimited duration.
pub const LIFETIME: &str = "lifetime";

/// Canonical duration key: `lifetime` or a day count.
///
/// Only the duration parser produces keys, so a day key always holds a
/// non-empty run of ASCII digits. Serializes as its key text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DurationKey(Option<String>);

impl DurationKey {
    /// The `lifetime` key.
    pub const LIFETIME: Self = Self(None);

    /// Wraps a digit string produced by the parser.
    #[inline]
    pub(crate) const fn from_digits(digits: String) -> Self {
        Self(Some(digits))
    }

    /// Returns `true` for the `lifetime` key.
    #[inline]
    #[must_use]
    pub const fn is_lifetime(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the day count digits, or `None` for `lifetime`.
    #[inline]
    #[must_use]
    pub fn days(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the key text used in the catalog document.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.days().unwrap_or(LIFETIME)
    }

    /// Human-readable label, e.g. `Lifetime` or `7 days`.
    #[inline]
    #[must_use]
    pub fn label(&self) -> String {
        self.days()
            .map_or_else(|| "Lifetime".to_owned(), |digits| format!("{digits} days"))
    }
}

impl core::fmt::Display for DurationKey {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DurationKey {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A priced purchase option for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    /// Process-local identifier.
    pub id: DurationId,
    /// Canonical key; becomes the object key in the document.
    pub key: DurationKey,
    /// Price text, emitted verbatim.
    pub price: String,
    /// Purchase link, emitted verbatim.
    pub url: String,
}
