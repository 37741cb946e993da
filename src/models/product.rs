//! Product model.

use super::{Duration, DurationId, DurationKey, PaymentMethod, ProductId};

/// A product offered by the reseller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Process-local identifier.
    pub id: ProductId,
    /// Lower-cased name; the object key in the document.
    pub name: String,
    /// Display image, never projected.
    pub image_url: String,
    /// Accepted payment methods, in selection order.
    pub payments: Vec<PaymentMethod>,
    /// Priced durations, in insertion order.
    pub durations: Vec<Duration>,
}

impl Product {
    /// Looks up a duration by ID.
    #[inline]
    #[must_use]
    pub fn duration(&self, id: DurationId) -> Option<&Duration> {
        self.durations.iter().find(|duration| duration.id == id)
    }

    /// Finds the first duration with this key.
    #[inline]
    #[must_use]
    pub fn duration_by_key(&self, key: &DurationKey) -> Option<&Duration> {
        self.durations.iter().find(|duration| duration.key == *key)
    }

    /// Returns `true` if `name` equals this product's name ignoring case.
    #[inline]
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name.to_lowercase()
    }
}

/// Removes repeated payment methods, keeping the first occurrence.
pub(crate) fn dedup_payments(payments: Vec<PaymentMethod>) -> Vec<PaymentMethod> {
    let mut unique = Vec::with_capacity(payments.len());
    for method in payments {
        if !unique.contains(&method) {
            unique.push(method);
        }
    }
    unique
}
