//! Reseller catalog state and its mutations.

use super::product::dedup_payments;
use super::{Duration, DurationId, PaymentMethod, Product, ProductId};
use crate::duration_parser::parse_duration;
use crate::error::{CatalogError, Result};

/// The catalog assembled during one session.
///
/// Fields are public for read access and for callers that build a catalog
/// directly; the methods enforce the invariants (non-blank reseller info,
/// unique product names, complete durations) at insertion time.
///
/// # Examples
///
/// ```
/// use reseller_catalog::models::{PaymentMethod, ResellerCatalog};
///
/// let mut catalog = ResellerCatalog::new();
/// catalog.set_reseller_name("Voxlis");
/// catalog.set_profile_picture_url("http://x");
/// let wave = catalog
///     .add_product("Wave", "images/wave.png", vec![PaymentMethod::Crypto])
///     .unwrap();
/// catalog.add_duration(wave, "7 days", "9.99", "http://y").unwrap();
/// assert_eq!(catalog.products[0].name, "wave");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResellerCatalog {
    /// Reseller name as entered; trimmed when used.
    pub reseller_name: String,
    /// Profile picture URL as entered; trimmed when used.
    pub profile_picture_url: String,
    /// Products in insertion order.
    pub products: Vec<Product>,
}

impl ResellerCatalog {
    /// Creates an empty catalog.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reseller name.
    #[inline]
    pub fn set_reseller_name<T: Into<String>>(&mut self, name: T) {
        self.reseller_name = name.into();
    }

    /// Sets the profile picture URL.
    #[inline]
    pub fn set_profile_picture_url<T: Into<String>>(&mut self, url: T) {
        self.profile_picture_url = url.into();
    }

    /// Trimmed reseller name.
    #[inline]
    #[must_use]
    pub fn reseller_name(&self) -> &str {
        self.reseller_name.trim()
    }

    /// Trimmed profile picture URL.
    #[inline]
    #[must_use]
    pub fn profile_picture_url(&self) -> &str {
        self.profile_picture_url.trim()
    }

    /// Returns `true` when both reseller name and picture URL are non-blank.
    #[inline]
    #[must_use]
    pub fn has_reseller_info(&self) -> bool {
        !self.reseller_name().is_empty() && !self.profile_picture_url().is_empty()
    }

    /// Looks up a product by ID.
    #[inline]
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Looks up a product by name, ignoring case.
    #[inline]
    #[must_use]
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.has_name(name))
    }

    /// Mutable lookup by ID.
    fn product_mut(&mut self, id: ProductId) -> Result<&mut Product> {
        self.products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Adds a product with the given payment methods.
    ///
    /// The name is stored lower-cased. Repeated payment methods are
    /// collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingResellerInfo`] if reseller name or picture
    ///   URL is blank.
    /// - [`CatalogError::UnknownProduct`] if `name` is blank.
    /// - [`CatalogError::MissingPayments`] if `payments` is empty.
    /// - [`CatalogError::DuplicateProduct`] if a product with the same name
    ///   (ignoring case) already exists. The catalog is left unchanged.
    pub fn add_product(
        &mut self,
        name: &str,
        image_url: &str,
        payments: Vec<PaymentMethod>,
    ) -> Result<ProductId> {
        if !self.has_reseller_info() {
            return Err(CatalogError::MissingResellerInfo);
        }
        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(CatalogError::UnknownProduct(name.to_owned()));
        }
        if payments.is_empty() {
            return Err(CatalogError::MissingPayments);
        }
        if self.product_by_name(&lowered).is_some() {
            tracing::warn!(product = %lowered, "rejected duplicate product");
            return Err(CatalogError::DuplicateProduct { name: lowered });
        }

        let id = ProductId::generate();
        tracing::info!(product = %lowered, %id, "product added");
        self.products.push(Product {
            id,
            name: lowered,
            image_url: image_url.trim().to_owned(),
            payments: dedup_payments(payments),
            durations: Vec::new(),
        });
        Ok(id)
    }

    /// Removes a product and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this ID.
    pub fn remove_product(&mut self, id: ProductId) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        let removed = self.products.remove(index);
        tracing::info!(product = %removed.name, %id, "product removed");
        Ok(removed)
    }

    /// Replaces a product's payment methods wholesale.
    ///
    /// An empty list is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this ID.
    pub fn set_payments(&mut self, id: ProductId, payments: Vec<PaymentMethod>) -> Result<()> {
        let product = self.product_mut(id)?;
        product.payments = dedup_payments(payments);
        tracing::info!(product = %product.name, count = product.payments.len(), "payments updated");
        Ok(())
    }

    /// Parses `raw_duration` and appends a priced duration to a product.
    ///
    /// All inputs are trimmed. Keys are not de-duplicated: a second entry
    /// with the same key replaces the first one in the projected document.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ProductNotFound`] if no product has this ID.
    /// - [`CatalogError::InvalidDuration`] if the duration does not parse.
    /// - [`CatalogError::MissingPrice`] / [`CatalogError::MissingUrl`] if
    ///   price or URL is blank.
    pub fn add_duration(
        &mut self,
        product: ProductId,
        raw_duration: &str,
        price: &str,
        url: &str,
    ) -> Result<DurationId> {
        let target = self.product_mut(product)?;
        let Some(key) = parse_duration(raw_duration) else {
            tracing::warn!(input = raw_duration, "rejected invalid duration");
            return Err(CatalogError::InvalidDuration {
                input: raw_duration.trim().to_owned(),
            });
        };
        let price_text = price.trim();
        if price_text.is_empty() {
            return Err(CatalogError::MissingPrice);
        }
        let url_text = url.trim();
        if url_text.is_empty() {
            return Err(CatalogError::MissingUrl);
        }

        let id = DurationId::generate();
        tracing::info!(product = %target.name, duration = %key.label(), "duration added");
        target.durations.push(Duration {
            id,
            key,
            price: price_text.to_owned(),
            url: url_text.to_owned(),
        });
        Ok(id)
    }

    /// Removes a duration from a product and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] or
    /// [`CatalogError::DurationNotFound`] if either ID is unknown.
    pub fn remove_duration(&mut self, product: ProductId, duration: DurationId) -> Result<Duration> {
        let target = self.product_mut(product)?;
        let index = target
            .durations
            .iter()
            .position(|entry| entry.id == duration)
            .ok_or(CatalogError::DurationNotFound(duration))?;
        let removed = target.durations.remove(index);
        tracing::info!(product = %target.name, duration = %removed.key.label(), "duration removed");
        Ok(removed)
    }

    /// Clears the catalog back to its empty state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
