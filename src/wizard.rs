//! Three-step catalog wizard.
//!
//! [`Wizard`] owns the session state: the [`ResellerCatalog`] being built,
//! the current [`Step`], the product draft (a selected preset and the
//! payment methods toggled for it), and an optional payment edit session
//! for a product that is already in the catalog. A front end drives it
//! with user input and renders [`Wizard::json`] after every change.
//!
//! Steps are gated: leaving [`Step::Reseller`] needs a reseller name and
//! picture URL, and reaching [`Step::Review`] needs at least one product.
//! Moving back is always allowed.

use crate::error::{CatalogError, Result};
use crate::models::{Duration, DurationId, PaymentMethod, Product, ProductId, ResellerCatalog, Step};
use crate::presets::{ProductPreset, find_preset};
use crate::projection::project_to_json;

/// Product being assembled before it is added to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Selected preset, if any.
    pub preset: Option<&'static ProductPreset>,
    /// Toggled payment methods, in selection order.
    pub payments: Vec<PaymentMethod>,
}

impl ProductDraft {
    /// Returns `true` when a preset and at least one payment are chosen.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.preset.is_some() && !self.payments.is_empty()
    }
}

/// Uncommitted edit of an existing product's payment methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEdit {
    /// Product being edited.
    pub product: ProductId,
    /// Working copy of the payment methods.
    pub payments: Vec<PaymentMethod>,
}

/// Interactive catalog session.
#[derive(Debug, Clone)]
pub struct Wizard {
    /// Catalog under construction.
    catalog: ResellerCatalog,
    /// Current step.
    step: Step,
    /// Pending product selection.
    draft: ProductDraft,
    /// Open payment edit, if any.
    payment_edit: Option<PaymentEdit>,
}

impl Default for Wizard {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Creates a wizard at step 1 with an empty catalog.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: ResellerCatalog::new(),
            step: Step::Reseller,
            draft: ProductDraft::default(),
            payment_edit: None,
        }
    }

    /// Catalog built so far.
    #[inline]
    #[must_use]
    pub const fn catalog(&self) -> &ResellerCatalog {
        &self.catalog
    }

    /// Current step.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Pending product selection.
    #[inline]
    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Open payment edit, if any.
    #[inline]
    #[must_use]
    pub const fn payment_edit(&self) -> Option<&PaymentEdit> {
        self.payment_edit.as_ref()
    }

    /// Current JSON document, recomputed from the catalog.
    #[inline]
    #[must_use]
    pub fn json(&self) -> String {
        project_to_json(&self.catalog)
    }

    // ── Step 1: reseller ─────────────────────────────────────────────

    /// Sets the reseller name.
    #[inline]
    pub fn set_reseller_name<T: Into<String>>(&mut self, name: T) {
        self.catalog.set_reseller_name(name);
    }

    /// Sets the reseller profile picture URL.
    #[inline]
    pub fn set_profile_picture_url<T: Into<String>>(&mut self, url: T) {
        self.catalog.set_profile_picture_url(url);
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Returns `true` if the wizard may move forward out of `step`.
    #[must_use]
    pub fn can_leave(&self, step: Step) -> bool {
        match step {
            Step::Reseller => self.catalog.has_reseller_info(),
            Step::Products => !self.catalog.products.is_empty(),
            Step::Review => false,
        }
    }

    /// Moves to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::StepLocked`] if moving forward past a step
    /// whose requirements are not met. The step is left unchanged.
    pub fn go_to(&mut self, target: Step) -> Result<()> {
        let mut cursor = self.step;
        while cursor < target {
            if !self.can_leave(cursor) {
                return Err(CatalogError::StepLocked {
                    from: self.step,
                    to: target,
                });
            }
            cursor = cursor.next().unwrap_or(target);
        }
        tracing::debug!(from = %self.step, to = %target, "changed step");
        self.step = target;
        Ok(())
    }

    /// Moves to the next step and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::StepLocked`] if the current step is
    /// incomplete or already the last one.
    pub fn advance(&mut self) -> Result<Step> {
        let target = self.step.next().ok_or(CatalogError::StepLocked {
            from: self.step,
            to: self.step,
        })?;
        self.go_to(target)?;
        Ok(target)
    }

    /// Moves to the previous step (if any) and returns the current step.
    #[inline]
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    // ── Step 2: product draft ────────────────────────────────────────

    /// Selects a preset product for the draft.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if no preset has this name.
    pub fn select_product(&mut self, name: &str) -> Result<&'static ProductPreset> {
        let preset =
            find_preset(name).ok_or_else(|| CatalogError::UnknownProduct(name.to_owned()))?;
        self.draft.preset = Some(preset);
        Ok(preset)
    }

    /// Toggles a payment method in the draft; returns `true` if now selected.
    #[inline]
    pub fn toggle_payment(&mut self, method: PaymentMethod) -> bool {
        toggle(&mut self.draft.payments, method)
    }

    /// Returns `true` if [`Wizard::add_product`] would accept the draft.
    #[inline]
    #[must_use]
    pub fn can_add_product(&self) -> bool {
        self.draft.is_complete()
    }

    /// Commits the draft as a new product and clears the draft.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingResellerInfo`] if step 1 is incomplete.
    /// - [`CatalogError::NoProductSelected`] or
    ///   [`CatalogError::MissingPayments`] if the draft is incomplete.
    /// - [`CatalogError::DuplicateProduct`] if the product is already in
    ///   the catalog. The draft is kept.
    #[tracing::instrument(skip_all)]
    pub fn add_product(&mut self) -> Result<ProductId> {
        if !self.catalog.has_reseller_info() {
            return Err(CatalogError::MissingResellerInfo);
        }
        let preset = self.draft.preset.ok_or(CatalogError::NoProductSelected)?;
        let id = self
            .catalog
            .add_product(preset.name, preset.image_url, self.draft.payments.clone())?;
        self.draft = ProductDraft::default();
        Ok(id)
    }

    /// Removes a product, closing any payment edit open on it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this ID.
    pub fn remove_product(&mut self, id: ProductId) -> Result<Product> {
        let removed = self.catalog.remove_product(id)?;
        if self
            .payment_edit
            .as_ref()
            .is_some_and(|edit| edit.product == id)
        {
            self.payment_edit = None;
        }
        Ok(removed)
    }

    // ── Step 2: payment editing ──────────────────────────────────────

    /// Opens a payment edit on a product, starting from its current methods.
    ///
    /// Any other open edit is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this ID.
    pub fn begin_payment_edit(&mut self, id: ProductId) -> Result<()> {
        let product = self
            .catalog
            .product(id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        self.payment_edit = Some(PaymentEdit {
            product: id,
            payments: product.payments.clone(),
        });
        Ok(())
    }

    /// Toggles a method in the open edit; returns `true` if now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoPaymentEdit`] if no edit is open.
    pub fn toggle_edit_payment(&mut self, method: PaymentMethod) -> Result<bool> {
        let edit = self.payment_edit.as_mut().ok_or(CatalogError::NoPaymentEdit)?;
        Ok(toggle(&mut edit.payments, method))
    }

    /// Commits the open edit, replacing the product's payment methods.
    ///
    /// The edited list may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoPaymentEdit`] if no edit is open, or
    /// [`CatalogError::ProductNotFound`] if the product is gone.
    #[tracing::instrument(skip_all)]
    pub fn save_payment_edit(&mut self) -> Result<ProductId> {
        let edit = self.payment_edit.take().ok_or(CatalogError::NoPaymentEdit)?;
        self.catalog.set_payments(edit.product, edit.payments)?;
        Ok(edit.product)
    }

    /// Discards the open edit; returns `true` if one was open.
    #[inline]
    pub fn cancel_payment_edit(&mut self) -> bool {
        let cancelled = self.payment_edit.take().is_some();
        if cancelled {
            tracing::debug!("payment edit discarded");
        }
        cancelled
    }

    // ── Step 2: durations ────────────────────────────────────────────

    /// Parses and adds a priced duration to a product.
    ///
    /// # Errors
    ///
    /// See [`ResellerCatalog::add_duration`].
    #[tracing::instrument(skip(self))]
    pub fn add_duration(
        &mut self,
        product: ProductId,
        raw_duration: &str,
        price: &str,
        url: &str,
    ) -> Result<DurationId> {
        self.catalog.add_duration(product, raw_duration, price, url)
    }

    /// Removes a duration from a product.
    ///
    /// # Errors
    ///
    /// See [`ResellerCatalog::remove_duration`].
    #[inline]
    pub fn remove_duration(&mut self, product: ProductId, duration: DurationId) -> Result<Duration> {
        self.catalog.remove_duration(product, duration)
    }

    // ── Reset ────────────────────────────────────────────────────────

    /// Returns to step 1 with an empty catalog and no drafts.
    #[tracing::instrument(skip_all)]
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::info!("wizard reset");
    }
}

/// Adds `method` if absent, removes it if present; returns `true` if added.
fn toggle(payments: &mut Vec<PaymentMethod>, method: PaymentMethod) -> bool {
    if let Some(index) = payments.iter().position(|&selected| selected == method) {
        let _removed = payments.remove(index);
        false
    } else {
        payments.push(method);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard_on_products() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.set_reseller_name("Voxlis");
        wizard.set_profile_picture_url("http://x");
        let _step = wizard.advance().unwrap();
        wizard
    }

    fn add_wave(wizard: &mut Wizard) -> ProductId {
        let _preset = wizard.select_product("Wave").unwrap();
        let _selected = wizard.toggle_payment(PaymentMethod::Crypto);
        let _selected = wizard.toggle_payment(PaymentMethod::Paypal);
        wizard.add_product().unwrap()
    }

    #[test]
    fn starts_empty_on_step_one() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), Step::Reseller);
        assert_eq!(wizard.json(), "{}");
        assert!(wizard.payment_edit().is_none());
        assert!(!wizard.can_add_product());
    }

    #[test]
    fn step_one_requires_name_and_picture() {
        let mut wizard = Wizard::new();
        wizard.set_reseller_name("Voxlis");
        let err = wizard.advance().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::StepLocked { from: Step::Reseller, to: Step::Products }
        ));
        assert_eq!(wizard.step(), Step::Reseller);

        wizard.set_profile_picture_url("http://x");
        assert_eq!(wizard.advance().unwrap(), Step::Products);
    }

    #[test]
    fn json_updates_while_typing_reseller_name() {
        let mut wizard = Wizard::new();
        wizard.set_reseller_name("Vox");
        assert_eq!(wizard.json(), "{\n  \"Vox\": {\n    \"pfp\": \"\"\n  }\n}");
    }

    #[test]
    fn review_requires_a_product() {
        let mut wizard = wizard_on_products();
        assert!(matches!(
            wizard.advance(),
            Err(CatalogError::StepLocked { from: Step::Products, to: Step::Review })
        ));
        let _wave = add_wave(&mut wizard);
        assert_eq!(wizard.advance().unwrap(), Step::Review);
        assert!(wizard.advance().is_err());
    }

    #[test]
    fn jumping_forward_checks_every_step() {
        let mut wizard = Wizard::new();
        wizard.set_reseller_name("Voxlis");
        wizard.set_profile_picture_url("http://x");
        assert!(wizard.go_to(Step::Review).is_err());
        assert_eq!(wizard.step(), Step::Reseller);
        let _wave = add_wave(&mut wizard);
        wizard.go_to(Step::Review).unwrap();
        assert_eq!(wizard.step(), Step::Review);
    }

    #[test]
    fn back_is_always_allowed() {
        let mut wizard = wizard_on_products();
        wizard.set_reseller_name("");
        assert_eq!(wizard.back(), Step::Reseller);
        assert_eq!(wizard.back(), Step::Reseller);
        wizard.go_to(Step::Reseller).unwrap();
    }

    #[test]
    fn add_product_from_draft_clears_draft() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        let product = wizard.catalog().product(wave).unwrap();
        assert_eq!(product.name, "wave");
        assert_eq!(product.image_url, "images/wave.png");
        assert_eq!(product.payments, vec![PaymentMethod::Crypto, PaymentMethod::Paypal]);
        assert_eq!(wizard.draft(), &ProductDraft::default());
    }

    #[test]
    fn add_product_checks_draft() {
        let mut wizard = wizard_on_products();
        assert!(matches!(wizard.add_product(), Err(CatalogError::NoProductSelected)));
        let _preset = wizard.select_product("zenith").unwrap();
        assert!(matches!(wizard.add_product(), Err(CatalogError::MissingPayments)));
        assert!(wizard.catalog().products.is_empty());
    }

    #[test]
    fn add_product_requires_reseller_info() {
        let mut wizard = Wizard::new();
        let _preset = wizard.select_product("Wave").unwrap();
        let _selected = wizard.toggle_payment(PaymentMethod::Crypto);
        assert!(wizard.can_add_product());
        assert!(matches!(wizard.add_product(), Err(CatalogError::MissingResellerInfo)));
    }

    #[test]
    fn select_unknown_product_fails() {
        let mut wizard = wizard_on_products();
        assert!(matches!(
            wizard.select_product("Synapse"),
            Err(CatalogError::UnknownProduct(name)) if name == "Synapse"
        ));
        assert!(wizard.draft().preset.is_none());
    }

    #[test]
    fn duplicate_product_keeps_count_and_draft() {
        let mut wizard = wizard_on_products();
        let _wave = add_wave(&mut wizard);
        let _preset = wizard.select_product("WAVE").unwrap();
        let _selected = wizard.toggle_payment(PaymentMethod::Stripe);
        assert!(matches!(
            wizard.add_product(),
            Err(CatalogError::DuplicateProduct { .. })
        ));
        assert_eq!(wizard.catalog().products.len(), 1);
        assert!(wizard.draft().is_complete());
    }

    #[test]
    fn toggle_payment_preserves_order() {
        let mut wizard = wizard_on_products();
        assert!(wizard.toggle_payment(PaymentMethod::Venmo));
        assert!(wizard.toggle_payment(PaymentMethod::Crypto));
        assert!(!wizard.toggle_payment(PaymentMethod::Venmo));
        assert!(wizard.toggle_payment(PaymentMethod::Venmo));
        assert_eq!(
            wizard.draft().payments,
            vec![PaymentMethod::Crypto, PaymentMethod::Venmo]
        );
    }

    #[test]
    fn payment_edit_save() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        wizard.begin_payment_edit(wave).unwrap();
        assert!(!wizard.toggle_edit_payment(PaymentMethod::Crypto).unwrap());
        assert!(wizard.toggle_edit_payment(PaymentMethod::BankTransfer).unwrap());
        // Uncommitted edits leave the catalog alone.
        assert_eq!(
            wizard.catalog().product(wave).unwrap().payments,
            vec![PaymentMethod::Crypto, PaymentMethod::Paypal]
        );
        assert_eq!(wizard.save_payment_edit().unwrap(), wave);
        assert_eq!(
            wizard.catalog().product(wave).unwrap().payments,
            vec![PaymentMethod::Paypal, PaymentMethod::BankTransfer]
        );
        assert!(wizard.payment_edit().is_none());
    }

    #[test]
    fn payment_edit_may_save_empty_set() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        wizard.begin_payment_edit(wave).unwrap();
        let _removed = wizard.toggle_edit_payment(PaymentMethod::Crypto).unwrap();
        let _removed = wizard.toggle_edit_payment(PaymentMethod::Paypal).unwrap();
        let _saved = wizard.save_payment_edit().unwrap();
        assert!(wizard.catalog().product(wave).unwrap().payments.is_empty());
        assert!(wizard.json().contains("\"payments\": []"));
    }

    #[test]
    fn payment_edit_cancel() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        wizard.begin_payment_edit(wave).unwrap();
        let _added = wizard.toggle_edit_payment(PaymentMethod::Venmo).unwrap();
        assert!(wizard.cancel_payment_edit());
        assert!(!wizard.cancel_payment_edit());
        assert_eq!(wizard.catalog().product(wave).unwrap().payments.len(), 2);
        assert!(matches!(wizard.save_payment_edit(), Err(CatalogError::NoPaymentEdit)));
        assert!(matches!(
            wizard.toggle_edit_payment(PaymentMethod::Venmo),
            Err(CatalogError::NoPaymentEdit)
        ));
    }

    #[test]
    fn removing_product_closes_its_edit() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        wizard.begin_payment_edit(wave).unwrap();
        let removed = wizard.remove_product(wave).unwrap();
        assert_eq!(removed.name, "wave");
        assert!(wizard.payment_edit().is_none());
        assert!(matches!(
            wizard.begin_payment_edit(wave),
            Err(CatalogError::ProductNotFound(_))
        ));
    }

    #[test]
    fn durations_flow_into_json() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        let week = wizard.add_duration(wave, "7 days", "9.99", "http://y").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&wizard.json()).unwrap();
        assert_eq!(parsed["Voxlis"]["wave"]["7"]["price"], "9.99");

        let _removed = wizard.remove_duration(wave, week).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&wizard.json()).unwrap();
        assert!(parsed["Voxlis"]["wave"].get("7").is_none());
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut wizard = wizard_on_products();
        let wave = add_wave(&mut wizard);
        wizard.begin_payment_edit(wave).unwrap();
        let _preset = wizard.select_product("Bunni").unwrap();
        wizard.go_to(Step::Review).unwrap();
        wizard.reset();
        assert_eq!(wizard.step(), Step::Reseller);
        assert_eq!(wizard.catalog(), &ResellerCatalog::default());
        assert_eq!(wizard.draft(), &ProductDraft::default());
        assert!(wizard.payment_edit().is_none());
        assert_eq!(wizard.json(), "{}");
    }
}
