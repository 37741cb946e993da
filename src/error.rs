//! Error types for reseller catalog operations.

use crate::models::{DurationId, DurationKey, ProductId, Step};

/// Errors raised when a catalog mutation or wizard transition is rejected.
///
/// Duration parsing and JSON projection never fail; every variant here
/// belongs to a commit that the caller should block and report.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reseller name or profile picture URL is blank.
    #[error("reseller name and profile picture URL are required")]
    MissingResellerInfo,

    /// A product must carry at least one payment method.
    #[error("select at least one payment method")]
    MissingPayments,

    /// No product has been selected in the draft.
    #[error("select a product first")]
    NoProductSelected,

    /// The named product is not one of the selectable presets.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A product with the same (case-insensitive) name already exists.
    #[error("product '{name}' is already in the catalog")]
    DuplicateProduct {
        /// Lower-cased name of the rejected product.
        name: String,
    },

    /// The duration text matched none of the accepted forms.
    #[error("invalid duration '{input}' (expected e.g. '7 days', '1 month', 'lifetime', '30')")]
    InvalidDuration {
        /// Raw input as entered.
        input: String,
    },

    /// Duration price is blank.
    #[error("duration price is required")]
    MissingPrice,

    /// Duration purchase URL is blank.
    #[error("duration URL is required")]
    MissingUrl,

    /// No product with this identifier exists.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// No duration with this identifier exists on the product.
    #[error("duration not found: {0}")]
    DurationNotFound(DurationId),

    /// The product has no duration with this key.
    #[error("product '{product}' has no '{key}' duration")]
    DurationKeyNotFound {
        /// Product name.
        product: String,
        /// Canonical duration key.
        key: DurationKey,
    },

    /// Payment token outside the fixed set.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// No payment edit session is open.
    #[error("no payment edit in progress")]
    NoPaymentEdit,

    /// The wizard cannot move between these steps yet.
    #[error("cannot move from {from} to {to}")]
    StepLocked {
        /// Current step.
        from: Step,
        /// Requested step.
        to: Step,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results using [`CatalogError`].
pub type Result<T> = core::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = CatalogError::from(serde_err);
        assert!(matches!(err, CatalogError::Serialization(_)));
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn error_from_io() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = CatalogError::from(inner);
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn duplicate_product_display_names_product() {
        let err = CatalogError::DuplicateProduct {
            name: "wave".to_owned(),
        };
        assert_eq!(err.to_string(), "product 'wave' is already in the catalog");
    }

    #[test]
    fn invalid_duration_display_echoes_input() {
        let err = CatalogError::InvalidDuration {
            input: "soon".to_owned(),
        };
        assert!(err.to_string().contains("'soon'"));
    }

    #[test]
    fn duration_key_not_found_display() {
        let err = CatalogError::DurationKeyNotFound {
            product: "wave".to_owned(),
            key: DurationKey::LIFETIME,
        };
        assert_eq!(err.to_string(), "product 'wave' has no 'lifetime' duration");
    }

    #[test]
    fn step_locked_display() {
        let err = CatalogError::StepLocked {
            from: Step::Reseller,
            to: Step::Products,
        };
        assert_eq!(err.to_string(), "cannot move from reseller to products");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogError>();
    }
}
