//! Enumeration types for constrained catalog values.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Payment method a reseller accepts for a product.
///
/// Serializes to the exact token used in the catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cryptocurrency.
    Crypto,
    /// `PayPal`.
    Paypal,
    /// Stripe checkout.
    Stripe,
    /// Cash App.
    Cashapp,
    /// Venmo.
    Venmo,
    /// Direct bank transfer.
    #[serde(rename = "bank transfer")]
    BankTransfer,
}

impl PaymentMethod {
    /// Every payment method, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Crypto,
        Self::Paypal,
        Self::Stripe,
        Self::Cashapp,
        Self::Venmo,
        Self::BankTransfer,
    ];

    /// Returns the token written into the catalog document.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crypto => "crypto",
            Self::Paypal => "paypal",
            Self::Stripe => "stripe",
            Self::Cashapp => "cashapp",
            Self::Venmo => "venmo",
            Self::BankTransfer => "bank transfer",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = CatalogError;

    /// Parses a token case-insensitively, ignoring surrounding whitespace.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownPaymentMethod(wanted.to_owned()))
    }
}

/// Wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Step 1: reseller name and profile picture.
    Reseller,
    /// Step 2: products, payments and durations.
    Products,
    /// Step 3: review and copy the generated JSON.
    Review,
}

impl Step {
    /// One-based step number.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Reseller => 1,
            Self::Products => 2,
            Self::Review => 3,
        }
    }

    /// Step after this one, if any.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Reseller => Some(Self::Products),
            Self::Products => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Step before this one, if any.
    #[inline]
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Reseller => None,
            Self::Products => Some(Self::Reseller),
            Self::Review => Some(Self::Products),
        }
    }
}

impl core::fmt::Display for Step {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match *self {
            Self::Reseller => "reseller",
            Self::Products => "products",
            Self::Review => "review",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_serializes_to_token() {
        let json = serde_json::to_string(&PaymentMethod::Paypal).unwrap();
        assert_eq!(json, r#""paypal""#);
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, r#""bank transfer""#);
    }

    #[test]
    fn payment_method_deserializes_token() {
        let method: PaymentMethod = serde_json::from_str(r#""bank transfer""#).unwrap();
        assert_eq!(method, PaymentMethod::BankTransfer);
        let method: PaymentMethod = serde_json::from_str(r#""cashapp""#).unwrap();
        assert_eq!(method, PaymentMethod::Cashapp);
    }

    #[test]
    fn serde_token_matches_as_str() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
    }

    #[test]
    fn parse_payment_method_is_case_insensitive() {
        assert_eq!(
            "  Bank Transfer ".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert_eq!("CRYPTO".parse::<PaymentMethod>().unwrap(), PaymentMethod::Crypto);
    }

    #[test]
    fn parse_unknown_payment_method_fails() {
        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownPaymentMethod(s) if s == "cheque"));
    }

    #[test]
    fn invalid_payment_token_fails_deserialize() {
        assert!(serde_json::from_str::<PaymentMethod>(r#""Crypto""#).is_err());
    }

    #[test]
    fn step_navigation() {
        assert_eq!(Step::Reseller.next(), Some(Step::Products));
        assert_eq!(Step::Products.next(), Some(Step::Review));
        assert_eq!(Step::Review.next(), None);
        assert_eq!(Step::Reseller.previous(), None);
        assert_eq!(Step::Review.previous(), Some(Step::Products));
        assert_eq!(Step::Review.number(), 3);
    }
}
