//! Projection of a catalog into its JSON document.
//!
//! The document has a single top-level key, the trimmed reseller name:
//!
//! ```text
//! {
//!   "<reseller>": {
//!     "pfp": "<picture url>",
//!     "<product>": {
//!       "payments": ["<method>", ...],
//!       "<duration key>": { "price": "<price>", "url": "<url>" }
//!     }
//!   }
//! }
//! ```
//!
//! Object keys appear in insertion order. When two entries share a key the
//! later value replaces the earlier one and the key keeps its first
//! position.

use serde_json::{Map, Value};

use crate::models::{Duration, Product, ResellerCatalog};

/// Document produced while the reseller name is blank.
pub const EMPTY_DOCUMENT: &str = "{}";

/// Field holding the profile picture URL.
const PFP_FIELD: &str = "pfp";
/// Field holding a product's payment methods.
const PAYMENTS_FIELD: &str = "payments";
/// Field holding a duration's price.
const PRICE_FIELD: &str = "price";
/// Field holding a duration's purchase URL.
const URL_FIELD: &str = "url";

/// Builds the ordered document tree for a catalog.
///
/// Returns an empty object if the trimmed reseller name is empty.
#[must_use]
pub fn project(catalog: &ResellerCatalog) -> Value {
    let name = catalog.reseller_name();
    let mut root = Map::new();
    if name.is_empty() {
        return Value::Object(root);
    }

    let mut reseller = Map::new();
    let _pfp = reseller.insert(
        PFP_FIELD.to_owned(),
        Value::String(catalog.profile_picture_url().to_owned()),
    );
    for product in &catalog.products {
        let _replaced = reseller.insert(product.name.to_lowercase(), project_product(product));
    }
    let _reseller = root.insert(name.to_owned(), Value::Object(reseller));
    Value::Object(root)
}

/// Renders the catalog document as JSON indented by two spaces.
///
/// A blank reseller name yields exactly [`EMPTY_DOCUMENT`]. Calling this
/// again on an unchanged catalog yields the same text.
///
/// # Examples
///
/// ```
/// use reseller_catalog::models::ResellerCatalog;
/// use reseller_catalog::projection::project_to_json;
///
/// let mut catalog = ResellerCatalog::new();
/// assert_eq!(project_to_json(&catalog), "{}");
///
/// catalog.set_reseller_name("Voxlis");
/// catalog.set_profile_picture_url("http://x");
/// assert_eq!(
///     project_to_json(&catalog),
///     "{\n  \"Voxlis\": {\n    \"pfp\": \"http://x\"\n  }\n}"
/// );
/// ```
#[must_use]
pub fn project_to_json(catalog: &ResellerCatalog) -> String {
    if catalog.reseller_name().is_empty() {
        return EMPTY_DOCUMENT.to_owned();
    }
    match serde_json::to_string_pretty(&project(catalog)) {
        Ok(json) => json,
        Err(err) => {
            // A tree of strings and arrays always serializes.
            tracing::error!(error = %err, "failed to render catalog document");
            EMPTY_DOCUMENT.to_owned()
        }
    }
}

/// Builds one product's object: payments first, then durations.
fn project_product(product: &Product) -> Value {
    let mut details = Map::new();
    let payments = product
        .payments
        .iter()
        .map(|method| Value::String(method.as_str().to_owned()))
        .collect();
    let _payments = details.insert(PAYMENTS_FIELD.to_owned(), Value::Array(payments));
    for duration in &product.durations {
        let _replaced = details.insert(duration.key.as_str().to_owned(), project_duration(duration));
    }
    Value::Object(details)
}

/// Builds one duration's `{ price, url }` object.
fn project_duration(duration: &Duration) -> Value {
    let mut entry = Map::new();
    let _price = entry.insert(PRICE_FIELD.to_owned(), Value::String(duration.price.clone()));
    let _url = entry.insert(URL_FIELD.to_owned(), Value::String(duration.url.clone()));
    Value::Object(entry)
}
