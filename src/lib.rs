//! Reseller product catalog builder.
//!
//! This crate assembles the JSON document describing a reseller's products,
//! accepted payment methods and priced durations. It provides the duration
//! parser, the catalog state with its insertion-time checks, the ordered
//! JSON projection, and a step-by-step [`wizard::Wizard`] session that a
//! front end can drive.
//!
//! ```
//! use reseller_catalog::duration_parser::parse_duration_token;
//! use reseller_catalog::models::{PaymentMethod, ResellerCatalog};
//! use reseller_catalog::projection::project_to_json;
//!
//! assert_eq!(parse_duration_token("2 years"), "730");
//!
//! let mut catalog = ResellerCatalog::new();
//! catalog.set_reseller_name("Voxlis");
//! catalog.set_profile_picture_url("http://x");
//! let wave = catalog
//!     .add_product("Wave", "images/wave.png", vec![PaymentMethod::Crypto])
//!     .unwrap();
//! catalog.add_duration(wave, "lifetime", "25", "http://y").unwrap();
//! assert!(project_to_json(&catalog).contains("\"lifetime\": {"));
//! ```

pub mod duration_parser;
pub mod error;
pub mod models;
pub mod presets;
pub mod projection;
pub mod wizard;
