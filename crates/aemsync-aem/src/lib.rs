//! Client and traversal logic for AEM commerce exports.
//!
//! AEM publishes a content subtree as one nested JSON document via the
//! `.infinity.json` selector. This crate fetches that document with basic
//! credentials, walks the folder tree to locate product leaves, and
//! normalizes them into catalog-ready [`aemsync_core::NewProduct`] values.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;
pub mod walker;

pub use client::AemClient;
pub use error::AemError;
pub use normalize::normalize_product;
pub use types::{ProductEntry, ProductNode, PRIMARY_TYPE_FOLDER, RESOURCE_TYPE_PRODUCT};
pub use walker::collect_product_entries;
