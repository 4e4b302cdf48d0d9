use serde::{Deserialize, Serialize};

/// Product type for standalone items without variants.
pub const TYPE_SIMPLE: &str = "simple";

/// Visibility code for "catalog and search" on the target platform.
pub const VISIBILITY_CATALOG_SEARCH: i16 = 4;

/// The platform's default attribute set for products.
pub const DEFAULT_ATTRIBUTE_SET_ID: i16 = 4;

/// Status value for products that are live immediately after import.
pub const STATUS_ENABLED: &str = "enabled";

/// A product ready for catalog persistence, built from an AEM commerce node.
///
/// New products are created with the platform defaults below and are never
/// updated once a row with the same SKU exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Stock-keeping unit; unique key in the catalog.
    pub sku: String,
    pub name: String,
    /// Price as a decimal string, exactly as the source system exported it,
    /// e.g. `"135.0"`. Persistence casts to `NUMERIC(12,4)` at write time.
    pub price: String,
    pub type_id: String,
    pub visibility: i16,
    pub attribute_set_id: i16,
    pub status: String,
}

impl NewProduct {
    /// Builds a simple, enabled, catalog-visible product in the default
    /// attribute set: the fixed shape every imported AEM product gets.
    #[must_use]
    pub fn simple(sku: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            price: price.into(),
            type_id: TYPE_SIMPLE.to_string(),
            visibility: VISIBILITY_CATALOG_SEARCH,
            attribute_set_id: DEFAULT_ATTRIBUTE_SET_ID,
            status: STATUS_ENABLED.to_string(),
        }
    }
}
