//! Normalization of located AEM product nodes into catalog domain types.

use aemsync_core::NewProduct;
use serde_json::Value;

use crate::error::AemError;
use crate::types::ProductEntry;

/// Converts a located product leaf into a [`NewProduct`] ready for
/// persistence. `identifier` becomes the SKU, `jcr:title` the name, and the
/// price is carried as a decimal string.
///
/// # Errors
///
/// Returns [`AemError::MalformedNode`] if the node's price is neither a JSON
/// number nor a string.
pub fn normalize_product(entry: &ProductEntry) -> Result<NewProduct, AemError> {
    let price = price_string(&entry.node.price).ok_or_else(|| AemError::MalformedNode {
        path: entry.path(),
        reason: "price is neither a number nor a string".to_string(),
    })?;

    Ok(NewProduct::simple(
        entry.node.identifier.clone(),
        entry.node.title.clone(),
        price,
    ))
}

fn price_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductNode;
    use aemsync_core::products::{
        DEFAULT_ATTRIBUTE_SET_ID, STATUS_ENABLED, TYPE_SIMPLE, VISIBILITY_CATALOG_SEARCH,
    };

    fn entry_with_price(price: serde_json::Value) -> ProductEntry {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "jcr:title": "Cosmos Bike Shorts",
            "sling:resourceType": "commerce/components/product",
            "identifier": "eqbisucos",
            "price": price
        }))
        .expect("should deserialize");

        ProductEntry {
            category: "men".to_string(),
            subcategory: "shorts".to_string(),
            node,
        }
    }

    #[test]
    fn numeric_price_becomes_decimal_string() {
        let product =
            normalize_product(&entry_with_price(serde_json::json!(135.0))).expect("should map");
        assert_eq!(product.sku, "eqbisucos");
        assert_eq!(product.name, "Cosmos Bike Shorts");
        assert_eq!(product.price, "135.0");
    }

    #[test]
    fn string_price_is_passed_through() {
        let product =
            normalize_product(&entry_with_price(serde_json::json!("120.50"))).expect("should map");
        assert_eq!(product.price, "120.50");
    }

    #[test]
    fn integer_price_is_accepted() {
        let product =
            normalize_product(&entry_with_price(serde_json::json!(99))).expect("should map");
        assert_eq!(product.price, "99");
    }

    #[test]
    fn non_scalar_price_is_rejected_with_path() {
        let err = normalize_product(&entry_with_price(serde_json::json!({"amount": 10})))
            .expect_err("object price should fail");
        match err {
            AemError::MalformedNode { path, .. } => {
                assert_eq!(path, "/men/shorts/eqbisucos");
            }
            other => panic!("expected MalformedNode, got: {other:?}"),
        }
    }

    #[test]
    fn platform_defaults_are_applied() {
        let product =
            normalize_product(&entry_with_price(serde_json::json!(135.0))).expect("should map");
        assert_eq!(product.type_id, TYPE_SIMPLE);
        assert_eq!(product.visibility, VISIBILITY_CATALOG_SEARCH);
        assert_eq!(product.attribute_set_id, DEFAULT_ATTRIBUTE_SET_ID);
        assert_eq!(product.status, STATUS_ENABLED);
    }
}
