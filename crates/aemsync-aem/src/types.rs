//! Wire types for AEM `.infinity.json` exports.
//!
//! The export is a single nested JSON object. Container nodes carry
//! `"jcr:primaryType": "sling:Folder"`; commerce product leaves carry
//! `"sling:resourceType": "commerce/components/product"`. Scalar `jcr:*`
//! properties sit alongside child nodes in the same object.

use serde::Deserialize;

/// `jcr:primaryType` value marking a node as a container (category level).
pub const PRIMARY_TYPE_FOLDER: &str = "sling:Folder";

/// `sling:resourceType` value marking a node as a commerce product leaf.
pub const RESOURCE_TYPE_PRODUCT: &str = "commerce/components/product";

/// A commerce product leaf as exported by AEM.
///
/// `identifier` and `jcr:title` are required: a product node missing either
/// aborts the import rather than silently producing a broken catalog row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductNode {
    #[serde(rename = "jcr:primaryType", default)]
    pub primary_type: Option<String>,
    /// Display name of the product.
    #[serde(rename = "jcr:title")]
    pub title: String,
    #[serde(rename = "sling:resourceType")]
    pub resource_type: String,
    /// SKU in the target catalog.
    pub identifier: String,
    /// AEM exports `price` as a JSON number or as a string property,
    /// depending on how the node was authored. Normalization accepts both.
    pub price: serde_json::Value,
}

/// A product leaf located by the tree walker, together with the names of the
/// two folder levels above it.
#[derive(Debug, Clone)]
pub struct ProductEntry {
    pub category: String,
    pub subcategory: String,
    pub node: ProductNode,
}

impl ProductEntry {
    /// Slash-joined location of the node inside the export, for error
    /// messages and logs.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "/{}/{}/{}",
            self.category, self.subcategory, self.node.identifier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_node_deserializes_from_export_shape() {
        let json = serde_json::json!({
            "jcr:primaryType": "nt:unstructured",
            "jcr:title": "Cosmos Bike Shorts",
            "sling:resourceType": "commerce/components/product",
            "identifier": "eqbisucos",
            "price": 135.0
        });

        let node: ProductNode = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(node.primary_type.as_deref(), Some("nt:unstructured"));
        assert_eq!(node.title, "Cosmos Bike Shorts");
        assert_eq!(node.resource_type, RESOURCE_TYPE_PRODUCT);
        assert_eq!(node.identifier, "eqbisucos");
        assert!(node.price.is_number());
    }

    #[test]
    fn product_node_requires_identifier() {
        let json = serde_json::json!({
            "jcr:title": "No Sku",
            "sling:resourceType": "commerce/components/product",
            "price": "10.00"
        });

        let result: Result<ProductNode, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn entry_path_joins_folder_names_and_sku() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "jcr:title": "Trail Jacket",
            "sling:resourceType": "commerce/components/product",
            "identifier": "trail-1",
            "price": "89.99"
        }))
        .expect("should deserialize");

        let entry = ProductEntry {
            category: "men".to_string(),
            subcategory: "jackets".to_string(),
            node,
        };
        assert_eq!(entry.path(), "/men/jackets/trail-1");
    }
}
