//! Fixed-depth traversal of the AEM export tree.
//!
//! The export convention is two folder levels (category, then subcategory)
//! with product leaves inside the subcategory folders. The walker is a small
//! recursive visitor keyed on the `jcr:primaryType` tag with the maximum
//! folder depth as an explicit constant, so the shape assumption lives in one
//! place instead of hand-unrolled loops.

use serde_json::Value;

use crate::error::AemError;
use crate::types::{ProductEntry, ProductNode, PRIMARY_TYPE_FOLDER, RESOURCE_TYPE_PRODUCT};

/// Folder nesting levels descended below the document root. Folders nested
/// deeper than this are not walked; their contents never become products.
const MAX_FOLDER_DEPTH: usize = 2;

/// Collects every product leaf from an `.infinity.json` document.
///
/// Only nodes sitting directly inside a subcategory folder (folder depth 2)
/// whose `sling:resourceType` is `commerce/components/product` are returned.
/// Non-folder siblings and scalar `jcr:*` properties are skipped silently.
///
/// # Errors
///
/// Returns [`AemError::MalformedNode`] if the document root is not a JSON
/// object, or [`AemError::Deserialize`] if a product-typed leaf does not
/// match the expected shape (for example a missing `identifier`).
pub fn collect_product_entries(root: &Value) -> Result<Vec<ProductEntry>, AemError> {
    let map = root.as_object().ok_or_else(|| AemError::MalformedNode {
        path: "/".to_string(),
        reason: "document root is not a JSON object".to_string(),
    })?;

    let mut entries = Vec::new();
    for (name, child) in map {
        if is_folder(child) {
            visit_folder(&mut vec![name.clone()], child, &mut entries)?;
        }
    }
    Ok(entries)
}

/// Walks one folder node. `names` holds the folder names entered so far, so
/// `names.len() - 1` is the depth of the current folder (0 = category,
/// 1 = subcategory).
fn visit_folder(
    names: &mut Vec<String>,
    folder: &Value,
    entries: &mut Vec<ProductEntry>,
) -> Result<(), AemError> {
    let depth = names.len() - 1;
    // is_folder established this is an object.
    let Some(children) = folder.as_object() else {
        return Ok(());
    };

    for (child_name, child) in children {
        if !child.is_object() {
            continue;
        }
        if depth < MAX_FOLDER_DEPTH - 1 {
            if is_folder(child) {
                names.push(child_name.clone());
                visit_folder(names, child, entries)?;
                names.pop();
            }
        } else if is_product(child) {
            let path = format!("/{}/{child_name}", names.join("/"));
            let node: ProductNode =
                serde_json::from_value(child.clone()).map_err(|e| AemError::Deserialize {
                    context: path,
                    source: e,
                })?;
            entries.push(ProductEntry {
                category: names[0].clone(),
                subcategory: names[1].clone(),
                node,
            });
        }
    }
    Ok(())
}

fn is_folder(value: &Value) -> bool {
    value.get("jcr:primaryType").and_then(Value::as_str) == Some(PRIMARY_TYPE_FOLDER)
}

fn is_product(value: &Value) -> bool {
    value.get("sling:resourceType").and_then(Value::as_str) == Some(RESOURCE_TYPE_PRODUCT)
}
