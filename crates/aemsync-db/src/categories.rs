//! Database operations for the `categories` table.
//!
//! Categories keep their children as a comma-separated id list (the source
//! platform's convention), so child lookup walks that list in stored order.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    /// Slash-joined id path from the root, e.g. `"1/2/3"`.
    pub path: String,
    /// Comma-separated child category ids, e.g. `"3,4,5"`. `NULL` for leaves.
    pub children: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryRow {
    /// Parses the comma-separated `children` list into ids, preserving order.
    /// Blank segments and non-numeric junk are dropped.
    #[must_use]
    pub fn child_ids(&self) -> Vec<i64> {
        self.children
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    }
}

/// Returns a single category by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_category_by_id(pool: &PgPool, id: i64) -> Result<Option<CategoryRow>, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, name, path, children, created_at, updated_at \
         FROM categories \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns the first child of `parent` whose name equals `name`
/// case-insensitively, following the stored child order.
///
/// Children referenced in the list but missing from the table are skipped.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a lookup fails.
pub async fn get_child_category_by_name(
    pool: &PgPool,
    parent: &CategoryRow,
    name: &str,
) -> Result<Option<CategoryRow>, DbError> {
    let mut children = Vec::new();
    for child_id in parent.child_ids() {
        if let Some(child) = get_category_by_id(pool, child_id).await? {
            tracing::debug!(id = child.id, name = %child.name, "child category");
            children.push(child);
        }
    }

    Ok(select_child_by_name(&children, name).cloned())
}

/// Picks the first category whose name matches `name` case-insensitively.
///
/// Category names are platform slugs and ASCII in practice, so ASCII folding
/// is the comparison used.
fn select_child_by_name<'a>(children: &'a [CategoryRow], name: &str) -> Option<&'a CategoryRow> {
    children
        .iter()
        .find(|child| child.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: i64, name: &str, children: Option<&str>) -> CategoryRow {
        CategoryRow {
            id,
            name: name.to_string(),
            path: format!("1/2/{id}"),
            children: children.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn child_ids_parses_comma_separated_list() {
        let parent = category(2, "Default Category", Some("3,4,5"));
        assert_eq!(parent.child_ids(), vec![3, 4, 5]);
    }

    #[test]
    fn child_ids_tolerates_whitespace_and_junk() {
        let parent = category(2, "Default Category", Some(" 3, x,5 ,"));
        assert_eq!(parent.child_ids(), vec![3, 5]);
    }

    #[test]
    fn child_ids_empty_when_no_children() {
        let leaf = category(3, "Men", None);
        assert!(leaf.child_ids().is_empty());
    }

    #[test]
    fn select_child_matches_case_insensitively() {
        let children = vec![
            category(3, "Men", None),
            category(4, "Women", None),
            category(5, "Gear", None),
        ];

        let found = select_child_by_name(&children, "men").expect("should match 'Men'");
        assert_eq!(found.id, 3);

        let found = select_child_by_name(&children, "WOMEN").expect("should match 'Women'");
        assert_eq!(found.id, 4);
    }

    #[test]
    fn select_child_returns_first_match_in_stored_order() {
        let children = vec![
            category(7, "Sale", None),
            category(8, "sale", None),
        ];

        let found = select_child_by_name(&children, "SALE").expect("should match");
        assert_eq!(found.id, 7);
    }

    #[test]
    fn select_child_returns_none_when_absent() {
        let children = vec![category(3, "Men", None), category(4, "Women", None)];
        assert!(select_child_by_name(&children, "kids").is_none());
    }
}
