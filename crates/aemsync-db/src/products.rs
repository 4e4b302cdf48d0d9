//! Database operations for the `products` table.
//!
//! The import path is strictly create-if-missing: a SKU already present in
//! the catalog is never touched, whatever the incoming node says.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub type_id: String,
    pub visibility: i16,
    pub attribute_set_id: i16,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Returns whether a product with this SKU already exists.
///
/// Absence is an ordinary `false`, not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn product_exists(pool: &PgPool, sku: &str) -> Result<bool, DbError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE sku = $1")
        .bind(sku)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Returns a single product by SKU, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product_by_sku(pool: &PgPool, sku: &str) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, sku, name, price, type_id, visibility, attribute_set_id, status, \
                created_at, updated_at \
         FROM products \
         WHERE sku = $1",
    )
    .bind(sku)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a product unless its SKU is already present.
///
/// The price string is bound as `TEXT` and cast to `NUMERIC(12,4)` inside the
/// SQL statement so the database engine performs the coercion. The
/// `ON CONFLICT (sku) DO NOTHING` clause closes the race between an existence
/// check and the insert without ever updating an existing row.
///
/// Returns the new row's `id`, or `None` when the SKU already existed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_product_if_missing(
    pool: &PgPool,
    product: &aemsync_core::NewProduct,
) -> Result<Option<i64>, DbError> {
    let id: Option<i64> = sqlx::query_scalar::<_, i64>(
        "INSERT INTO products \
             (sku, name, price, type_id, visibility, attribute_set_id, status) \
         VALUES ($1, $2, $3::numeric(12,4), $4, $5, $6, $7) \
         ON CONFLICT (sku) DO NOTHING \
         RETURNING id",
    )
    .bind(&product.sku)
    .bind(&product.name)
    .bind(&product.price)
    .bind(&product.type_id)
    .bind(product.visibility)
    .bind(product.attribute_set_id)
    .bind(&product.status)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Returns the total number of products in the catalog.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
