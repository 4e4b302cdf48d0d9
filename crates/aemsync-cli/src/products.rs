//! Read-only product queries for the CLI.

use clap::Subcommand;

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// Show the total number of products in the catalog
    Count,
    /// Show a single product by SKU
    Show {
        /// Stock-keeping unit to look up
        #[arg(long)]
        sku: String,
    },
}

/// Print the total product count.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_products_count(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let count = aemsync_db::count_products(pool).await?;
    println!("{count} products in catalog");
    Ok(())
}

/// Print one product's catalog fields, or a not-found notice.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_products_show(pool: &sqlx::PgPool, sku: &str) -> anyhow::Result<()> {
    match aemsync_db::get_product_by_sku(pool, sku).await? {
        Some(product) => {
            println!("sku:              {}", product.sku);
            println!("name:             {}", product.name);
            println!("price:            {}", product.price);
            println!("type:             {}", product.type_id);
            println!("visibility:       {}", product.visibility);
            println!("attribute set:    {}", product.attribute_set_id);
            println!("status:           {}", product.status);
            println!("created:          {}", product.created_at.format("%Y-%m-%d %H:%M:%S"));
        }
        None => println!("product '{sku}' not found"),
    }
    Ok(())
}
