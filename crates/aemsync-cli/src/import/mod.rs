//! Import command handler for the CLI.
//!
//! Called from `main` after the database pool and config are established.
//! The flow mirrors the admin-triggered import: one authenticated fetch of
//! the product tree, a fixed-depth walk, then create-if-missing against the
//! catalog with an import run row tracking the outcome.

use clap::Args;

use aemsync_aem::{collect_product_entries, normalize_product, AemClient, ProductEntry};
use aemsync_core::AppConfig;

use crate::fail_run_best_effort;

/// Flags for the `import` command. Every connection flag falls back to the
/// matching `AEMSYNC_AEM_*` environment variable.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// AEM instance base URL, e.g. http://aem.example.com:4502
    #[arg(long)]
    pub instance_url: Option<String>,

    /// Content path of the products subtree, e.g. /etc/commerce/products
    #[arg(long)]
    pub products_path: Option<String>,

    /// AEM username
    #[arg(long)]
    pub username: Option<String>,

    /// AEM password
    #[arg(long)]
    pub password: Option<String>,

    /// Category whose children are matched against imported folder names
    #[arg(long)]
    pub root_category: Option<i64>,

    /// Preview what would be imported without writing to the database
    #[arg(long)]
    pub dry_run: bool,
}

/// Fully-resolved AEM connection parameters.
#[derive(Debug)]
struct AemConnection {
    instance_url: String,
    products_path: String,
    username: String,
    password: String,
}

/// Resolves connection parameters, preferring CLI flags over config values.
fn resolve_connection(config: &AppConfig, args: &ImportArgs) -> anyhow::Result<AemConnection> {
    let pick = |flag: &Option<String>, fallback: &Option<String>, what: &str, var: &str| {
        flag.clone()
            .or_else(|| fallback.clone())
            .ok_or_else(|| anyhow::anyhow!("{what} is not set; pass the flag or set {var}"))
    };

    Ok(AemConnection {
        instance_url: pick(
            &args.instance_url,
            &config.aem_instance_url,
            "AEM instance URL (--instance-url)",
            "AEMSYNC_AEM_INSTANCE_URL",
        )?,
        products_path: pick(
            &args.products_path,
            &config.aem_products_path,
            "AEM products path (--products-path)",
            "AEMSYNC_AEM_PRODUCTS_PATH",
        )?,
        username: pick(
            &args.username,
            &config.aem_username,
            "AEM username (--username)",
            "AEMSYNC_AEM_USERNAME",
        )?,
        password: pick(
            &args.password,
            &config.aem_password,
            "AEM password (--password)",
            "AEMSYNC_AEM_PASSWORD",
        )?,
    })
}

/// Import products from an AEM instance into the catalog.
///
/// Fetches `{instance_url}{products_path}.infinity.json`, walks the folder
/// tree, and creates a catalog product for every leaf whose SKU is not
/// already present. Existing SKUs are skipped, never updated, so re-running
/// the import with identical input is a no-op.
///
/// When `--dry-run` is set the resolved products are printed and the
/// database is left untouched.
///
/// # Errors
///
/// Returns an error if connection parameters are incomplete, the fetch or
/// walk fails, or a database write fails. Any failure after the run row is
/// created marks the run as failed (best effort) before propagating.
pub(crate) async fn run_import(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    args: &ImportArgs,
) -> anyhow::Result<()> {
    let conn = resolve_connection(config, args)?;
    let client = AemClient::new(
        &conn.instance_url,
        &conn.username,
        &conn.password,
        config.aem_request_timeout_secs,
        &config.aem_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build AEM client: {e}"))?;

    let root_category_id = args.root_category.unwrap_or(config.root_category_id);

    if args.dry_run {
        let tree = client.fetch_products(&conn.products_path).await?;
        let entries = collect_product_entries(&tree)?;
        println!(
            "dry-run: {} product nodes under {}",
            entries.len(),
            conn.products_path
        );
        for entry in &entries {
            let product = normalize_product(entry)?;
            println!("  {}  {}  ({})", product.sku, product.name, product.price);
        }
        return Ok(());
    }

    let run = aemsync_db::create_import_run(pool, "cli").await?;
    if let Err(e) = aemsync_db::start_import_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }

    let result: anyhow::Result<(i32, i32)> = async {
        let tree = client.fetch_products(&conn.products_path).await?;
        let entries = collect_product_entries(&tree)?;
        tracing::info!(count = entries.len(), "located product nodes in export");

        check_categories(pool, root_category_id, &entries).await?;

        let mut created: i32 = 0;
        let mut skipped: i32 = 0;
        for entry in &entries {
            let sku = entry.node.identifier.as_str();
            if aemsync_db::product_exists(pool, sku).await? {
                tracing::debug!(sku, "product exists, skipping");
                skipped += 1;
                continue;
            }

            let product = normalize_product(entry)?;
            tracing::debug!(sku = %product.sku, name = %product.name, "creating product");
            if aemsync_db::insert_product_if_missing(pool, &product)
                .await?
                .is_some()
            {
                created += 1;
            } else {
                // Lost a race with a concurrent import; same as existing.
                skipped += 1;
            }
        }
        Ok((created, skipped))
    }
    .await;

    match result {
        Ok((created, skipped)) => {
            if let Err(err) = aemsync_db::complete_import_run(pool, run.id, created, skipped).await
            {
                fail_run_best_effort(pool, run.id, format!("{err:#}")).await;
                return Err(err.into());
            }
            println!("import success: created {created} products, skipped {skipped} existing");
            Ok(())
        }
        Err(err) => {
            fail_run_best_effort(pool, run.id, format!("{err:#}")).await;
            Err(err)
        }
    }
}

/// Resolves each imported folder name against the root category's children
/// so categories missing from the catalog show up in the logs. Products are
/// not assigned to categories; the tree is only checked.
async fn check_categories(
    pool: &sqlx::PgPool,
    root_category_id: i64,
    entries: &[ProductEntry],
) -> anyhow::Result<()> {
    let Some(root) = aemsync_db::get_category_by_id(pool, root_category_id).await? else {
        tracing::warn!(
            id = root_category_id,
            "root category not found; skipping category checks"
        );
        return Ok(());
    };

    let mut names: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    for name in names {
        match aemsync_db::get_child_category_by_name(pool, &root, name).await? {
            Some(category) => {
                tracing::debug!(name, id = category.id, path = %category.path, "matched catalog category");
            }
            None => {
                tracing::warn!(name, "no catalog category matches imported folder");
            }
        }
    }
    Ok(())
}
