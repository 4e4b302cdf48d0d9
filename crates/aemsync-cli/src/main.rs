use clap::{Parser, Subcommand};

mod import;
mod products;
mod runs;


#[derive(Debug, Parser)]
#[command(name = "aemsync")]
#[command(about = "Import an AEM commerce catalog into the product database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the AEM product tree and create missing catalog products
    Import(import::ImportArgs),
    /// List recent import runs
    Runs {
        /// Maximum number of runs to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
    /// Read-only product queries
    Products {
        #[command(subcommand)]
        command: products::ProductsCommands,
    },
    /// Database maintenance commands
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database connection
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = aemsync_core::load_app_config()?;
    init_tracing(&config.log_level);

    let pool = aemsync_db::connect_pool(
        &config.database_url,
        aemsync_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    match cli.command {
        Commands::Import(args) => import::run_import(&pool, &config, &args).await,
        Commands::Runs { limit } => runs::run_list_runs(&pool, limit).await,
        Commands::Products { command } => match command {
            products::ProductsCommands::Count => products::run_products_count(&pool).await,
            products::ProductsCommands::Show { sku } => {
                products::run_products_show(&pool, &sku).await
            }
        },
        Commands::Db { command } => match command {
            DbCommands::Ping => {
                aemsync_db::health_check(&pool).await?;
                println!("database ping ok");
                Ok(())
            }
            DbCommands::Migrate => {
                let applied = aemsync_db::run_migrations(&pool).await?;
                println!("applied {applied} migrations");
                Ok(())
            }
        },
    }
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Attempt to mark an import run as failed, logging any secondary error.
async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: String) {
    if let Err(mark_err) = aemsync_db::fail_import_run(pool, run_id, &message).await {
        tracing::error!(
            run_id,
            error = %mark_err,
            "failed to mark import run as failed"
        );
    }
}
