//! # ProjectFlow Importer
//!
//! One-shot seeding tool for an empty ProjectFlow database. Two modes:
//!
//! - `projectflow-importer <export.json>`: import a planner export (rows
//!   plus a leaders list, see `projectflow_shared::import::ImportFile`)
//! - `projectflow-importer --demo`: seed a small demo data set
//!
//! Either way the run is a no-op if any users already exist.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/projectflow \
//!     cargo run -p projectflow-importer -- export.json
//! ```

use projectflow_importer::{run_import, seed_demo};
use projectflow_shared::db::{migrations, pool};
use projectflow_shared::import::ImportFile;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "projectflow_importer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "ProjectFlow Importer v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    dotenvy::dotenv().ok();

    let arg = std::env::args().nth(1).ok_or_else(|| {
        anyhow::anyhow!("Usage: projectflow-importer <export.json> | --demo")
    })?;

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: database_url,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let stats = if arg == "--demo" {
        seed_demo(&db).await?
    } else {
        let contents = std::fs::read_to_string(&arg)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", arg, e))?;
        let file: ImportFile = serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", arg, e))?;

        run_import(&db, file).await?
    };

    match stats {
        Some(stats) => tracing::info!(
            users = stats.users,
            projects = stats.projects,
            tasks = stats.tasks,
            "Seeding finished"
        ),
        None => tracing::info!("Nothing to do, database already contains users"),
    }

    pool::close_pool(db).await;

    Ok(())
}
