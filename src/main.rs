//! Service bootstrap: configuration, logging, database readiness.
//!
//! Loads the configuration, initializes tracing, connects to PostgreSQL
//! and brings the catalog schema up to date.

use anyhow::Result;
use tracing::info;

use shop_catalog::infrastructure::config::AppConfig;
use shop_catalog::infrastructure::database_connection::DatabaseConnection;
use shop_catalog::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().await?;
    init_logging(&config.logging)?;

    info!(
        host = %config.database.host,
        port = config.database.port,
        dbname = %config.database.dbname,
        "starting shop-catalog"
    );

    let db = DatabaseConnection::connect(&config.database).await?;
    db.migrate().await?;

    info!("catalog ready");
    Ok(())
}
