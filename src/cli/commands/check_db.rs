use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AdapterConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: AdapterConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let target = format!(
        "{}:{}/{}",
        config.database.host, config.database.port, config.database.database
    );

    let database = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("failed to connect to {}", target))?;
    let result = database.health_check().await;
    database.close().await;
    result.with_context(|| format!("health query failed on {}", target))?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "database": "ok", "target": target })),
        OutputFormat::Text => println!("Database OK ({})", target),
    }
    Ok(())
}
