use crate::cli::OutputFormat;
use crate::config::AdapterConfig;

pub fn handle(config: AdapterConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config.redacted();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => {
            println!("environment:        {:?}", config.environment);
            println!("listen:             {}", config.server.bind_addr());
            println!("cors:               {}", config.server.enable_cors);
            match &config.database.url {
                Some(url) => println!("database:           {}", url),
                None => println!(
                    "database:           {}@{}:{}/{}",
                    config.database.username, config.database.host, config.database.port, config.database.database
                ),
            }
            println!("max connections:    {}", config.database.max_connections);
            println!("acquire timeout:    {}s", config.database.acquire_timeout_secs);
            println!(
                "api key:            {}",
                if config.security.api_key.is_empty() { "(not set)" } else { "set" }
            );
            println!("redact errors:      {}", config.security.redact_internal_errors);
        }
    }
    Ok(())
}
