use crate::config::AdapterConfig;

pub async fn handle(config: AdapterConfig) -> anyhow::Result<()> {
    crate::server::serve(config).await
}
