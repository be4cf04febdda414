use anyhow::Context;

use winnerlens_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    winnerlens_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let app = winnerlens_api::app::build_app(&config).context("failed to build application")?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
