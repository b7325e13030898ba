use anyhow::Context;

use mesa_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mesa_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let services = mesa_api::app::services::build_services(&config)
        .context("failed to wire services")?;
    let app = mesa_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
