use homeshare_infra::{AppConfig, Stores};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The config picks the log filter, so its warnings are replayed once logging is up.
    let (config, warnings) = AppConfig::from_env_deferred();
    homeshare_observability::init(&config.log_filter);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let app = homeshare_api::app::build_app(&config, Stores::in_memory());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
