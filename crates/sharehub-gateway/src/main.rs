use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

mod allow;
mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env goes first so it can also carry RUST_LOG; a missing file is fine,
    // a broken one is not.
    let dotenv = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => return Err(e).context("could not parse .env"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sharehub_gateway=info,sharehub_services=info,tower_http=debug".into()
            }),
        )
        .init();

    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    // load config: SHAREHUB_CONFIG env > ./sharehub.toml, then env overrides
    let config_path = std::env::var("SHAREHUB_CONFIG").ok();
    let config = sharehub_core::config::ShareHubConfig::load(config_path.as_deref())
        .context("could not load configuration")?;

    let allow = allow::AllowList::from_entries(&config.gateway.allowed_ips)
        .context("could not build the IP allow-list")?;
    info!(entries = ?config.gateway.allowed_ips, "IP allow-list active");

    let webhook = sharehub_services::SlackWebhook::new(&config.slack)
        .context("could not build the Slack webhook client")?;
    if !webhook.is_configured() {
        tracing::warn!("no Slack webhook URL configured; Slack shares will fail");
    }

    let dispatcher = sharehub_services::Dispatcher::new(webhook);
    let state = Arc::new(app::AppState::new(dispatcher, allow));
    let router = app::build_router(state);

    let bind: IpAddr = config
        .gateway
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.gateway.bind))?;
    let addr = SocketAddr::new(bind, config.gateway.port);
    info!("ShareHub gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
