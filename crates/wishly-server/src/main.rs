mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wishly_scraper::ProductPageClient;

use crate::{
    api::{build_app, scrape_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = wishly_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let scraper = ProductPageClient::new(config.scraper_timeout_secs, &config.scraper_user_agent)?;
    let auth = AuthState::from_env(matches!(config.env, wishly_core::Environment::Development))?;
    let app = build_app(
        AppState {
            scraper: Arc::new(scraper),
        },
        auth,
        scrape_rate_limit_state(config.scrape_rate_limit_per_minute),
        &config.cors_origins,
    );

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        timeout_secs = config.scraper_timeout_secs,
        "starting wishly server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
