use std::sync::Arc;

use anyhow::Context;

use mail_triage::config::AppConfig;
use mail_triage::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine in production
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    eprintln!("   Listen: http://{}", config.server.addr());
    eprintln!("   CORS: {}", config.server.cors_origins.join(", "));

    let processor = mail_triage::build_processor(&config)
        .await
        .context("building email processor")?;

    let state = AppState::new(Arc::new(processor), config.server.request_timeout);
    let app = server::router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.addr())
        .await
        .with_context(|| format!("binding {}", config.server.addr()))?;
    tracing::info!(addr = %config.server.addr(), "Mail triage server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
