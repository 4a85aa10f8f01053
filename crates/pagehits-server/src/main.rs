//! pagehits server
//!
//! - REST API: /api/pages, /api/pages/:id/hits, /api/pages/:id/hit
//! - Ops: /health, /metrics, dashboard at /
//! - Graceful shutdown on Ctrl-C / SIGTERM

use pagehits_server::{
    app_state::AppState,
    config,
    error::{ApiError, Result},
    obs, router,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;
    obs::logging::init(&cfg.server);

    let listen = cfg.server.listen_addr()?;
    let state = AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "pagehits-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ApiError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("server failed: {e}")))?;

    tracing::info!("pagehits-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
