//! shared listener loop for the stub servers.

use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

/// bind `addr` and serve `app` until ctrl-c, then drain in-flight requests
pub async fn serve(name: &str, addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(server = name, address = %listener.local_addr()?, "listening");

    axum::serve(listener, app.layer(CorsLayer::permissive()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(server = name, "stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
