mod payloads;
mod routes;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::context::AppContext;
use crate::error::AppResult;

pub fn router(ctx: AppContext) -> Router {
    routes::dashboard_routes()
        .merge(routes::api_routes())
        .merge(routes::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

pub async fn serve(ctx: AppContext) -> AppResult<()> {
    let listener = TcpListener::bind(ctx.config.bind).await?;
    info!("dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
