use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

use crate::loan::eda::error::Result;

/// Address the dashboard listens on unless told otherwise.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Route serving the rendered dashboard.
pub const DASHBOARD_ROUTE: &str = "/dashboard/";

/// Routes for the landing placeholder and the prerendered dashboard page.
pub fn router(page: Arc<str>) -> Router {
    Router::new()
        .route("/", get(home))
        .route(DASHBOARD_ROUTE, get(dashboard))
        .route("/dashboard", get(dashboard))
        .with_state(page)
}

async fn home() -> &'static str {
    "Dashboard"
}

async fn dashboard(State(page): State<Arc<str>>) -> Html<String> {
    Html(page.to_string())
}

/// Serves the page until the process is stopped.
pub async fn serve(addr: SocketAddr, page: Arc<str>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, route = DASHBOARD_ROUTE, "dashboard listening");
    axum::serve(listener, router(page)).await?;
    Ok(())
}
