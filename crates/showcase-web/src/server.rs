//! HTTP server.
//!
//! Each request to `/` fetches the catalog once, builds a fresh carousel
//! focused on the `?category=<index>` query parameter (or the first
//! category), and renders the page. Navigation is carried entirely by the
//! query string; nothing is kept between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use showcase_cms::CatalogSource;
use showcase_core::{Carousel, Result};

use crate::render::{self, SiteSettings};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn CatalogSource>,
    site: Arc<SiteSettings>,
}

impl AppState {
    /// Creates state from a catalog source and page settings.
    pub fn new(source: Arc<dyn CatalogSource>, site: SiteSettings) -> Self {
        Self {
            source,
            site: Arc::new(site),
        }
    }

    /// Page settings.
    pub fn site(&self) -> &SiteSettings {
        &self.site
    }
}

/// Query parameters of the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Requested carousel index, kept raw so that junk falls back to 0.
    pub category: Option<String>,
}

impl HomeQuery {
    /// The requested index, if it parses.
    pub fn requested_index(&self) -> Option<usize> {
        self.category.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(state)
}

async fn home(
    State(state): State<AppState>,
    query: std::result::Result<Query<HomeQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed query string");
            HomeQuery::default()
        }
    };

    let categories = match state.source.fetch_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories");
            let body = render::error_page(
                state.site(),
                "The product catalog is unavailable right now. Please try again later.",
            );
            return (StatusCode::BAD_GATEWAY, Html(body.into_string())).into_response();
        }
    };

    let mut carousel = Carousel::new(&categories);
    if let Some(index) = query.requested_index() {
        if carousel.contains_index(index) {
            carousel.set_active_index(index);
        } else {
            tracing::debug!(
                index,
                count = carousel.len(),
                "Ignoring out-of-range category index"
            );
        }
    }

    let body = render::page(state.site(), render::carousel(&carousel));
    Html(body.into_string()).into_response()
}

async fn health() -> &'static str {
    "ok"
}

/// Serves the application on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Showcase listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Showcase stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
