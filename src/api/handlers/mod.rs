use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Html,
};

use crate::site::Site;

/// Log an internal error and return a sanitized response to the client.
/// Rendering failures are configuration errors caught at startup, so this
/// only fires if a page name in the router drifts from the page set.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Render error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

/// Constant response, no error path, empty body.
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

// ============================================================
// Pages
// ============================================================

pub async fn home(
    State(site): State<Arc<Site>>,
) -> Result<Html<String>, (StatusCode, String)> {
    site.page("index").map(Html).map_err(internal_error)
}

pub async fn blog(
    State(site): State<Arc<Site>>,
) -> Result<Html<String>, (StatusCode, String)> {
    site.page("blog").map(Html).map_err(internal_error)
}

pub async fn portfolio(
    State(site): State<Arc<Site>>,
) -> Result<Html<String>, (StatusCode, String)> {
    site.page("portfolio").map(Html).map_err(internal_error)
}

pub async fn cv(
    State(site): State<Arc<Site>>,
) -> Result<Html<String>, (StatusCode, String)> {
    site.page("cv").map(Html).map_err(internal_error)
}

// ============================================================
// Blog posts
// ============================================================

pub async fn blog_post(
    State(site): State<Arc<Site>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    site.post(&slug)
        .map(|html| Html(html.to_string()))
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))
}

// ============================================================
// Exported tree (dev loop)
// ============================================================

/// Root of an exported site tree served from disk.
pub struct ExportedTree {
    pub root: PathBuf,
}

/// Serve an exported page file. Export writes pages without an extension, so
/// everything here is sent as HTML.
pub async fn exported_page(
    State(tree): State<Arc<ExportedTree>>,
    uri: Uri,
) -> Result<Html<String>, StatusCode> {
    let rel = uri.path().trim_start_matches('/');
    let rel = if rel.is_empty() { "index" } else { rel };

    // Stay inside the export root.
    if rel.split('/').any(|segment| segment == "..") {
        return Err(StatusCode::NOT_FOUND);
    }

    match tokio::fs::read_to_string(tree.root.join(rel)).await {
        Ok(html) => Ok(Html(html)),
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}
