mod handlers;

pub use handlers::ExportedTree;

use std::path::Path;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::site::Site;

pub fn create_router(site: Arc<Site>) -> Router {
    let mut pages = Router::new()
        .route("/", get(handlers::home))
        .route("/blog", get(handlers::blog))
        .route("/portfolio", get(handlers::portfolio))
        .route("/cv", get(handlers::cv))
        .route("/posts/{slug}", get(handlers::blog_post));

    // Pages are static for the lifetime of the process, so they are safe
    // to cache downstream when configured.
    if let Some(max_age) = site.config().cache_control {
        let value = HeaderValue::from_str(&format!("public, max-age={}", max_age))
            .expect("max-age header value is always valid ASCII");
        pages = pages.layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            value,
        ));
    }

    Router::new()
        .merge(pages)
        .route("/health_check", get(handlers::health_check))
        .nest_service("/static", ServeDir::new(&site.config().assets_dir))
        .nest_service("/webfonts", ServeDir::new(&site.config().webfonts_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

/// Router for the dev loop: serves a previously exported tree straight from
/// disk, the way a generic file server would, with the extension-less page
/// files sent as HTML. Assets still come from the source directories.
pub fn create_export_router(export_dir: &Path, config: &SiteConfig) -> Router {
    Router::new()
        .route("/health_check", get(handlers::health_check))
        .nest_service("/static", ServeDir::new(&config.assets_dir))
        .nest_service("/webfonts", ServeDir::new(&config.webfonts_dir))
        .fallback(get(handlers::exported_page))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(ExportedTree {
            root: export_dir.to_path_buf(),
        }))
}
