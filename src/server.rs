//! A local preview server. It renders the same views as [`crate::build`],
//! but per request: the listing at `/`, an article at `/artigos/{slug}` (or
//! the not-found page with a 404 status), the feed, and the static assets.

use crate::build::load_site;
use crate::config::Config;
use crate::feed::{write_feed, FeedConfig};
use crate::render::{Page, Site};
use crate::routes::Routes;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use url::Url;

/// Builds the router for an already-loaded [`Site`]. `static_directory` is
/// served under `/static`.
pub fn router(site: Arc<Site>, static_directory: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/artigos/:slug", get(article))
        .route("/artigos/:slug/", get(article))
        .route("/feed.atom", get(feed))
        .nest_service("/static", ServeDir::new(static_directory))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

/// Loads the site described by `config` and serves it on `addr` until the
/// process is stopped. Links point at the server (see [`link_root`]) rather
/// than the configured site root.
pub async fn serve(config: &Config, addr: SocketAddr) -> anyhow::Result<()> {
    let root = link_root(addr)?;
    let site = Arc::new(load_site(config, Routes::new(root.clone()))?);
    let app = router(site, &config.static_source_directory);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%root, "serving");
    axum::serve(listener, app).await?;
    Ok(())
}

/// The root URL generated links use when serving on `addr`. A wildcard
/// address isn't something a browser can open, so loopback stands in for it.
pub fn link_root(addr: SocketAddr) -> Result<Url, url::ParseError> {
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    Url::parse(&format!("http://{}/", SocketAddr::new(ip, addr.port())))
}

async fn index(State(site): State<Arc<Site>>) -> Response {
    match site.render_index() {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn article(State(site): State<Arc<Site>>, Path(slug): Path<String>) -> Response {
    match site.render_article_page(&slug) {
        Ok(Page::Found(html)) => Html(html).into_response(),
        Ok(Page::NotFound(html)) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn feed(State(site): State<Arc<Site>>) -> Response {
    let mut body = Vec::new();
    let config = FeedConfig {
        title: &site.meta.title,
        subtitle: &site.meta.tagline,
        author: site.meta.author.as_ref(),
        routes: &site.routes,
    };
    match write_feed(&config, site.articles.list_articles(), &mut body) {
        Ok(()) => ([(header::CONTENT_TYPE, "application/atom+xml")], body).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn not_found(State(site): State<Arc<Site>>) -> Response {
    match site.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

fn internal_error<E: std::fmt::Display>(err: E) -> Response {
    tracing::error!(error = %err, "rendering failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
