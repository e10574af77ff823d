//! API Handlers
//!
//! Turns a parsed request into a response, reading documents through the
//! content cache and falling back to disk on a miss.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::routes::{create_routes, RouteTable};
use crate::cache::{CacheEntry, CacheStore};
use crate::config::Config;
use crate::content::{load_file, resolve_mime};
use crate::error::Result;
use crate::models::{Method, RequestLine, Response, Status};

/// File name of the system not-found page inside `server_files`.
pub const NOT_FOUND_PAGE: &str = "/404.html";

/// Cache key namespace for system pages, keeping them apart from
/// application documents.
const SYSTEM_KEY_PREFIX: &str = "sys:";

/// Body sent when the system not-found page itself is unavailable.
pub const FALLBACK_NOT_FOUND_BODY: &[u8] =
    b"<!DOCTYPE html><html><body><h1>404 Not Found</h1></body></html>\n";

/// Everything the dispatcher needs, passed explicitly to each request.
///
/// The connection loop owns the context and lends it to one request at a
/// time, so the cache needs no lock.
#[derive(Debug)]
pub struct ServerContext {
    /// Content cache shared by system and application documents
    pub cache: CacheStore,
    /// GET route table
    pub routes: RouteTable,
    /// Document root for system pages
    pub server_files: PathBuf,
    /// Document root for application content
    pub server_root: PathBuf,
}

impl ServerContext {
    /// Creates a context from its parts.
    pub fn new(
        cache: CacheStore,
        routes: RouteTable,
        server_files: impl Into<PathBuf>,
        server_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cache,
            routes,
            server_files: server_files.into(),
            server_root: server_root.into(),
        }
    }

    /// Creates a context with the standard routes and a cache sized from
    /// configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::with_index_hint(config.cache_capacity, config.cache_index_hint);
        Self::new(
            cache,
            create_routes(),
            config.server_files.clone(),
            config.server_root.clone(),
        )
    }
}

/// Handles one raw request, always producing a response.
pub async fn handle_request(ctx: &mut ServerContext, raw: &[u8]) -> Response {
    match RequestLine::parse(raw) {
        Ok(request) => dispatch(ctx, &request).await,
        Err(e) => {
            warn!("{}", e);
            not_found(ctx).await
        }
    }
}

/// Maps a parsed request to a response.
pub async fn dispatch(ctx: &mut ServerContext, request: &RequestLine) -> Response {
    match &request.method {
        Method::Get => {
            info!("GET: {}", request.path);
            match ctx.routes.resolve(&request.path) {
                Some(page) => {
                    let page = page.to_string();
                    serve_page(ctx, &page).await
                }
                None => not_found(ctx).await,
            }
        }
        Method::Post => {
            info!("POST: {}", request.path);
            not_found(ctx).await
        }
        Method::Other(method) => {
            info!("{}: {} (unsupported method)", method, request.path);
            not_found(ctx).await
        }
    }
}

/// Serves the application document `page` from `server_root`.
///
/// A document that cannot be loaded is answered with the not-found page.
pub async fn serve_page(ctx: &mut ServerContext, page: &str) -> Response {
    let path = document_path(&ctx.server_root, page);

    match cached_load(&mut ctx.cache, page, &path).await {
        Ok(entry) => Response::from_entry(Status::Ok, &entry),
        Err(e) if e.is_not_found() => {
            info!(page, "Page missing from document root: {}", e);
            not_found(ctx).await
        }
        Err(e) => {
            warn!(page, "Cannot serve page: {}", e);
            not_found(ctx).await
        }
    }
}

/// Builds the 404 response from the system not-found page.
///
/// If that page is missing too, a minimal inline body is sent instead.
pub async fn not_found(ctx: &mut ServerContext) -> Response {
    let key = format!("{}{}", SYSTEM_KEY_PREFIX, NOT_FOUND_PAGE);
    let path = document_path(&ctx.server_files, NOT_FOUND_PAGE);

    match cached_load(&mut ctx.cache, &key, &path).await {
        Ok(entry) => Response::from_entry(Status::NotFound, &entry),
        Err(e) => {
            warn!("Cannot find system 404 file, using inline body: {}", e);
            Response::new(
                Status::NotFound,
                "text/html",
                Arc::from(FALLBACK_NOT_FOUND_BODY),
            )
        }
    }
}

/// Returns the cached entry for `key`, loading it from `path` on a miss.
async fn cached_load(cache: &mut CacheStore, key: &str, path: &Path) -> Result<CacheEntry> {
    if let Some(entry) = cache.get(key) {
        debug!(key, "Cache hit");
        return Ok(entry.clone());
    }
    let data = load_file(path).await?;
    debug!(key, size = data.size, "Cache miss, loaded from disk");
    let entry = CacheEntry::new(key, data.content, resolve_mime(path));
    cache.insert(entry.clone());

    Ok(entry)
}

fn document_path(root: &Path, page: &str) -> PathBuf {
    root.join(page.trim_start_matches('/'))
}
