//! Development server for the backdrop demo page
//!
//! Serves `web/` (or `$LUMEN_WEB_DIR`) with module-friendly MIME types and
//! caching disabled, so a fresh `wasm-pack build` is picked up on reload.
//!
//! ```sh
//! wasm-pack build crates/lumen-web --target web --out-dir ../../web/pkg
//! cargo run -p dev-server
//! ```

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::get_service,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WEB_DIR: &str = "web";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let web_dir = std::env::var_os("LUMEN_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WEB_DIR));

    if !web_dir.is_dir() {
        eprintln!("warning: {} is not a directory", web_dir.display());
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let serve_dir = ServeDir::new(&web_dir).append_index_html_on_directories(true);

    let app = Router::new()
        .fallback_service(get_service(serve_dir).handle_error(|_| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(add_headers)));

    println!("lumen backdrop dev server");
    println!("  serving  {}", web_dir.display());
    println!("  url      http://localhost:{}", port);
    println!("  Ctrl+C to stop");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Disable caching and fix MIME types
async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response<Body> {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Some(content_type) = content_type(&path) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    response
}

/// Content type for module scripts and wasm; everything else keeps the
/// type `ServeDir` guessed
fn content_type(path: &str) -> Option<&'static str> {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext)?;
    match extension {
        "js" | "mjs" => Some("application/javascript; charset=utf-8"),
        "wasm" => Some("application/wasm"),
        "json" => Some("application/json; charset=utf-8"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_overrides() {
        assert_eq!(
            content_type("/pkg/lumen_web.js"),
            Some("application/javascript; charset=utf-8")
        );
        assert_eq!(content_type("/pkg/lumen_web_bg.wasm"), Some("application/wasm"));
        assert_eq!(content_type("/index.html"), None);
        assert_eq!(content_type("/"), None);
    }
}
