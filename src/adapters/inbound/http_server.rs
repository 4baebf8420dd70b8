//! HTTP Server
//!
//! Serves the caller's location as plain text, JSON or XML. Converts axum
//! requests into [`RequestContext`] values, maps resolution errors to
//! status codes and logs them; the core itself never logs errors.

use crate::application::LocationService;
use crate::domain::errors::{LookupError, ResolveError};
use crate::domain::request::RequestContext;
use crate::infrastructure::shutdown_signal;
use crate::render::{text, xml, BuildInfo};
use axum::{
    body::to_bytes,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Per-request time limit, enforced here rather than in the core.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest form body read for parameter parsing.
const MAX_FORM_BYTES: usize = 1 << 20;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_XML: &str = "application/xml; charset=utf-8";

/// HTTP server state.
#[derive(Clone)]
pub struct HttpState {
    pub service: Arc<LocationService>,
    pub build: Arc<BuildInfo>,
}

impl HttpState {
    pub fn new(service: Arc<LocationService>) -> Self {
        Self {
            service,
            build: Arc::new(BuildInfo::current()),
        }
    }
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_locations: usize,
    pub cache_capacity: usize,
}

/// Location server.
pub struct HttpServer {
    listen_addr: String,
    state: HttpState,
}

impl HttpServer {
    pub fn new(listen_addr: String, service: Arc<LocationService>) -> Self {
        Self {
            listen_addr,
            state: HttpState::new(service),
        }
    }

    /// Router with all routes and layers attached.
    pub fn router(state: HttpState) -> Router {
        Router::new()
            .route("/", get(text_handler).post(text_handler))
            .route("/short", get(short_handler))
            .route("/compact", get(compact_handler))
            .route("/json", get(json_handler))
            .route("/xml", get(xml_handler))
            .route("/version", get(version_handler))
            .route("/health", get(health_handler))
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run until Ctrl+C or SIGTERM.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = Self::router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("ipinfo listening on {}", self.listen_addr);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("stopped");
        Ok(())
    }
}

/// Build the core's view of an axum request.
///
/// The body is read only for urlencoded POST, PUT and PATCH forms; other
/// methods get their params from the query string alone.
async fn request_context(req: Request) -> Result<RequestContext, Response> {
    let (parts, body) = req.into_parts();

    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();

    let uri = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let mut ctx = RequestContext::new(peer)
        .with_proto(format!("{:?}", parts.version))
        .with_method(parts.method.as_str())
        .with_uri(uri);

    for (name, value) in parts.headers.iter() {
        ctx = ctx.with_header(
            name.as_str(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }

    let has_body = matches!(parts.method, Method::POST | Method::PUT | Method::PATCH);
    let is_form = has_body
        && parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        let bytes = to_bytes(body, MAX_FORM_BYTES)
            .await
            .map_err(|_| plain(StatusCode::PAYLOAD_TOO_LARGE, "ERROR\n".to_string()))?;
        ctx = ctx.with_form_body(bytes.to_vec());
    }

    Ok(ctx)
}

fn plain(status: StatusCode, body: String) -> Response {
    let mut resp = (status, body).into_response();
    let headers = resp.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    resp
}

fn error_response(err: &ResolveError) -> Response {
    let status = match err {
        ResolveError::Address(_) => StatusCode::BAD_REQUEST,
        ResolveError::Lookup(LookupError::InvalidAddress(_)) => StatusCode::BAD_REQUEST,
        ResolveError::Lookup(LookupError::NotFound(_)) => StatusCode::NOT_FOUND,
        ResolveError::Lookup(LookupError::Corrupt(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!("resolve failed: {}", err);
    plain(status, "ERROR\n".to_string())
}

fn render_error(err: std::fmt::Error) -> Response {
    tracing::error!("render failed: {}", err);
    plain(StatusCode::INTERNAL_SERVER_ERROR, "ERROR\n".to_string())
}

// Handler functions

async fn text_handler(State(state): State<HttpState>, req: Request) -> Response {
    let ctx = match request_context(req).await {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    let info = match state.service.resolve(&ctx) {
        Ok(info) => info,
        Err(e) => return error_response(&e),
    };

    let headers = state.service.headers(&ctx);
    let params = state.service.params(&ctx);

    let mut body = String::new();
    match text::full(&mut body, &ctx, &headers, &params, &info) {
        Ok(()) => plain(StatusCode::OK, body),
        Err(e) => render_error(e),
    }
}

async fn short_handler(State(state): State<HttpState>, req: Request) -> Response {
    let ctx = match request_context(req).await {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    match state.service.resolve(&ctx) {
        Ok(info) => {
            let mut body = String::new();
            match text::short(&mut body, &info) {
                Ok(()) => plain(StatusCode::OK, body),
                Err(e) => render_error(e),
            }
        }
        Err(e) => error_response(&e),
    }
}

async fn compact_handler(State(state): State<HttpState>, req: Request) -> Response {
    let ctx = match request_context(req).await {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    match state.service.resolve(&ctx) {
        Ok(info) => {
            let mut body = String::new();
            match text::compact(&mut body, &info) {
                Ok(()) => plain(StatusCode::OK, body),
                Err(e) => render_error(e),
            }
        }
        Err(e) => error_response(&e),
    }
}

async fn json_handler(State(state): State<HttpState>, req: Request) -> Response {
    let ctx = match request_context(req).await {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    match state.service.resolve(&ctx) {
        Ok(info) => {
            let mut resp = Json(info).into_response();
            resp.headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
            resp
        }
        Err(e) => error_response(&e),
    }
}

async fn xml_handler(State(state): State<HttpState>, req: Request) -> Response {
    let ctx = match request_context(req).await {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    let info = match state.service.resolve(&ctx) {
        Ok(info) => info,
        Err(e) => return error_response(&e),
    };

    let mut body = String::new();
    match xml::location(&mut body, &info) {
        Ok(()) => {
            let mut resp = plain(StatusCode::OK, body);
            resp.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_XML));
            resp
        }
        Err(e) => render_error(e),
    }
}

async fn version_handler(State(state): State<HttpState>) -> Response {
    let mut body = String::new();
    match text::version(&mut body, &state.build) {
        Ok(()) => plain(StatusCode::OK, body),
        Err(e) => render_error(e),
    }
}

async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: state.build.version.clone(),
        cached_locations: state.service.cached(),
        cache_capacity: state.service.cache_capacity(),
    };
    Json(response)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::body::Body;
    use crate::adapters::outbound::{LruLocationCache, MemoryLocationStore};
    use crate::domain::entities::LocationRecord;
    use crate::domain::errors::AddressError;
    use crate::domain::services::{AddressExtractor, HeaderFilter};
    use crate::domain::value_objects::IgnoreSet;

    fn state(ip_header: Option<&str>) -> HttpState {
        let store = MemoryLocationStore::new().with_record(
            "127.0.0.1".parse().unwrap(),
            LocationRecord {
                country_iso_code: "SE".to_string(),
                country_names: [("en".to_string(), "Sweden".to_string())].into(),
                ..Default::default()
            },
        );
        HttpState::new(Arc::new(LocationService::new(
            Arc::new(store),
            Arc::new(LruLocationCache::new(8)),
            AddressExtractor::new(ip_header.map(str::to_string)),
            HeaderFilter::new(IgnoreSet::default()),
        )))
    }

    #[tokio::test]
    async fn test_request_context_from_axum() {
        let mut req = Request::builder()
            .method("POST")
            .uri("/?a=1")
            .header("x-header-a", "a")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("b=2"))
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 123], 8082))));

        let ctx = request_context(req).await.unwrap();
        assert_eq!(ctx.remote_addr(), "127.0.0.123:8082");
        assert_eq!(ctx.method(), "POST");
        assert_eq!(ctx.uri(), "/?a=1");
        assert_eq!(ctx.proto(), "HTTP/1.1");
        assert_eq!(ctx.header_values("X-Header-A").unwrap(), ["a"]);
        assert_eq!(ctx.form().get("a").unwrap(), &["1"]);
        assert_eq!(ctx.form().get("b").unwrap(), &["2"]);
    }

    #[tokio::test]
    async fn test_get_ignores_form_body() {
        let req = Request::builder()
            .method("GET")
            .uri("/?a=1")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("secret=1"))
            .unwrap();

        let ctx = request_context(req).await.unwrap();
        assert_eq!(ctx.form().get("a").unwrap(), &["1"]);
        assert!(ctx.form().get("secret").is_none());
    }

    #[tokio::test]
    async fn test_put_and_patch_read_form_body() {
        for method in ["PUT", "PATCH"] {
            let req = Request::builder()
                .method(method)
                .uri("/")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("b=2"))
                .unwrap();

            let ctx = request_context(req).await.unwrap();
            assert_eq!(ctx.form().get("b").unwrap(), &["2"]);
        }
    }

    #[tokio::test]
    async fn test_request_context_without_peer() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let ctx = request_context(req).await.unwrap();
        assert_eq!(ctx.remote_addr(), "");
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                ResolveError::Address(AddressError::Parse("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ResolveError::Lookup(LookupError::InvalidAddress("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ResolveError::Lookup(LookupError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ResolveError::Lookup(LookupError::Corrupt("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp = error_response(&err);
            assert_eq!(resp.status(), status);
            assert_eq!(resp.headers()[header::CACHE_CONTROL], NO_CACHE);
        }
    }

    #[tokio::test]
    async fn test_health_handler_reports_cache() {
        let resp = health_handler(State(state(None))).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_short_handler_from_peer() {
        let mut req = Request::builder().uri("/short").body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

        let resp = short_handler(State(state(None)), req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
    }

    #[tokio::test]
    async fn test_missing_trusted_header_is_bad_request() {
        let req = Request::builder().uri("/json").body(Body::empty()).unwrap();
        let resp = json_handler(State(state(Some("X-Real-Ip"))), req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
