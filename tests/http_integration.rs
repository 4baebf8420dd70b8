//! Integration tests for the HTTP surface
//!
//! Sends requests through the full router (layers included) with
//! tower's oneshot; no socket is bound.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use ipinfo::adapters::inbound::{HttpServer, HttpState};
use ipinfo::adapters::outbound::{LruLocationCache, MemoryLocationStore};
use ipinfo::{AddressExtractor, HeaderFilter, IgnoreSet, LocationService};
use std::sync::Arc;
use tower::ServiceExt;

const MALMO_IP: &str = "193.138.218.226";

fn app() -> axum::Router {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/locations.json");
    let store = MemoryLocationStore::from_file(path).unwrap();
    let service = LocationService::new(
        Arc::new(store),
        Arc::new(LruLocationCache::new(64)),
        AddressExtractor::new(Some("X-Real-Ip".to_string())),
        HeaderFilter::new(IgnoreSet::new(["X-Real-Ip"])),
    );
    HttpServer::router(HttpState::new(Arc::new(service)))
}

async fn send(req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("X-Real-Ip", MALMO_IP)
}

#[tokio::test]
async fn test_json_location() {
    let (status, headers, body) = send(get("/json").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CACHE_CONTROL]
        .to_str()
        .unwrap()
        .contains("no-cache"));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ip"], MALMO_IP);
    assert_eq!(json["country"], "Sweden");
    assert_eq!(json["city"], "Malmo");
    assert_eq!(json["tz"], "Europe/Stockholm");
    assert_eq!(json["language"], "en");
    assert!(json["utc_time"].as_str().unwrap().ends_with('Z'));
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_full_text_report() {
    let req = get("/?z=1&a=2")
        .header("X-Header-B", "b")
        .header("X-Header-A", "a")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(&format!("IP: {}\n", MALMO_IP)));
    assert!(body.contains("URI: /?z=1&a=2\n"));
    assert!(body.contains("Country: Sweden\n"));
    assert!(body.contains("City: Malmo\n"));

    // Headers sorted, trusted header ignored
    let a = body.find("X-Header-A: a").unwrap();
    let b = body.find("X-Header-B: b").unwrap();
    assert!(a < b);
    assert!(!body.contains("X-Real-Ip:"));

    let pa = body.find("a: 2").unwrap();
    let pz = body.find("z: 1").unwrap();
    assert!(pa < pz);
}

#[tokio::test]
async fn test_form_post_params() {
    let req = Request::builder()
        .method("POST")
        .uri("/?q=query")
        .header("X-Real-Ip", MALMO_IP)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("q=form&name=value"))
        .unwrap();
    let (status, _, body) = send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Method: POST\n"));
    assert!(body.contains("q: form; query\n"));
    assert!(body.contains("name: value\n"));
}

#[tokio::test]
async fn test_get_form_body_not_params() {
    let req = get("/?q=query")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("secret=1"))
        .unwrap();
    let (status, _, body) = send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("q: query\n"));
    assert!(!body.contains("secret"));
}

#[tokio::test]
async fn test_xml_location() {
    let (status, headers, body) = send(get("/xml").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));
    assert!(headers[header::CACHE_CONTROL]
        .to_str()
        .unwrap()
        .contains("no-cache"));

    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ipinfo>"));
    assert!(body.contains(&format!("<ip>{}</ip>", MALMO_IP)));
    assert!(body.contains("<country>Sweden</country>"));
    assert!(body.contains("<city>Malmo</city>"));
    assert!(body.contains("<tz>Europe/Stockholm</tz>"));
    assert!(body.trim_end().ends_with("</ipinfo>"));
}

#[tokio::test]
async fn test_short_and_compact() {
    let (status, _, body) = send(get("/short").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("City:       Malmo"));

    let (status, _, body) = send(get("/compact").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Sweden Malmo");
    assert_eq!(lines[1], MALMO_IP);
}

#[tokio::test]
async fn test_missing_trusted_header_is_bad_request() {
    let req = Request::builder().uri("/json").body(Body::empty()).unwrap();
    let (status, _, body) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "ERROR\n");
}

#[tokio::test]
async fn test_unknown_address_is_not_found() {
    let req = Request::builder()
        .uri("/json")
        .header("X-Real-Ip", "127.0.0.1")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_header_address() {
    let req = Request::builder()
        .uri("/json")
        .header("X-Real-Ip", "bad ip")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_version_and_health() {
    let (status, _, body) = send(get("/version").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(env!("CARGO_PKG_VERSION")));

    let (status, _, body) = send(get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["cache_capacity"], 64);
}
