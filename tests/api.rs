//! HTTP surface tests against a stub page source

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use ogre::prelude::*;
use serde_json::{json, Value};
use tower::util::ServiceExt;

const MOVIE_PAGE: &str = r#"<!doctype html>
<html><head>
<title>The Rock (1996)</title>
<meta property="og:site_name" content="IMDb">
<meta property="og:title" content="The Rock">
<meta property="og:type" content="video.movie">
<meta property="og:url" content="https://www.imdb.com/title/tt0117500/">
<meta property="og:image" content="https://example.com/rock.jpg">
<meta property="og:image:secure_url" content="https://secure.example.com/rock.jpg">
<meta property="og:image:type" content="image/jpeg">
<meta property="og:image:width" content="400">
<meta property="og:image:height" content="300">
<meta property="og:image" content="https://example.com/rock2.jpg">
<meta property="og:video" content="ignored: plain video is not an alias">
<meta property="og:video:url" content="https://example.com/trailer.mp4">
<meta property="og:video:url" content="https://example.com/trailer-hd.mp4">
<meta name="description" content="not namespaced">
</head><body></body></html>"#;

struct StubFetcher {
    pages: HashMap<String, String>,
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        self.pages.get(url).cloned().ok_or(Error::Status(404))
    }
}

fn setup_app() -> axum::Router {
    let mut pages = HashMap::new();
    pages.insert("https://example.com/movie".to_string(), MOVIE_PAGE.to_string());
    pages.insert("https://example.com/bare".to_string(), "<html><body>hi</body></html>".to_string());
    let service = Ogre::with_fetcher(Arc::new(StubFetcher { pages }), "og");
    ogre::api::router(Arc::new(service))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn structures_a_page() {
    let response = setup_app().oneshot(get("/?url=https%3A%2F%2Fexample.com%2Fmovie")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "site_name": "IMDb",
            "type": "video.movie",
            "title": "The Rock",
            "url": "https://www.imdb.com/title/tt0117500/",
            "videos": [{ "url": "https://example.com/trailer-hd.mp4" }],
            "images": [
                {
                    "height": "300",
                    "secure_url": "https://secure.example.com/rock.jpg",
                    "type": "image/jpeg",
                    "url": "https://example.com/rock.jpg",
                    "width": "400"
                },
                { "url": "https://example.com/rock2.jpg" }
            ]
        })
    );
}

#[tokio::test]
async fn page_without_metadata_is_an_empty_object() {
    let response = setup_app().oneshot(get("/?url=https://example.com/bare")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!({}));
}

#[tokio::test]
async fn any_path_extracts() {
    let response = setup_app().oneshot(get("/some/path?url=https://example.com/bare")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_or_empty_url_is_rejected() {
    for uri in ["/", "/?url=", "/?other=1"] {
        let response = setup_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(extract_json(response.into_body()).await, json!({ "message": "Invalid URL" }));
    }
}

#[tokio::test]
async fn repeated_url_takes_the_first_value() {
    let response = setup_app()
        .oneshot(get("/?url=https://example.com/bare&url=https://example.com/missing"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!({}));

    let response = setup_app()
        .oneshot(get("/?url=https://example.com/missing&url=https://example.com/bare"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));
    assert_eq!(extract_json(response.into_body()).await, json!({ "message": "Invalid URL" }));
}

#[tokio::test]
async fn upstream_failure_is_reported_as_invalid_url() {
    let response = setup_app().oneshot(get("/?url=https://example.com/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response.into_body()).await, json!({ "message": "Invalid URL" }));
}

#[tokio::test]
async fn health_reports_version() {
    let response = setup_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "ogre");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
