//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for the relay endpoint, including
//! conditional-GET negotiation and rate limiting.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use route_relay::api::{create_router, CACHE_CONTROL_VALUE};
use route_relay::finder::{InvokeError, RouteFinder};
use route_relay::rate_limit::RateLimiter;
use route_relay::AppState;
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

/// Scripted finder returning a fixed payload (or failing), with a call
/// counter so tests can assert whether the subprocess seam was reached.
struct StubFinder {
    output: Result<Vec<u8>, ()>,
    calls: AtomicUsize,
}

impl StubFinder {
    fn returning(output: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            output: Ok(output.to_vec()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            output: Err(()),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl RouteFinder for StubFinder {
    async fn find_route(&self, _from: &str, _to: &str) -> Result<Vec<u8>, InvokeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output.clone().map_err(|_| InvokeError::NoOutput {
            path: "stub".to_string(),
        })
    }
}

fn create_test_app(finder: Arc<StubFinder>) -> Router {
    let state = AppState::new(finder, Arc::new(RateLimiter::new(1000, 1000)));
    create_router(state, "public")
}

fn request_from(uri: &str, client: &str) -> Request<Body> {
    let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let addr: SocketAddr = format!("{client}:4242").parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

fn request(uri: &str) -> Request<Body> {
    request_from(uri, "127.0.0.1")
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

// == Input Validation Tests ==

#[tokio::test]
async fn test_missing_both_params_returns_400() {
    let finder = StubFinder::returning(b"{}");
    let app = create_test_app(finder.clone());

    let response = app.oneshot(request("/api/find_route")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json["error"].as_str().unwrap(),
        "Missing 'from' or 'to' query parameter"
    );
    assert_eq!(finder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_to_param_returns_400() {
    let finder = StubFinder::returning(b"{}");
    let app = create_test_app(finder.clone());

    let response = app
        .oneshot(request("/api/find_route?from=Alexanderplatz"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(finder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_from_param_returns_400() {
    let finder = StubFinder::returning(b"{}");
    let app = create_test_app(finder.clone());

    let response = app
        .oneshot(request("/api/find_route?from=&to=B"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(finder.calls.load(Ordering::SeqCst), 0);
}

// == Relay and Caching Tests ==

#[tokio::test]
async fn test_successful_route_is_relayed_verbatim() {
    let payload = br#"{"path":["A","B"]}"#;
    let app = create_test_app(StubFinder::returning(payload));

    let response = app
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        CACHE_CONTROL_VALUE
    );
    assert_eq!(
        response.headers().get(header::ETAG).unwrap(),
        route_relay::etag::tag(payload).as_str()
    );
    assert_eq!(body_bytes(response.into_body()).await, payload);
}

#[tokio::test]
async fn test_etag_is_stable_across_identical_bodies() {
    let payload = br#"{"path":["A","B"]}"#;
    let app = create_test_app(StubFinder::returning(payload));

    let first = app
        .clone()
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();
    let second = app
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();

    assert_eq!(
        first.headers().get(header::ETAG).unwrap(),
        second.headers().get(header::ETAG).unwrap()
    );
}

#[tokio::test]
async fn test_matching_if_none_match_returns_304() {
    let payload = br#"{"path":["A","B"]}"#;
    let app = create_test_app(StubFinder::returning(payload));

    // First exchange yields the validator.
    let first = app
        .clone()
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();
    let validator = first.headers().get(header::ETAG).unwrap().clone();

    // Replaying it suppresses the body.
    let mut conditional = request("/api/find_route?from=A&to=B");
    conditional
        .headers_mut()
        .insert(header::IF_NONE_MATCH, validator.clone());
    let response = app.oneshot(conditional).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers().get(header::ETAG).unwrap(), &validator);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        CACHE_CONTROL_VALUE
    );
    assert!(body_bytes(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_stale_if_none_match_returns_full_body() {
    let payload = br#"{"path":["A","B"]}"#;
    let app = create_test_app(StubFinder::returning(payload));

    let mut conditional = request("/api/find_route?from=A&to=B");
    conditional.headers_mut().insert(
        header::IF_NONE_MATCH,
        "0000000000000000000000000000000000000000".parse().unwrap(),
    );
    let response = app.oneshot(conditional).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response.into_body()).await, payload);
}

// == Finder Failure Tests ==

#[tokio::test]
async fn test_finder_failure_returns_422_without_etag() {
    let app = create_test_app(StubFinder::failing());

    let response = app
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().get(header::ETAG).is_none());
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"].as_str().unwrap(), "could not find route");
}

// == Rate Limiting Tests ==

#[tokio::test]
async fn test_sustained_volume_hits_429() {
    let finder = StubFinder::returning(b"{}");
    let state = AppState::new(finder, Arc::new(RateLimiter::new(1, 2)));
    let app = create_router(state, "public");

    let first = app
        .clone()
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();
    let second = app
        .clone()
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();
    let third = app
        .clone()
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);

    // A distinct client in the same window is unaffected.
    let other = app
        .oneshot(request_from("/api/find_route?from=A&to=B", "10.1.1.1"))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoint_is_not_rate_limited() {
    let finder = StubFinder::returning(b"{}");
    let state = AppState::new(finder, Arc::new(RateLimiter::new(1, 1)));
    let app = create_router(state, "public");

    // Exhaust the API budget.
    let _ = app
        .clone()
        .oneshot(request("/api/find_route?from=A&to=B"))
        .await
        .unwrap();

    // Health sits outside the limited group.
    for _ in 0..5 {
        let response = app.clone().oneshot(request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
