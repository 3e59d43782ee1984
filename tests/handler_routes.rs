mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::Value;
use snp_bridge::routes::app_router;
use snp_bridge::state::AppState;
use tower::ServiceExt;

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app_router(state).oneshot(request).await.unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn mock_variants(ga4gh: &MockServer) {
    ga4gh
        .mock_async(|when, then| {
            when.method(POST).path("/variants/search");
            then.status(200).json_body(common::variants_body());
        })
        .await;
}

#[tokio::test]
async fn test_app_with_trailing_slash_reaches_handler() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;

    let (status, body) = get(common::create_test_state(&ttam, &ga4gh), "/app/").await;

    // No code and no cached token: the report handler answers, not the router.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_demo_with_trailing_slash() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    mock_variants(&ga4gh).await;

    let (status, body) = get(
        common::create_test_state(&ttam, &ga4gh),
        "/demo/?format=json",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["variants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_variant_search_with_trailing_slash() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    mock_variants(&ga4gh).await;

    let (status, body) = get(common::create_test_state(&ttam, &ga4gh), "/variants/search/").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["variantSetId"], "brca-hg37");
}

#[tokio::test]
async fn test_index_and_health() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    let state = common::create_test_state(&ttam, &ga4gh);

    let (status, body) = get(state.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Connect with 23andMe"));

    let (status, _) = get(state, "/health/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;

    let (status, body) = get(common::create_test_state(&ttam, &ga4gh), "/static/style.css").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("font-family"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;

    let (status, _) = get(common::create_test_state(&ttam, &ga4gh), "/nope/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
