mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use httpmock::MockServer;
use snp_bridge::web::handlers::index_handler;

#[tokio::test]
async fn test_index_links_to_authorization() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    let authorize = ttam.url("/authorize");

    let app = Router::new()
        .route("/", get(index_handler))
        .with_state(common::create_test_state(&ttam, &ga4gh));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(&authorize));
    assert!(html.contains("response_type=code"));
    assert!(html.contains("client_id=test-client"));
    assert!(html.contains("state="));
    assert!(html.contains("http://localhost:5000/demo/"));
}

#[tokio::test]
async fn test_index_state_changes_per_request() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;

    let app = Router::new()
        .route("/", get(index_handler))
        .with_state(common::create_test_state(&ttam, &ga4gh));
    let server = TestServer::new(app).unwrap();

    let first = server.get("/").await.text();
    let second = server.get("/").await.text();

    assert_ne!(first, second);
}
