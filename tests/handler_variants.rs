mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use httpmock::prelude::*;
use serde_json::{Value, json};
use snp_bridge::api::handlers::search_variants_handler;
use snp_bridge::state::AppState;
use snp_bridge::web::handlers::app_handler;

fn app(state: AppState) -> TestServer {
    let router = Router::new()
        .route("/app", get(app_handler))
        .route("/variants/search", get(search_variants_handler))
        .with_state(state);
    TestServer::new(router).unwrap()
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
async fn test_search_annotates_snps_without_login() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    mock_variants(&ga4gh).await;
    let genotype = ttam
        .mock_async(|when, then| {
            when.method(GET).path("/1/genotype/");
            then.status(200).json_body(common::genotypes_body());
        })
        .await;

    let server = app(common::create_test_state(&ttam, &ga4gh));

    let response = server.get("/variants/search").await;

    response.assert_status_ok();
    genotype.assert_hits_async(0).await;

    let json = response.json::<Value>();
    assert_eq!(json["variantSetId"], "brca-hg37");
    assert_eq!(json["referenceName"], "13");
    assert_eq!(json["genotyped"], false);
    assert_eq!(json["variants"][0]["info"]["23andme.snp"], json!(["i4000377"]));
    assert_eq!(json["variants"][0]["info"]["Pathogenicity"], json!(["Benign"]));
    assert!(json["variants"][1]["info"].get("23andme.snp").is_none());
}

#[tokio::test]
async fn test_search_attaches_calls_after_login() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    mock_variants(&ga4gh).await;
    ttam.mock_async(|when, then| {
        when.method(POST).path("/token/");
        then.status(200)
            .json_body(json!({"access_token": common::TOKEN, "expires_in": 3600}));
    })
    .await;
    ttam.mock_async(|when, then| {
        when.method(GET)
            .path("/1/genotype/")
            .query_param("locations", "i4000377");
        then.status(200).json_body(common::genotypes_body());
    })
    .await;
    ttam.mock_async(|when, then| {
        when.method(GET)
            .path("/1/genotype/")
            .query_param("locations", "rs12913832 i4000377 rs206115");
        then.status(200).json_body(common::genotypes_body());
    })
    .await;
    ttam.mock_async(|when, then| {
        when.method(GET).path("/1/user/");
        then.status(200).json_body(common::user_body());
    })
    .await;

    let state = common::create_test_state(&ttam, &ga4gh);
    let oauth_state = state.auth_service.begin_authorization().state;
    let server = app(state);

    server
        .get("/app")
        .add_query_param("code", "abc")
        .add_query_param("state", &oauth_state)
        .add_query_param("format", "json")
        .await
        .assert_status_ok();

    let response = server.get("/variants/search").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["genotyped"], true);
    assert_eq!(
        json["variants"][0]["info"]["23andme.call"],
        json!(["profile-1:i4000377:GA"])
    );
}

#[tokio::test]
async fn test_search_discovers_variant_set() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    ga4gh
        .mock_async(|when, then| {
            when.method(POST).path("/datasets/search");
            then.status(200)
                .json_body(json!({"datasets": [{"id": "brca", "name": "BRCA Exchange"}]}));
        })
        .await;
    ga4gh
        .mock_async(|when, then| {
            when.method(POST)
                .path("/variantsets/search")
                .body_contains("\"datasetId\":\"brca\"");
            then.status(200).json_body(json!({
                "variantSets": [{"id": "brca-hg38", "datasetId": "brca"}],
                "nextPageToken": null
            }));
        })
        .await;
    let search = ga4gh
        .mock_async(|when, then| {
            when.method(POST)
                .path("/variants/search")
                .body_contains("\"variantSetId\":\"brca-hg38\"");
            then.status(200).json_body(json!({"variants": []}));
        })
        .await;

    let state =
        common::create_test_state_with(&ttam, &ga4gh, None, common::catalog());
    let server = app(state);

    let response = server.get("/variants/search").await;

    response.assert_status_ok();
    search.assert_async().await;
    assert_eq!(response.json::<Value>()["variantSetId"], "brca-hg38");
}

#[tokio::test]
async fn test_search_without_datasets_is_bad_gateway() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    ga4gh
        .mock_async(|when, then| {
            when.method(POST).path("/datasets/search");
            then.status(200).json_body(json!({"datasets": []}));
        })
        .await;

    let state =
        common::create_test_state_with(&ttam, &ga4gh, None, common::catalog());
    let server = app(state);

    let response = server.get("/variants/search").await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_search_region_override() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;
    let search = ga4gh
        .mock_async(|when, then| {
            when.method(POST)
                .path("/variants/search")
                .body_contains("\"referenceName\":\"17\",\"start\":41196311,\"end\":41277500");
            then.status(200).json_body(json!({"variants": []}));
        })
        .await;

    let server = app(common::create_test_state(&ttam, &ga4gh));

    let response = server
        .get("/variants/search")
        .add_query_param("reference_name", "17")
        .add_query_param("start", "41196311")
        .add_query_param("end", "41277500")
        .await;

    response.assert_status_ok();
    search.assert_async().await;
}

#[tokio::test]
async fn test_search_rejects_non_numeric_start() {
    let ttam = MockServer::start_async().await;
    let ga4gh = MockServer::start_async().await;

    let server = app(common::create_test_state(&ttam, &ga4gh));

    let response = server
        .get("/variants/search")
        .add_query_param("start", "abc")
        .await;

    response.assert_status_bad_request();
}
