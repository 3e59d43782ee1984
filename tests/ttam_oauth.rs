mod common;

use httpmock::prelude::*;
use serde_json::json;
use snp_bridge::domain::gateways::OAuthGateway;
use snp_bridge::infrastructure::ttam::{OAuthSettings, TtamOAuth};
use url::Url;

fn oauth(server: &MockServer) -> TtamOAuth {
    TtamOAuth::new(
        OAuthSettings {
            client_id: common::CLIENT_ID.to_string(),
            client_secret: "wrong".to_string(),
            redirect_uri: Url::parse("http://localhost:5000/app/").unwrap(),
            scopes: vec!["basic".to_string()],
            authorize_url: Url::parse(&server.url("/authorize")).unwrap(),
            token_url: Url::parse(&server.url("/token/")).unwrap(),
            select_profile: false,
        },
        &common::http_settings(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_exchange_posts_authorization_code_form() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/token/")
                .body_contains("grant_type=authorization_code")
                .body_contains("code=abc")
                .body_contains("client_id=test-client");
            then.status(200)
                .json_body(json!({"access_token": common::TOKEN, "expires_in": 60}));
        })
        .await;

    let access = oauth(&server).exchange_code("abc").await.unwrap();

    token.assert_async().await;
    assert_eq!(access.value, common::TOKEN);
    assert!(access.expires_at.is_some());
}

#[tokio::test]
async fn test_rejected_client_credentials() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/token/");
            then.status(401).json_body(json!({"error": "invalid_client"}));
        })
        .await;

    let err = oauth(&server).exchange_code("abc").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("client credentials"));
}

#[tokio::test]
async fn test_rejected_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/token/");
            then.status(400).json_body(json!({"error": "invalid_grant"}));
        })
        .await;

    let err = oauth(&server).exchange_code("used").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("Authorization code"));
}
