//! End-to-end tests for the routing API over an in-memory store.

use destino_router::config::AppConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn add_then_route_cycles_round_robin() {
    let app = common::spawn_app(AppConfig::default()).await;
    let client = common::client();

    // No data yet.
    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Register the first destination.
    let res = client
        .post(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .json(&json!({ "destino": "https://a.example" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "added");

    // Immediately resolvable, no refresh needed.
    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["destino"], "https://a.example");

    // Second destination joins the rotation.
    let res = client
        .post(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .json(&json!({ "destino": "https://b.example" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let mut picks = Vec::new();
    for _ in 0..3 {
        let res = client
            .get(app.url("/route/promo/user1"))
            .header("X-API-Key", &app.api_key)
            .send()
            .await
            .unwrap();
        let body: Value = res.json().await.unwrap();
        picks.push(body["destino"].as_str().unwrap().to_string());
    }
    assert_eq!(picks, ["https://a.example", "https://b.example", "https://a.example"]);
}

#[tokio::test]
async fn missing_or_wrong_api_key_is_unauthorized() {
    let app = common::spawn_app(AppConfig::default()).await;
    let client = common::client();

    let res = client.get(app.url("/route/promo/user1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", "not-the-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_path_params_are_bad_requests() {
    let app = common::spawn_app(AppConfig::default()).await;
    let client = common::client();

    let res = client
        .get(app.url("/route/pro%20mo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Over the configured key length.
    let long_key = "k".repeat(65);
    let res = client
        .get(app.url(&format!("/route/promo/{long_key}")))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = common::spawn_app(AppConfig::default()).await;
    let client = common::client();

    let res = client
        .post(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = client
        .get(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn malformed_payloads_are_bad_requests() {
    let app = common::spawn_app(AppConfig::default()).await;
    let client = common::client();

    // Empty body.
    let res = client
        .post(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Not JSON.
    let res = client
        .post(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .body("destino=https://a.example")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Not an http(s) URL.
    let res = client
        .post(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .json(&json!({ "destino": "ftp://a.example" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = AppConfig::default();
    config.limits.max_body_size = 64;
    let app = common::spawn_app(config).await;
    let client = common::client();

    let padding = "x".repeat(128);
    let res = client
        .post(app.url("/add-destino/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .json(&json!({ "destino": format!("https://a.example/{padding}") }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn routes_with_distinct_tipos_are_independent() {
    let app = common::spawn_app(AppConfig::default()).await;
    let client = common::client();

    for (tipo, destino) in [("promo", "https://promo.example"), ("beta", "https://beta.example")] {
        let res = client
            .post(app.url(&format!("/add-destino/{tipo}/user1")))
            .header("X-API-Key", &app.api_key)
            .json(&json!({ "destino": destino }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(app.url("/route/beta/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["destino"], "https://beta.example");
}
