//! Integration tests for the admission limiter over the HTTP surface.

use std::time::Duration;

use destino_router::config::AppConfig;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn requests_past_the_rate_are_rejected() {
    let mut config = AppConfig::default();
    config.rate_limit.requests = 3;
    config.rate_limit.window_secs = 60;
    let app = common::spawn_app(config).await;
    let client = common::client();

    for _ in 0..3 {
        let res = client
            .get(app.url("/route/promo/user1"))
            .header("X-API-Key", &app.api_key)
            .send()
            .await
            .unwrap();
        // Admitted: 404 because there is no data, not 429.
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn admission_runs_before_authentication() {
    let mut config = AppConfig::default();
    config.rate_limit.requests = 1;
    config.rate_limit.window_secs = 60;
    let app = common::spawn_app(config).await;
    let client = common::client();

    // First request spends the budget (401: it never presented a key).
    let res = client.get(app.url("/route/promo/user1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Second is rejected by admission even with a valid key.
    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn window_expiry_grants_a_fresh_burst() {
    let mut config = AppConfig::default();
    config.rate_limit.requests = 2;
    config.rate_limit.window_secs = 1;
    let app = common::spawn_app(config).await;
    let client = common::client();

    for _ in 0..2 {
        let res = client
            .get(app.url("/route/promo/user1"))
            .header("X-API-Key", &app.api_key)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let res = client
        .get(app.url("/route/promo/user1"))
        .header("X-API-Key", &app.api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND, "fresh burst after the window");
}
