use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::json;
use tokio::net::TcpListener;
use triptych::TriptychError;
use triptych::config::Config;
use triptych::converter::{ConverterApp, Currency, build_client, fetch_rates};
use url::Url;

async fn serve(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server failed");
    });
    Url::parse(&format!("http://{addr}/v4/latest/USD")).expect("bad test url")
}

fn client() -> reqwest::Client {
    build_client(&Config::default()).expect("failed to build client")
}

#[tokio::test]
async fn fetched_rates_drive_the_converter() {
    let url = serve(Router::new().route(
        "/v4/latest/USD",
        get(|| async {
            Json(json!({
                "base": "USD",
                "date": "2024-01-01",
                "rates": { "USD": 1, "EUR": 0.9, "RUB": 90.0, "GBP": 0.8 }
            }))
        }),
    ))
    .await;

    let result = fetch_rates(&client(), &url).await;
    let mut app = ConverterApp::new();
    assert!(app.apply_refresh(result));

    app.edit(Currency::Usd, "100");
    assert_eq!(app.fields().get(Currency::Eur), "90.00");
    assert_eq!(app.fields().get(Currency::Rub), "9000.00");

    app.edit(Currency::Eur, "9");
    assert_eq!(app.fields().get(Currency::Usd), "10.00");
    assert_eq!(app.fields().get(Currency::Rub), "900.00");
}

#[tokio::test]
async fn malformed_body_is_a_json_error_and_keeps_old_rates() {
    let url = serve(Router::new().route(
        "/v4/latest/USD",
        get(|| async { "<html>not json</html>" }),
    ))
    .await;

    let result = fetch_rates(&client(), &url).await;
    assert!(matches!(result, Err(TriptychError::Json(_))));

    let mut app = ConverterApp::new();
    assert!(!app.apply_refresh(result));
    assert!(!app.has_rates());
    assert!(app.edit(Currency::Usd, "1").is_empty());
}

#[tokio::test]
async fn missing_quote_is_rejected() {
    let url = serve(Router::new().route(
        "/v4/latest/USD",
        get(|| async { Json(json!({ "rates": { "EUR": 0.9 } })) }),
    ))
    .await;

    let result = fetch_rates(&client(), &url).await;
    assert!(matches!(result, Err(TriptychError::MissingQuote("RUB"))));
}

#[tokio::test]
async fn server_error_status_fails_without_retry() {
    let url = serve(Router::new().route(
        "/v4/latest/USD",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;

    let result = fetch_rates(&client(), &url).await;
    assert!(matches!(result, Err(TriptychError::Reqwest(_))));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = Url::parse(&format!("http://{addr}/v4/latest/USD")).unwrap();

    let result = fetch_rates(&client(), &url).await;
    assert!(matches!(result, Err(TriptychError::Reqwest(_))));
}
