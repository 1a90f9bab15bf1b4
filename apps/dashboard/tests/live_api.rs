use std::time::Duration;

use finboard_core::budgets::BudgetTier;
use finboard_core::utils::time_utils::today;
use finboard_dashboard::{snapshot::report, ApiClient, ClientError};
use finboard_server::{api::app_router, build_state, config::Config};
use reqwest::StatusCode;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

struct LiveServer {
    base_url: String,
    _dir: TempDir,
}

async fn start_server() -> LiveServer {
    let dir = tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("dashboard.db").to_string_lossy().to_string(),
        jwt_secret: Some(vec![3u8; 32]),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let router = app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    LiveServer {
        base_url: format!("http://{}", addr),
        _dir: dir,
    }
}

async fn category_id(http: &reqwest::Client, base: &str, name: &str) -> i64 {
    let categories: Value = http
        .get(format!("{}/categories/", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    categories
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .and_then(|c| c["category_id"].as_i64())
        .unwrap()
}

async fn post(http: &reqwest::Client, url: String, body: Value) {
    let response = http.post(url).json(&body).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn snapshot_of_an_empty_database() {
    let server = start_server().await;
    let client = ApiClient::new(&server.base_url, None, Duration::from_secs(5)).unwrap();

    let snap = client.fetch_snapshot().await.unwrap();
    assert_eq!(snap.summary.transaction_count, 0);
    assert_eq!(snap.summary.balance, dec!(0));
    assert_eq!(snap.trend.len(), 6);
    assert!(snap.budgets.is_empty());
    assert!(snap.recent.is_empty());
}

#[tokio::test]
async fn snapshot_reflects_transactions_and_budgets() {
    let server = start_server().await;
    let base = server.base_url.as_str();
    let http = reqwest::Client::new();

    let salary = category_id(&http, base, "Salary").await;
    let food = category_id(&http, base, "Food & Dining").await;
    let date = today().to_string();

    post(
        &http,
        format!("{}/transactions/", base),
        json!({"amount": 100000.0, "type": "INCOME", "description": "October pay",
               "transaction_date": date, "category_id": salary}),
    )
    .await;
    post(
        &http,
        format!("{}/transactions/", base),
        json!({"amount": 1500.0, "type": "EXPENSE", "description": "Weekly shop",
               "transaction_date": date, "category_id": food}),
    )
    .await;
    post(
        &http,
        format!("{}/budgets/", base),
        json!({"category_id": food, "amount": 1000.0}),
    )
    .await;

    let client = ApiClient::new(base, None, Duration::from_secs(5)).unwrap();
    let snap = client.fetch_snapshot().await.unwrap();

    assert_eq!(snap.summary.total_income, dec!(100000));
    assert_eq!(snap.summary.total_expenses, dec!(1500));
    assert_eq!(snap.summary.balance, dec!(98500));
    assert_eq!(snap.summary.transaction_count, 2);

    let top = snap.top_expenses();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].category_name, "Food & Dining");

    assert_eq!(snap.budgets.len(), 1);
    assert_eq!(snap.budgets[0].status, BudgetTier::Over);
    assert_eq!(snap.recent.len(), 2);

    let current = snap.trend.last().unwrap();
    assert_eq!(current.balance, dec!(98500));

    let text = report(&snap);
    assert!(text.contains("$98,500.00"));
    assert!(text.contains("OVER"));
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    // Bind and drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", addr), None, Duration::from_secs(2)).unwrap();
    let err = client.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
