//! HTTP contract tests: the full router driven in-process over a recording
//! in-memory store.
//!
//! Run with: `cargo test --test api_contract_test`

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use chrono::NaiveDate;
use salesdash::services::{fraud, quantity, returns, revenue, sellers};
use salesdash::store::memory::MemoryStore;
use salesdash::store::RpcArg;
use serde_json::json;

use common::{app, app_with, get_json, test_config, SlowStore};

// ──────────────────────────────────────────────────────────
// Shape A: optional year
// ──────────────────────────────────────────────────────────

#[tokio::test]
async fn omitted_year_and_all_are_identical() {
    let rows = vec![json!({ "month_name": "January", "total_revenue": "1000.50", "total_orders": "20" })];
    let store = Arc::new(MemoryStore::new().with_function(revenue::MONTHLY_REVENUE, rows.clone()));
    let app = app(store.clone());

    let (status_omitted, body_omitted) = get_json(&app, "/api/monthly-revenue").await;
    let (status_all, body_all) = get_json(&app, "/api/monthly-revenue?year=all").await;
    let (status_upper, _) = get_json(&app, "/api/monthly-revenue?year=ALL").await;

    assert_eq!(status_omitted, StatusCode::OK);
    assert_eq!(status_all, StatusCode::OK);
    assert_eq!(status_upper, StatusCode::OK);
    assert_eq!(body_omitted, body_all);
    assert_eq!(body_omitted, json!(rows));

    let calls = store.calls();
    assert_eq!(calls.len(), 3);
    for call in &calls {
        assert_eq!(call.function, revenue::MONTHLY_REVENUE);
        assert_eq!(call.param("p_year"), Some(&RpcArg::Int(None)));
    }
}

#[tokio::test]
async fn explicit_year_is_forwarded() {
    let store = Arc::new(MemoryStore::new().with_function(revenue::REVENUE_BY_CATEGORY, vec![]));
    let app = app(store.clone());

    let (status, body) = get_json(&app, "/api/revenue/by-category?year=2023").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(
        store.last_call().unwrap().param("p_year"),
        Some(&RpcArg::Int(Some(2023)))
    );
}

#[tokio::test]
async fn non_numeric_year_is_rejected() {
    let store = Arc::new(MemoryStore::new().with_function(revenue::MONTHLY_REVENUE, vec![]));
    let app = app(store.clone());

    let (status, body) = get_json(&app, "/api/monthly-revenue?year=twenty").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid year" }));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn years_endpoint_takes_no_params() {
    let store = Arc::new(
        MemoryStore::new().with_function(revenue::AVAILABLE_YEARS, vec![json!({ "year": 2024 })]),
    );
    let app = app(store.clone());

    let (status, body) = get_json(&app, "/api/years").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "year": 2024 }]));
    assert!(store.last_call().unwrap().args.is_empty());
}

// ──────────────────────────────────────────────────────────
// Shape B: required keys
// ──────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_required_key_never_reaches_the_store() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    for (uri, message) in [
        ("/api/details/product", "Product ID is required"),
        ("/api/details/product?product_id=", "Product ID is required"),
        ("/api/details/seller?year=2023", "Seller ID is required"),
        ("/api/details/category", "Category is required"),
        ("/api/analytics/inactive-sellers?endMonth=2024-03", "startMonth is required"),
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], message, "{uri}");
    }
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn product_details_forwards_key_and_year() {
    let store = Arc::new(MemoryStore::new().with_function(
        "get_product_sales_details",
        vec![json!({ "product_id": 7, "total_revenue": 12.5 })],
    ));
    let app = app(store.clone());

    let (status, body) = get_json(&app, "/api/details/product?product_id=7&year=2022").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["product_id"], 7);

    let call = store.last_call().unwrap();
    assert_eq!(call.param("p_product_id"), Some(&RpcArg::Text(Some("7".into()))));
    assert_eq!(call.param("p_year"), Some(&RpcArg::Int(Some(2022))));
}

#[tokio::test]
async fn inactive_sellers_expands_month_range() {
    let store = Arc::new(MemoryStore::new().with_function(sellers::INACTIVE_SELLERS, vec![]));
    let app = app(store.clone());

    let (status, _) = get_json(
        &app,
        "/api/analytics/inactive-sellers?startMonth=2024-01&endMonth=2024-02",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let call = store.last_call().unwrap();
    assert_eq!(
        call.param("p_start_date"),
        Some(&RpcArg::Date(NaiveDate::from_ymd_opt(2024, 1, 1)))
    );
    assert_eq!(
        call.param("p_end_date"),
        Some(&RpcArg::Date(NaiveDate::from_ymd_opt(2024, 2, 29)))
    );

    let (status, body) = get_json(
        &app,
        "/api/analytics/inactive-sellers?startMonth=2024-05&endMonth=2024-02",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "startMonth must not be after endMonth");

    let (status, body) = get_json(
        &app,
        "/api/analytics/inactive-sellers?startMonth=2024-13&endMonth=2024-02",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid startMonth");
    assert_eq!(store.call_count(), 1, "rejected ranges never reach the store");
}

// ──────────────────────────────────────────────────────────
// Defaults
// ──────────────────────────────────────────────────────────

#[tokio::test]
async fn fraud_defaults_apply_when_keys_absent() {
    let store = Arc::new(
        MemoryStore::new()
            .with_function(fraud::FAILED_PAYMENTS, vec![])
            .with_function(fraud::HIGH_RETURN_CUSTOMERS, vec![])
            .with_function(fraud::SELLER_RETURNS_RECENT, vec![])
            .with_function(fraud::SELLER_RETURNS_ALLTIME, vec![]),
    );
    let app = app(store.clone());

    for uri in [
        "/api/fraud/failed-payments",
        "/api/fraud/high-return-customers",
        "/api/fraud/seller-returns-recent",
        "/api/fraud/seller-returns-alltime",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }

    let calls = store.calls();
    assert_eq!(calls[0].param("p_days"), Some(&RpcArg::Int(Some(15))));
    assert_eq!(calls[0].param("p_min_attempts"), Some(&RpcArg::Int(Some(2))));
    assert_eq!(calls[1].param("p_min_orders"), Some(&RpcArg::Int(Some(5))));
    assert_eq!(
        calls[1].param("p_min_return_rate"),
        Some(&RpcArg::Numeric(Some(0.30)))
    );
    assert_eq!(calls[2].param("p_days"), Some(&RpcArg::Int(Some(30))));
    assert_eq!(calls[2].param("p_min_items"), Some(&RpcArg::Int(Some(10))));
    assert_eq!(calls[3].param("p_days"), None);
    assert_eq!(calls[3].param("p_min_items"), Some(&RpcArg::Int(Some(10))));
}

#[tokio::test]
async fn fraud_overrides_are_forwarded_unvalidated() {
    let store = Arc::new(MemoryStore::new().with_function(fraud::FAILED_PAYMENTS, vec![]));
    let app = app(store.clone());

    let (status, _) = get_json(&app, "/api/fraud/failed-payments?days=-3&min_attempts=0").await;
    assert_eq!(status, StatusCode::OK);
    let call = store.last_call().unwrap();
    assert_eq!(call.param("p_days"), Some(&RpcArg::Int(Some(-3))));
    assert_eq!(call.param("p_min_attempts"), Some(&RpcArg::Int(Some(0))));

    let (status, body) = get_json(&app, "/api/fraud/failed-payments?days=soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid days");
}

#[tokio::test]
async fn top_customers_default_limit() {
    let store = Arc::new(MemoryStore::new().with_function("get_top_customers", vec![]));
    let app = app(store.clone());

    let (status, _) = get_json(&app, "/api/customers/top?year=2024").await;
    assert_eq!(status, StatusCode::OK);
    let call = store.last_call().unwrap();
    assert_eq!(call.param("p_limit"), Some(&RpcArg::Int(Some(10))));
    assert_eq!(call.param("p_year"), Some(&RpcArg::Int(Some(2024))));
}

#[tokio::test]
async fn quantity_sold_dispatches_on_type() {
    let store = Arc::new(
        [
            quantity::BY_PRODUCT,
            quantity::BY_YEAR,
            quantity::BY_CATEGORY,
            quantity::BY_CATEGORY_YEAR,
        ]
        .into_iter()
        .fold(MemoryStore::new(), |s, f| s.with_function(f, vec![])),
    );
    let app = app(store.clone());

    for (uri, function) in [
        ("/api/quantity-sold", quantity::BY_PRODUCT),
        ("/api/quantity-sold?type=year", quantity::BY_YEAR),
        ("/api/quantity-sold?type=category&year=2023", quantity::BY_CATEGORY),
        ("/api/quantity-sold?type=category_year", quantity::BY_CATEGORY_YEAR),
    ] {
        let (status, _) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(store.last_call().unwrap().function, function, "{uri}");
    }

    let (status, body) = get_json(&app, "/api/quantity-sold?type=weekly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid type");
}

// ──────────────────────────────────────────────────────────
// Return analytics
// ──────────────────────────────────────────────────────────

fn returns_view() -> Vec<serde_json::Value> {
    vec![
        json!({ "product_id": 1, "product_name": "Lamp", "category_name": "Home", "year": 2023, "month": 1, "total_sold": 10, "total_returned": 1, "revenue_lost": 5.0 }),
        json!({ "product_id": 1, "product_name": "Lamp", "category_name": "Home", "year": 2024, "month": 2, "total_sold": 20, "total_returned": 2, "revenue_lost": 10.0 }),
        json!({ "product_id": 2, "product_name": "Desk", "category_name": "Office", "year": 2024, "month": 2, "total_sold": "3", "total_returned": "1", "revenue_lost": "80.00" }),
        json!({ "product_id": 3, "product_name": "Pen", "category_name": "Office", "year": 2024, "month": 3, "total_sold": 50, "total_returned": 0, "revenue_lost": 0 }),
    ]
}

#[tokio::test]
async fn returns_grouped_by_product() {
    let store = Arc::new(MemoryStore::new().with_view(returns::RETURNS_VIEW, returns_view()));
    let app = app(store.clone());

    let (status, body) = get_json(&app, "/api/analytics/returns").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2, "zero-return product is excluded");

    assert_eq!(rows[0]["product_id"], 2);
    assert_eq!(rows[0]["return_rate"], 1.0 / 3.0 * 100.0);
    assert_eq!(rows[1]["product_id"], 1);
    assert_eq!(rows[1]["total_sold"], 30);
    assert_eq!(rows[1]["total_returned"], 3);
    assert_eq!(rows[1]["return_rate"], 10.0);
    assert_eq!(rows[1]["product_name"], "Lamp");
    assert!(rows[1].get("year").is_none());

    for row in rows {
        let sold = row["total_sold"].as_f64().unwrap();
        let returned = row["total_returned"].as_f64().unwrap();
        let expected = returned / sold * 100.0;
        assert_eq!(row["return_rate"].as_f64().unwrap(), expected);
    }
    assert_eq!(store.view_reads(), vec![returns::RETURNS_VIEW.to_string()]);
}

#[tokio::test]
async fn returns_grouped_by_year_and_month() {
    let store = Arc::new(MemoryStore::new().with_view(returns::RETURNS_VIEW, returns_view()));
    let app = app(store.clone());

    let (status, body) = get_json(&app, "/api/analytics/returns?type=year").await;
    assert_eq!(status, StatusCode::OK);
    let years: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2024, 2023]);

    let (status, body) = get_json(&app, "/api/analytics/returns?type=month&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1, "March 2024 has no returns");
    assert_eq!(rows[0]["month"], 2);
    assert_eq!(rows[0]["total_returned"], 3);

    let (status, body) = get_json(&app, "/api/analytics/returns?type=month").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Year is required");

    let (status, body) =
        get_json(&app, "/api/analytics/returns?type=month&year=2024&month=13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid month");
}

// ──────────────────────────────────────────────────────────
// Failures
// ──────────────────────────────────────────────────────────

#[tokio::test]
async fn backing_failure_uses_stable_envelope() {
    let store = Arc::new(
        MemoryStore::new().with_failing_function(revenue::MONTHLY_REVENUE, "division by zero"),
    );
    let app = app(store);

    let (status, body) = get_json(&app, "/api/monthly-revenue?year=2023").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch analytics data");
    assert!(body["details"].as_str().unwrap().contains("division by zero"));
}

#[tokio::test]
async fn missing_function_or_view_is_server_error() {
    let app = app(Arc::new(MemoryStore::new()));

    let (status, body) = get_json(&app, "/api/customers/segments").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch analytics data");

    let (status, body) = get_json(&app, "/api/analytics/returns").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch analytics data");
}

#[tokio::test]
async fn repeated_query_key_uses_error_envelope() {
    let store = Arc::new(
        MemoryStore::new()
            .with_function(revenue::MONTHLY_REVENUE, vec![])
            .with_function(fraud::FAILED_PAYMENTS, vec![]),
    );
    let app = app(store.clone());

    for uri in [
        "/api/monthly-revenue?year=2023&year=2024",
        "/api/fraud/failed-payments?days=1&days=2",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn slow_store_times_out_with_envelope() {
    let store = SlowStore::new(
        MemoryStore::new().with_function(revenue::MONTHLY_REVENUE, vec![]),
        Duration::from_secs(3),
    );
    let mut config = test_config();
    config.request_timeout_secs = 1;
    let app = app_with(Arc::new(store), config);

    let (status, body) = get_json(&app, "/api/monthly-revenue").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({ "error": "Request timed out" }));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app(Arc::new(MemoryStore::new()));
    let (status, _) = get_json(&app, "/api/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints() {
    let app = app(Arc::new(MemoryStore::new()));

    let (status, body) = get_json(&app, "/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));

    let (status, body) = get_json(&app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "connected" }));
}
