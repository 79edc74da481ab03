//! Route definitions for the sales-analytics API.

pub mod analytics;
pub mod customers;
pub mod details;
pub mod fraud;
pub mod health;
pub mod profit;
pub mod quantity;
pub mod revenue;
pub mod yoy;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::AppState;

/// Every analytic endpoint, relative to `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/years", get(revenue::years))
        .route("/monthly-revenue", get(revenue::monthly_revenue))
        .route("/monthly-order-count", get(revenue::monthly_order_count))
        .route("/average-order-value", get(revenue::average_order_value))
        .route("/revenue/by-product", get(revenue::by_product))
        .route("/revenue/by-category", get(revenue::by_category))
        .route("/revenue/by-seller", get(revenue::by_seller))
        .route("/customer-lifetime-value", get(customers::lifetime_value))
        .route("/customers/segments", get(customers::segments))
        .route("/customers/top", get(customers::top))
        .route("/customers/inactive", get(customers::inactive))
        .route("/profit-margin/product", get(profit::by_product))
        .route("/profit-margin/category", get(profit::by_category))
        .route("/yoy/revenue-growth", get(yoy::revenue_growth))
        .route("/yoy/monthly-comparison", get(yoy::monthly_comparison))
        .route("/yoy/revenue-decrease-ratio", get(yoy::revenue_decrease_ratio))
        .route("/revenue-drop/monthly", get(yoy::monthly_drops))
        .route("/revenue-drop/weekly", get(yoy::weekly_drops))
        .route("/revenue-drop/yearly", get(yoy::yearly_drops))
        .route("/fraud/failed-payments", get(fraud::failed_payments))
        .route("/fraud/high-return-customers", get(fraud::high_return_customers))
        .route("/fraud/seller-returns-recent", get(fraud::seller_returns_recent))
        .route("/fraud/seller-returns-alltime", get(fraud::seller_returns_alltime))
        .route("/quantity-sold", get(quantity::quantity_sold))
        .route("/details/product", get(details::product))
        .route("/details/seller", get(details::seller))
        .route("/details/category", get(details::category))
        .route("/analytics/inactive-sellers", get(analytics::inactive_sellers))
        .route("/analytics/returns", get(analytics::returns))
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_url, "Unparseable FRONTEND_URL, allowing any origin");
            cors.allow_origin(Any)
        }
    }
}

/// `TimeoutLayer` answers with an empty 408; give it the standard error body.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::Timeout.into_response();
    }
    response
}

/// Build the full application router. Shared by `main` and the integration tests.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_url);
    let timeout = state.config.request_timeout();

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(map_response(timeout_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
