//! Query-string extractor that reports malformed input with the API's error
//! envelope instead of axum's plain-text rejection.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Drop-in replacement for `axum::extract::Query`.
///
/// ```ignore
/// async fn handler(ApiQuery(query): ApiQuery<YearQuery>) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri).map_err(|rejection| {
            tracing::debug!(uri = %parts.uri, error = %rejection, "Rejected query string");
            AppError::Validation(rejection.body_text())
        })?;
        Ok(Self(value))
    }
}
