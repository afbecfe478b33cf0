//! HTTP API / HTTP 接口

pub mod metrics;
pub mod pokemon;
pub mod search;
pub mod server;

use std::sync::Arc;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::{CatalogError, DetailError};
use crate::evolution::ResolveError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Error body: `{code, message}` / 错误响应
pub type ApiError = (StatusCode, Json<Value>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(json!({ "code": status.as_u16(), "message": message.into() })),
    )
}

/// Map catalog failures onto HTTP status codes / 图鉴错误映射
pub fn catalog_error_response(err: &CatalogError) -> ApiError {
    let status = match err {
        CatalogError::InvalidId(_) | CatalogError::EmptyRequest | CatalogError::InvalidUrl(_) => {
            StatusCode::BAD_REQUEST
        }
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Status { .. } | CatalogError::Transport(_) => StatusCode::BAD_GATEWAY,
    };
    if status == StatusCode::BAD_GATEWAY {
        tracing::error!("Catalog request failed: {}", err);
    }
    error_response(status, err.to_string())
}

/// A failed chain member is an upstream failure even if the member itself was a 404
pub fn detail_error_response(err: &DetailError) -> ApiError {
    match err {
        DetailError::Catalog(e) => catalog_error_response(e),
        DetailError::Evolution(e @ ResolveError::Fetch { .. }) => {
            tracing::error!("Evolution chain resolution failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
        DetailError::Evolution(e @ ResolveError::StepLimitExceeded { .. }) => {
            tracing::warn!("{}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// Build the API router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/version", get(server::get_version))
        .route("/api/pokemon", get(pokemon::list_pokemon))
        .route("/api/pokemon/by-url", get(pokemon::get_pokemon_by_url))
        .route("/api/pokemon/:id", get(pokemon::get_pokemon))
        .route("/api/pokemon/:id/evolutions", get(pokemon::get_evolutions))
        .route("/api/search", get(search::search))
        .route("/api/search/resolve", get(search::search_resolve))
        .route("/api/lookup/:name", get(search::lookup))
        .route("/metrics", get(metrics::get_metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), metrics::track_metrics))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::catalog::service::tests::{create_test_index, MemoryCatalog};
    use crate::config::AppConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    pub(crate) fn create_test_router(catalog: MemoryCatalog) -> Router {
        create_test_router_with_config(catalog, AppConfig::default())
    }

    pub(crate) fn create_test_router_with_config(catalog: MemoryCatalog, config: AppConfig) -> Router {
        let state = AppState::new(create_test_index(), Arc::new(catalog), config).unwrap();
        router(Arc::new(state))
    }

    /// GET `uri`, return status and raw body text
    pub(crate) async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// GET `uri`, return status and decoded JSON body
    pub(crate) async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, text) = get_text(app, uri).await;
        let body = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("{uri} returned non-JSON body {text:?}: {e}"));
        (status, body)
    }
}
