//! Request metrics middleware and scrape endpoint / 指标中间件与导出接口

use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Instant;

use crate::api::error_response;
use crate::state::AppState;

/// Count and time every routed request / 记录请求数与耗时
pub async fn track_metrics(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(req).await;

    state
        .metrics
        .observe(&method, &path, response.status().as_u16(), start.elapsed());
    response
}

/// GET /metrics - Prometheus 文本格式
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, state.metrics.content_type())], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{create_test_router, get_json, get_text};
    use crate::catalog::service::tests::MemoryCatalog;
    use axum::http::StatusCode;

    fn sample<'a>(text: &'a str, series: &str) -> Option<&'a str> {
        text.lines()
            .find(|line| line.starts_with(series))
            .and_then(|line| line.rsplit(' ').next())
    }

    #[tokio::test]
    async fn test_requests_are_counted_by_route() {
        let app = create_test_router(MemoryCatalog::new());
        let (status, _) = get_json(app.clone(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        get_json(app.clone(), "/api/pokemon/1").await;
        get_json(app.clone(), "/api/pokemon/2").await;
        get_json(app.clone(), "/api/pokemon/404").await;

        let (status, text) = get_text(app, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            sample(&text, r#"pokedex_http_requests_total{method="GET",path="/api/health",status="200"}"#),
            Some("1")
        );
        assert_eq!(
            sample(&text, r#"pokedex_http_requests_total{method="GET",path="/api/pokemon/:id",status="200"}"#),
            Some("2")
        );
        assert_eq!(
            sample(&text, r#"pokedex_http_requests_total{method="GET",path="/api/pokemon/:id",status="404"}"#),
            Some("1")
        );
        assert_eq!(
            sample(&text, r#"pokedex_http_request_duration_seconds_count{method="GET",path="/api/pokemon/:id"}"#),
            Some("3")
        );
    }

    #[tokio::test]
    async fn test_metrics_are_per_state() {
        let first = create_test_router(MemoryCatalog::new());
        get_json(first, "/api/health").await;

        let (_, text) = get_text(create_test_router(MemoryCatalog::new()), "/metrics").await;
        assert!(!text.contains(r#"path="/api/health""#));
    }
}
