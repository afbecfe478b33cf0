//! Name search endpoints / 名称搜索接口

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{catalog_error_response, error_response, ApiError, ApiResponse, ApiResult};
use crate::models::ResolvedEntry;
use crate::search::{normalize, MatchTier, RankedMatch};
use crate::state::AppState;
use crate::utils::{capitalize, format_pokemon_id};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

fn parse_query(query: Result<Query<SearchQuery>, QueryRejection>) -> Result<SearchQuery, ApiError> {
    let Query(query) = query.map_err(|e| error_response(e.status(), e.body_text()))?;
    Ok(query)
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub id: u32,
    pub tier: MatchTier,
    /// "#025 Pikachu"
    pub label: String,
}

impl SearchHit {
    fn new(tier: MatchTier, hit: &RankedMatch) -> Self {
        let name = capitalize(&hit.key);
        let label = match format_pokemon_id(hit.value) {
            Ok(id) => format!("{} {}", id, name),
            Err(_) => name,
        };
        Self {
            name: hit.key.clone(),
            id: hit.value,
            tier,
            label,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub name: String,
    pub id: u32,
}

/// GET /api/search?q= - 名称搜索
///
/// An empty query returns nothing here; listing goes through /api/pokemon.
/// At most `limit` hits (default page size) are returned, in rank order.
pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<SearchHit>> {
    let query = parse_query(query)?;
    let limit = state.config.clamp_page_limit(query.limit);
    let tiers = state.index.search_tiered(&query.q);
    let hits: Vec<SearchHit> = tiers
        .iter()
        .take(limit)
        .map(|(tier, hit)| SearchHit::new(tier, hit))
        .collect();

    tracing::debug!(
        "Search {:?}: {} hits, top tier {}",
        query.q,
        hits.len(),
        hits.first().map(|h| h.tier.as_str()).unwrap_or("none")
    );
    Ok(Json(ApiResponse::success(hits)))
}

/// GET /api/search/resolve?q=&limit= - 搜索并获取条目
///
/// Top `limit` hits are fetched concurrently; output keeps rank order.
pub async fn search_resolve(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<ResolvedEntry>> {
    let query = parse_query(query)?;
    let limit = state.config.clamp_page_limit(query.limit);
    let ids: Vec<u32> = state
        .index
        .search_tiered(&query.q)
        .into_ranked()
        .into_iter()
        .take(limit)
        .map(|hit| hit.value)
        .collect();

    if ids.is_empty() {
        return Ok(Json(ApiResponse::success(Vec::new())));
    }

    let entries = state
        .catalog
        .fetch_entries(&ids)
        .await
        .map_err(|e| catalog_error_response(&e))?;
    Ok(Json(ApiResponse::success(entries)))
}

/// GET /api/lookup/:name - 精确查找
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
) -> ApiResult<LookupResult> {
    let Path(name) = name.map_err(|e| error_response(e.status(), e.body_text()))?;
    match state.index.lookup(&name) {
        Some(id) => Ok(Json(ApiResponse::success(LookupResult {
            name: normalize(&name),
            id,
        }))),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("{:?} is not in the name index", name),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{create_test_router, get_json};
    use crate::catalog::service::tests::MemoryCatalog;
    use axum::http::StatusCode;
    use serde_json::Value;

    fn field<'a>(items: &'a Value, key: &str) -> Vec<&'a Value> {
        items.as_array().unwrap().iter().map(|e| &e[key]).collect()
    }

    #[tokio::test]
    async fn test_search_tiers() {
        let (status, body) = get_json(create_test_router(MemoryCatalog::new()), "/api/search?q=SAUR").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(field(data, "name"), vec!["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(field(data, "tier"), vec!["substring", "substring", "substring"]);

        let (_, body) = get_json(create_test_router(MemoryCatalog::new()), "/api/search?q=ivy").await;
        assert_eq!(body["data"][0]["tier"], "prefix");
        assert_eq!(body["data"][0]["label"], "#002 Ivysaur");

        let (_, body) = get_json(create_test_router(MemoryCatalog::new()), "/api/search?q=eevee").await;
        assert_eq!(body["data"][0]["tier"], "exact");
        assert_eq!(body["data"][0]["id"], 133);
    }

    #[tokio::test]
    async fn test_search_honors_limit() {
        let app = create_test_router(MemoryCatalog::new());
        let (status, body) = get_json(app.clone(), "/api/search?q=saur&limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(field(&body["data"], "name"), vec!["bulbasaur"]);

        // Truncation keeps rank order: the prefix hit beats the earlier substring hit
        let (_, body) = get_json(app.clone(), "/api/search?q=e&limit=1").await;
        assert_eq!(field(&body["data"], "name"), vec!["eevee"]);
        assert_eq!(field(&body["data"], "tier"), vec!["prefix"]);

        let (status, body) = get_json(app, "/api/search?q=saur&limit=many").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_empty_search_returns_nothing() {
        for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
            let (status, body) = get_json(create_test_router(MemoryCatalog::new()), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body["data"].as_array().unwrap().is_empty(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_search_resolve() {
        let app = create_test_router(MemoryCatalog::new());
        let (status, body) = get_json(app.clone(), "/api/search/resolve?q=saur&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(field(&body["data"], "id"), vec![1, 2]);

        let (status, body) = get_json(app, "/api/search/resolve?q=zzz").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_resolve_propagates_fetch_failure() {
        let app = create_test_router(MemoryCatalog::new().with_broken(3));
        let (status, _) = get_json(app, "/api/search/resolve?q=saur").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_lookup() {
        let app = create_test_router(MemoryCatalog::new());
        let (status, body) = get_json(app.clone(), "/api/lookup/Venusaur").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "venusaur");
        assert_eq!(body["data"]["id"], 3);

        let (status, body) = get_json(app, "/api/lookup/missingno").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }
}
