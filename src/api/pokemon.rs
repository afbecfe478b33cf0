//! Catalog endpoints / 图鉴接口

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{
    catalog_error_response, detail_error_response, error_response, ApiError, ApiResponse, ApiResult,
};
use crate::catalog::{load_evolutions, load_pokemon_detail, pokemon_id_from_url, CatalogError};
use crate::models::{PokemonDetail, ResolvedEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub items: Vec<ResolvedEntry>,
    pub limit: usize,
    pub offset: usize,
    /// A full page means there may be more
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct ByUrlQuery {
    pub url: String,
}

/// Positive ids only / 编号校验
fn parse_id(path: Result<Path<i64>, PathRejection>) -> Result<u32, ApiError> {
    let Path(raw) = path.map_err(|e| error_response(e.status(), e.body_text()))?;
    u32::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| catalog_error_response(&CatalogError::InvalidId(raw)))
}

/// GET /api/pokemon?limit=&offset= - 分页列表
pub async fn list_pokemon(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<PageResponse> {
    let Query(query) = query.map_err(|e| error_response(e.status(), e.body_text()))?;
    let max_limit = state.config.catalog.max_page_limit;
    let limit = match query.limit {
        Some(limit) => limit,
        None => state.config.clamp_page_limit(None) as i64,
    };
    if limit < 1 || limit as usize > max_limit {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("limit must be between 1 and {}", max_limit),
        ));
    }
    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(error_response(StatusCode::BAD_REQUEST, "offset must not be negative"));
    }

    let (limit, offset) = (limit as usize, offset as usize);
    let items = state
        .catalog
        .fetch_page(limit, offset)
        .await
        .map_err(|e| catalog_error_response(&e))?;

    Ok(Json(ApiResponse::success(PageResponse {
        has_more: items.len() == limit,
        items,
        limit,
        offset,
    })))
}

/// GET /api/pokemon/:id - 详情（含进化链）
pub async fn get_pokemon(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<PokemonDetail> {
    let id = parse_id(id)?;
    let detail = load_pokemon_detail(state.catalog.as_ref(), state.index.as_ref(), &state.resolver, id)
        .await
        .map_err(|e| detail_error_response(&e))?;
    Ok(Json(ApiResponse::success(detail)))
}

/// GET /api/pokemon/:id/evolutions - 进化链
pub async fn get_evolutions(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<ResolvedEntry>> {
    let id = parse_id(id)?;
    let evolutions = load_evolutions(state.catalog.as_ref(), state.index.as_ref(), &state.resolver, id)
        .await
        .map_err(|e| detail_error_response(&e))?;
    Ok(Json(ApiResponse::success(evolutions)))
}

/// GET /api/pokemon/by-url?url= - 通过资源地址获取详情
pub async fn get_pokemon_by_url(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ByUrlQuery>, QueryRejection>,
) -> ApiResult<PokemonDetail> {
    let Query(query) = query.map_err(|e| error_response(e.status(), e.body_text()))?;
    let id = pokemon_id_from_url(&state.config.catalog.base_url, query.url.trim())
        .map_err(|e| catalog_error_response(&e))?;
    let detail = load_pokemon_detail(state.catalog.as_ref(), state.index.as_ref(), &state.resolver, id)
        .await
        .map_err(|e| detail_error_response(&e))?;
    Ok(Json(ApiResponse::success(detail)))
}
