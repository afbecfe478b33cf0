//! Catalog module - remote creature catalog access / 远程图鉴访问
//!
//! The catalog is the "fetch by id" collaborator of the evolution resolver and
//! the data source of the HTTP layer. It only provides primitive operations;
//! composition (detail view, chain resolution) lives in [`service`].

pub mod client;
pub mod service;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ChainNode, PokemonRecord, ResolvedEntry, SpeciesInfo};

pub use client::{pokemon_id_from_url, PokeApiClient};
pub use service::{load_evolutions, load_pokemon_detail, DetailError};

/// Catalog access errors / 图鉴访问错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Identifier-keyed operation called with id <= 0
    #[error("id must be a positive integer, got {0}")]
    InvalidId(i64),
    #[error("no ids provided")]
    EmptyRequest,
    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
    #[error("resource not found: {url}")]
    NotFound { url: String },
    #[error("catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CatalogError {
    /// Transport failures and 5xx may succeed on a later attempt; 404 and decode errors never do
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Transport(e) => !e.is_decode() && !e.is_builder(),
            CatalogError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Fetch a resolved entry by id (the resolver's only remote dependency) / 按编号获取条目
#[async_trait]
pub trait EntryFetcher: Send + Sync {
    async fn fetch_entry(&self, id: u32) -> Result<ResolvedEntry, CatalogError>;
}

/// Catalog source interface (provides only primitive operations) / 图鉴数据源接口
#[async_trait]
pub trait CatalogSource: EntryFetcher {
    /// Source name / 数据源名称
    fn name(&self) -> &str;

    /// One page of the catalog listing, in catalog order / 分页列表
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<ResolvedEntry>, CatalogError>;

    /// Full record for one id (without species data) / 单条详情
    async fn fetch_pokemon(&self, id: u32) -> Result<PokemonRecord, CatalogError>;

    /// Species data by resource url / 物种信息
    async fn fetch_species(&self, url: &str) -> Result<SpeciesInfo, CatalogError>;

    /// Evolution chain root by resource url; `None` for an empty chain / 进化链
    async fn fetch_evolution_chain(&self, url: &str) -> Result<Option<ChainNode>, CatalogError>;

    /// Fetch several entries concurrently, output in `ids` order / 批量获取
    async fn fetch_entries(&self, ids: &[u32]) -> Result<Vec<ResolvedEntry>, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::EmptyRequest);
        }
        futures::future::try_join_all(ids.iter().map(|&id| self.fetch_entry(id))).await
    }
}
