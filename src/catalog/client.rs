//! PokeAPI HTTP client / PokeAPI HTTP客户端

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    EvolutionChainResponse, PokemonDetailResponse, PokemonListResponse, SpeciesResponse,
};
use super::{CatalogError, CatalogSource, EntryFetcher};
use crate::config::CatalogConfig;
use crate::models::{ChainNode, PokemonRecord, ResolvedEntry, SpeciesInfo};
use crate::utils::id_from_resource_url;

/// Parse `{base}/pokemon/{id}[/]` into the id / 从条目地址解析编号
pub fn pokemon_id_from_url(base_url: &str, url: &str) -> Result<u32, CatalogError> {
    let prefix = format!("{}/pokemon/", base_url.trim_end_matches('/'));
    if !url.starts_with(&prefix) {
        return Err(CatalogError::InvalidUrl(url.to_string()));
    }
    let rest = url[prefix.len()..].trim_end_matches('/');
    if rest.is_empty() || rest.contains('/') {
        return Err(CatalogError::InvalidUrl(url.to_string()));
    }
    id_from_resource_url(rest).ok_or_else(|| CatalogError::InvalidUrl(url.to_string()))
}

/// PokeAPI HTTP client / PokeAPI HTTP客户端
pub struct PokeApiClient {
    client: Client,
    /// Base url without trailing slash / 基础地址
    base_url: String,
    /// Total attempts, at least 1
    max_attempts: u32,
    backoff: Duration,
}

impl PokeApiClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| CatalogError::InvalidUrl(base_url.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Canonical resource url of an entry / 条目资源地址
    pub fn entry_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    fn parse_url(raw: &str) -> Result<Url, CatalogError> {
        Url::parse(raw).map_err(|_| CatalogError::InvalidUrl(raw.to_string()))
    }

    /// GET + decode with retry on transport errors and 5xx / 带重试的 GET
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.get_json_once(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        "GET {} failed (attempt {}/{}): {}, retrying...",
                        url,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CatalogError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { url: url.to_string() });
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.json::<T>().await?)
    }

    async fn fetch_detail(&self, id: u32) -> Result<PokemonDetailResponse, CatalogError> {
        if id == 0 {
            return Err(CatalogError::InvalidId(0));
        }
        let url = Self::parse_url(&self.entry_url(id))?;
        self.get_json(url).await
    }
}

#[async_trait]
impl EntryFetcher for PokeApiClient {
    async fn fetch_entry(&self, id: u32) -> Result<ResolvedEntry, CatalogError> {
        let detail = self.fetch_detail(id).await?;
        Ok(detail.to_entry(self.entry_url(detail.id)))
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    fn name(&self) -> &str {
        "pokeapi"
    }

    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<ResolvedEntry>, CatalogError> {
        let url = Url::parse_with_params(
            &format!("{}/pokemon", self.base_url),
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .map_err(|_| CatalogError::InvalidUrl(self.base_url.clone()))?;

        let list: PokemonListResponse = self.get_json(url).await?;

        let ids: Vec<u32> = list
            .results
            .iter()
            .filter_map(|item| {
                let id = id_from_resource_url(&item.url);
                if id.is_none() {
                    tracing::debug!("Skipping list item {} with unparsable url {}", item.name, item.url);
                }
                id
            })
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_entries(&ids).await
    }

    async fn fetch_pokemon(&self, id: u32) -> Result<PokemonRecord, CatalogError> {
        let detail = self.fetch_detail(id).await?;
        let url = self.entry_url(detail.id);
        Ok(detail.into_record(url))
    }

    async fn fetch_species(&self, url: &str) -> Result<SpeciesInfo, CatalogError> {
        let species: SpeciesResponse = self.get_json(Self::parse_url(url)?).await?;
        Ok(species.into())
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<Option<ChainNode>, CatalogError> {
        let chain: EvolutionChainResponse = self.get_json(Self::parse_url(url)?).await?;
        Ok(chain.chain.map(ChainNode::from))
    }
}
