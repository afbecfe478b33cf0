//! Shared application state / 应用共享状态

use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::config::AppConfig;
use crate::evolution::EvolutionResolver;
use crate::metrics::RequestMetrics;
use crate::search::NameSearchIndex;

/// Application state / 应用状态
///
/// Everything here is read-only after startup (metrics use their own atomics),
/// so handlers share it through `Arc<AppState>` without locking.
pub struct AppState {
    /// Static name -> id index / 名称索引
    pub index: Arc<NameSearchIndex>,
    /// Remote catalog / 远程图鉴
    pub catalog: Arc<dyn CatalogSource>,
    pub resolver: EvolutionResolver,
    /// Config snapshot taken at startup / 启动时的配置快照
    pub config: AppConfig,
    /// Request counters and latency / 请求指标
    pub metrics: RequestMetrics,
}

impl AppState {
    pub fn new(
        index: NameSearchIndex,
        catalog: Arc<dyn CatalogSource>,
        config: AppConfig,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            index: Arc::new(index),
            catalog,
            resolver: EvolutionResolver::new(config.evolution.max_steps),
            config,
            metrics: RequestMetrics::new()?,
        })
    }
}
