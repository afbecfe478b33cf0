//! Iterative first-child chain resolver / 进化链解析器

use thiserror::Error;

use crate::catalog::{CatalogError, EntryFetcher};
use crate::models::{ChainNode, ResolvedEntry};

/// Maximum chain nodes visited per call unless configured otherwise.
/// Real chains have at most a handful of links.
pub const DEFAULT_MAX_STEPS: usize = 32;

/// Name -> id lookup used per chain node / 名称到编号查找
pub trait IdLookup: Send + Sync {
    fn lookup_id(&self, name: &str) -> Option<u32>;
}

impl<F> IdLookup for F
where
    F: Fn(&str) -> Option<u32> + Send + Sync,
{
    fn lookup_id(&self, name: &str) -> Option<u32> {
        self(name)
    }
}

/// Resolution errors / 解析错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A node whose name was indexed could not be fetched; no partial chain is returned
    #[error("failed to fetch id {id} ({species}) at chain step {step}: {source}")]
    Fetch {
        id: u32,
        species: String,
        step: usize,
        #[source]
        source: CatalogError,
    },
    #[error("evolution chain exceeds {limit} steps")]
    StepLimitExceeded { limit: usize },
}

impl ResolveError {
    /// Underlying catalog error, if any
    pub fn catalog_error(&self) -> Option<&CatalogError> {
        match self {
            ResolveError::Fetch { source, .. } => Some(source),
            ResolveError::StepLimitExceeded { .. } => None,
        }
    }
}

/// Evolution chain resolver / 进化链解析器
#[derive(Debug, Clone, Copy)]
pub struct EvolutionResolver {
    max_steps: usize,
}

impl Default for EvolutionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl EvolutionResolver {
    pub fn new(max_steps: usize) -> Self {
        Self {
            max_steps: max_steps.max(1),
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Resolve `root` and its first-child descendants, earliest ancestor first / 解析进化链
    ///
    /// Fetches run one at a time in chain order. A node whose name is not
    /// indexed (or maps to id 0) is omitted. Any fetch failure fails the call.
    pub async fn resolve<F, L>(
        &self,
        root: Option<&ChainNode>,
        fetcher: &F,
        lookup: &L,
    ) -> Result<Vec<ResolvedEntry>, ResolveError>
    where
        F: EntryFetcher + ?Sized,
        L: IdLookup + ?Sized,
    {
        let mut resolved = Vec::new();
        let mut current = root;
        let mut step = 0;

        while let Some(node) = current {
            if step >= self.max_steps {
                return Err(ResolveError::StepLimitExceeded {
                    limit: self.max_steps,
                });
            }

            match lookup.lookup_id(&node.species_name).filter(|id| *id > 0) {
                Some(id) => {
                    let entry = fetcher.fetch_entry(id).await.map_err(|source| ResolveError::Fetch {
                        id,
                        species: node.species_name.clone(),
                        step,
                        source,
                    })?;
                    resolved.push(entry);
                }
                None => {
                    tracing::debug!(
                        "Species {} not in name index, skipping chain step {}",
                        node.species_name,
                        step
                    );
                }
            }

            current = node.children.first();
            step += 1;
        }

        Ok(resolved)
    }
}

/// Resolve with the default step limit / 使用默认限制解析
pub async fn resolve_chain<F, L>(
    root: Option<&ChainNode>,
    fetcher: &F,
    lookup: &L,
) -> Result<Vec<ResolvedEntry>, ResolveError>
where
    F: EntryFetcher + ?Sized,
    L: IdLookup + ?Sized,
{
    EvolutionResolver::default().resolve(root, fetcher, lookup).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{NameIndexEntry, NameSearchIndex};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;

    /// Records every fetch; ids in `failing` return NotFound
    struct RecordingFetcher {
        calls: Mutex<Vec<u32>>,
        failing: HashSet<u32>,
    }

    impl RecordingFetcher {
        fn new(failing: &[u32]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing: failing.iter().copied().collect(),
            }
        }

        fn calls(&self) -> Vec<u32> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl EntryFetcher for RecordingFetcher {
        async fn fetch_entry(&self, id: u32) -> Result<ResolvedEntry, CatalogError> {
            self.calls.lock().push(id);
            if self.failing.contains(&id) {
                return Err(CatalogError::NotFound {
                    url: format!("test://pokemon/{}", id),
                });
            }
            Ok(ResolvedEntry {
                id,
                name: format!("entry-{}", id),
                url: format!("test://pokemon/{}", id),
                icon_url: None,
                artwork_url: None,
            })
        }
    }

    fn create_test_index() -> NameSearchIndex {
        NameSearchIndex::new(
            [("bulbasaur", 1), ("ivysaur", 2), ("venusaur", 3), ("eevee", 133), ("vaporeon", 134), ("jolteon", 135)]
                .into_iter()
                .map(|(key, value)| NameIndexEntry {
                    key: key.to_string(),
                    value,
                }),
        )
        .unwrap()
    }

    fn ids(entries: &[ResolvedEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.id).collect()
    }

    #[tokio::test]
    async fn test_resolves_in_chain_order() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[]);
        let chain = ChainNode::linear(&["bulbasaur", "ivysaur", "venusaur"]).unwrap();

        let resolved = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap();
        assert_eq!(ids(&resolved), vec![1, 2, 3]);
        assert_eq!(fetcher.calls(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_unindexed_node_is_skipped() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[]);
        let chain = ChainNode::linear(&["bulbasaur", "ivysaur-galar", "venusaur"]).unwrap();

        let resolved = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap();
        assert_eq!(ids(&resolved), vec![1, 3]);
        assert_eq!(fetcher.calls(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_fetch_failure_fails_whole_chain() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[2]);
        let chain = ChainNode::linear(&["bulbasaur", "ivysaur", "venusaur"]).unwrap();

        let err = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap_err();
        match err {
            ResolveError::Fetch { id, ref species, step, .. } => {
                assert_eq!(id, 2);
                assert_eq!(species, "ivysaur");
                assert_eq!(step, 1);
            }
            ref other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.catalog_error(), Some(CatalogError::NotFound { .. })));
        // Walk stops at the failing node
        assert_eq!(fetcher.calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_miss_tolerated_but_fetch_failure_fatal() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[3]);
        let chain = ChainNode::linear(&["unknown", "ivysaur", "venusaur"]).unwrap();

        let err = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap_err();
        assert!(matches!(err, ResolveError::Fetch { id: 3, step: 2, .. }));
    }

    #[tokio::test]
    async fn test_empty_root_returns_empty() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[]);

        let resolved = resolve_chain(None, &fetcher, &index).await.unwrap();
        assert!(resolved.is_empty());
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_only_first_branch_is_followed() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[]);
        let chain = ChainNode::new("eevee")
            .with_child(ChainNode::new("vaporeon"))
            .with_child(ChainNode::new("jolteon"));

        let resolved = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap();
        assert_eq!(ids(&resolved), vec![133, 134]);
    }

    #[tokio::test]
    async fn test_zero_id_is_treated_as_miss() {
        let fetcher = RecordingFetcher::new(&[]);
        let lookup = |name: &str| -> Option<u32> {
            match name {
                "a" => Some(0),
                "b" => Some(7),
                _ => None,
            }
        };
        let chain = ChainNode::linear(&["a", "b", "c"]).unwrap();

        let resolved = resolve_chain(Some(&chain), &fetcher, &lookup).await.unwrap();
        assert_eq!(ids(&resolved), vec![7]);
        assert_eq!(fetcher.calls(), vec![7]);
    }

    #[tokio::test]
    async fn test_step_limit() {
        let names: Vec<String> = (0..10).map(|i| format!("n{}", i)).collect();
        let chain = ChainNode::linear(&names).unwrap();
        let fetcher = RecordingFetcher::new(&[]);
        let lookup = |_: &str| -> Option<u32> { None };

        let err = EvolutionResolver::new(4)
            .resolve(Some(&chain), &fetcher, &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::StepLimitExceeded { limit: 4 }));

        let resolved = EvolutionResolver::new(10)
            .resolve(Some(&chain), &fetcher, &lookup)
            .await
            .unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_resolution_refetches() {
        let index = create_test_index();
        let fetcher = RecordingFetcher::new(&[]);
        let chain = ChainNode::linear(&["bulbasaur", "ivysaur"]).unwrap();

        let first = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap();
        let second = resolve_chain(Some(&chain), &fetcher, &index).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(fetcher.calls(), vec![1, 2, 1, 2]);
    }
}
