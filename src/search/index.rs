//! Name search index - immutable name -> id table with tiered ranking / 名称索引
//!
//! Primitive operations / 基本操作：
//! - search: tiered ranking (exact, prefix, substring) / 分层排序搜索
//! - lookup: exact normalized key lookup / 精确查找
//!
//! The index is read-only after construction and can be shared behind an `Arc`
//! across any number of concurrent callers.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::normalize::normalize;
use super::schema::{NameIndexEntry, RankedMatch, TieredMatches};
use crate::evolution::IdLookup;

/// Index construction errors / 索引构建错误
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse index file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("index entry {name:?} has invalid id {value} (must be a positive integer)")]
    InvalidIdentifier { name: String, value: String },
    #[error("duplicate index key {name:?} (keys are case-insensitive)")]
    DuplicateKey { name: String },
}

/// Entry with its precomputed normalized key / 带规范化键的条目
#[derive(Debug, Clone)]
struct IndexedName {
    entry: NameIndexEntry,
    normalized: String,
}

/// Immutable name index / 不可变名称索引
#[derive(Debug, Clone, Default)]
pub struct NameSearchIndex {
    /// Entries in source order / 按源顺序存储
    entries: Vec<IndexedName>,
    /// Normalized key -> position in `entries` / 规范化键 -> 下标
    by_key: HashMap<String, usize>,
}

impl NameSearchIndex {
    /// Build from entries in source order / 从条目构建
    pub fn new<I>(entries: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = NameIndexEntry>,
    {
        let mut index = Self::default();

        for entry in entries {
            if entry.value == 0 {
                return Err(IndexError::InvalidIdentifier {
                    name: entry.key,
                    value: "0".to_string(),
                });
            }

            let normalized = normalize(&entry.key);
            if index.by_key.contains_key(&normalized) {
                return Err(IndexError::DuplicateKey { name: entry.key });
            }

            index.by_key.insert(normalized.clone(), index.entries.len());
            index.entries.push(IndexedName { entry, normalized });
        }

        Ok(index)
    }

    /// Build from a JSON object `{"name": id, ...}`; key order is kept / 从 JSON 文本构建
    pub fn from_json_str(json: &str) -> Result<Self, IndexError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            let id = value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0);
            match id {
                Some(id) => entries.push(NameIndexEntry { key, value: id }),
                None => {
                    return Err(IndexError::InvalidIdentifier {
                        name: key,
                        value: value.to_string(),
                    })
                }
            }
        }

        Self::new(entries)
    }

    /// Load from a JSON file on disk / 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let index = Self::from_json_str(&raw)?;
        tracing::info!(
            "Loaded name index from {:?} ({} entries)",
            path.as_ref(),
            index.len()
        );
        Ok(index)
    }

    /// Number of indexed names / 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order / 按源顺序返回条目
    pub fn entries(&self) -> impl Iterator<Item = &NameIndexEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Rank all entries against `query` into three tiers / 分层搜索
    ///
    /// An empty (after trimming) query yields empty tiers; use [`search`](Self::search)
    /// for the list-all behavior.
    pub fn search_tiered(&self, query: &str) -> TieredMatches {
        let query = normalize(query);
        let mut tiers = TieredMatches::default();
        if query.is_empty() {
            return tiers;
        }

        for indexed in &self.entries {
            let key = indexed.normalized.as_str();
            if key == query {
                tiers.exact.push(RankedMatch::from(&indexed.entry));
            } else if key.starts_with(&query) {
                tiers.prefix.push(RankedMatch::from(&indexed.entry));
            } else if key.contains(&query) {
                tiers.substring.push(RankedMatch::from(&indexed.entry));
            }
        }

        tiers
    }

    /// Ranked search / 搜索
    ///
    /// Empty or whitespace-only queries return every entry in source order.
    /// Otherwise: exact ++ prefix ++ substring, each in source order.
    pub fn search(&self, query: &str) -> Vec<RankedMatch> {
        if normalize(query).is_empty() {
            return self.entries().map(RankedMatch::from).collect();
        }
        self.search_tiered(query).into_ranked()
    }

    /// Exact normalized lookup / 精确查找
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.by_key
            .get(&normalize(name))
            .map(|&pos| self.entries[pos].entry.value)
    }
}

impl IdLookup for NameSearchIndex {
    fn lookup_id(&self, name: &str) -> Option<u32> {
        self.lookup(name)
    }
}
