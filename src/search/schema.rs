//! Search index schema definition / 名称索引的 Schema 定义

use serde::{Deserialize, Serialize};

/// Index entry: creature name -> catalog id / 索引条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIndexEntry {
    /// Name as it appears in the source / 原始名称
    pub key: String,
    /// Positive catalog id / 编号
    pub value: u32,
}

/// Search hit; tier membership is carried by output position / 搜索命中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub key: String,
    pub value: u32,
}

impl From<&NameIndexEntry> for RankedMatch {
    fn from(entry: &NameIndexEntry) -> Self {
        Self {
            key: entry.key.clone(),
            value: entry.value,
        }
    }
}

/// Relevance tier / 相关性层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Normalized key equals normalized query / 完全匹配
    Exact,
    /// Key starts with query / 前缀匹配
    Prefix,
    /// Key contains query / 子串匹配
    Substring,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Prefix => "prefix",
            MatchTier::Substring => "substring",
        }
    }
}

/// Search result split by tier / 按层级划分的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieredMatches {
    pub exact: Vec<RankedMatch>,
    pub prefix: Vec<RankedMatch>,
    pub substring: Vec<RankedMatch>,
}

impl TieredMatches {
    /// Total hits across all tiers / 命中总数
    pub fn len(&self) -> usize {
        self.exact.len() + self.prefix.len() + self.substring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate hits in rank order together with their tier
    pub fn iter(&self) -> impl Iterator<Item = (MatchTier, &RankedMatch)> {
        self.exact
            .iter()
            .map(|m| (MatchTier::Exact, m))
            .chain(self.prefix.iter().map(|m| (MatchTier::Prefix, m)))
            .chain(self.substring.iter().map(|m| (MatchTier::Substring, m)))
    }

    /// Concatenate exact ++ prefix ++ substring / 按层级拼接
    pub fn into_ranked(self) -> Vec<RankedMatch> {
        let mut ranked = self.exact;
        ranked.extend(self.prefix);
        ranked.extend(self.substring);
        ranked
    }
}
