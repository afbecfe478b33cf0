//! Catalog data models / 图鉴数据模型

use serde::{Deserialize, Serialize};

/// A fully resolved creature record, keyed by its stable catalog id / 已解析的条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntry {
    pub id: u32,
    pub name: String,
    pub url: String,
    pub icon_url: Option<String>,
    pub artwork_url: Option<String>,
}

/// Species reference (name + resource url) / 物种引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRef {
    pub name: String,
    pub url: String,
}

/// Single creature record without species data / 条目详情（不含物种数据）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonRecord {
    #[serde(flatten)]
    pub entry: ResolvedEntry,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    /// Hectograms, as reported upstream
    pub weight: u32,
    /// Decimetres, as reported upstream
    pub height: u32,
    pub species: SpeciesRef,
}

/// Species data needed for the detail view / 物种信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesInfo {
    pub egg_groups: Vec<String>,
    /// Absent for species without a chain resource
    pub evolution_chain_url: Option<String>,
}

/// Detail view: record + egg groups + resolved evolution chain / 详情视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    #[serde(flatten)]
    pub record: PokemonRecord,
    pub egg_groups: Vec<String>,
    pub evolutions: Vec<ResolvedEntry>,
}

/// One link of a remote evolution lineage / 进化链节点
///
/// Consumed as decoded from the catalog; the resolver only follows `children[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainNode {
    pub species_name: String,
    #[serde(default)]
    pub children: Vec<ChainNode>,
}

impl ChainNode {
    pub fn new(species_name: impl Into<String>) -> Self {
        Self {
            species_name: species_name.into(),
            children: Vec::new(),
        }
    }

    /// Builder helper: append a child link
    pub fn with_child(mut self, child: ChainNode) -> Self {
        self.children.push(child);
        self
    }

    /// Build a single-path chain `names[0] -> names[1] -> ...`
    pub fn linear<S: AsRef<str>>(names: &[S]) -> Option<Self> {
        names.iter().rev().fold(None, |child, name| {
            let mut node = ChainNode::new(name.as_ref());
            if let Some(child) = child {
                node.children.push(child);
            }
            Some(node)
        })
    }
}
