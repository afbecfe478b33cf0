//! Search module - name index over the static catalog / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - The index is built once from a static name -> id source and never mutated
//! - Only exposes primitive operations: search, search_tiered, lookup
//! - No network access; callers resolve ids through the catalog / 调用方负责远程解析
//!
//! Ranking / 排序：
//! - Three fixed tiers: exact, prefix, substring (first match wins)
//! - Within a tier, source order is kept / 同层保持源顺序

pub mod index;
pub mod normalize;
pub mod schema;

pub use index::{IndexError, NameSearchIndex};
pub use normalize::normalize;
pub use schema::{MatchTier, NameIndexEntry, RankedMatch, TieredMatches};
