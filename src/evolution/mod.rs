//! Evolution chain resolution / 进化链解析
//!
//! Walks a decoded chain along its first-child path and resolves each species
//! name to a full catalog record:
//! - name -> id through an [`IdLookup`] (normally the static name index)
//! - id -> record through an [`EntryFetcher`](crate::catalog::EntryFetcher)
//!
//! Index misses are skipped silently; fetch failures abort the whole call.

pub mod resolver;

pub use resolver::{resolve_chain, EvolutionResolver, IdLookup, ResolveError, DEFAULT_MAX_STEPS};
