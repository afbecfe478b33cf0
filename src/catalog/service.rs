//! Composite catalog operations / 组合图鉴操作
//!
//! detail = record + species + resolved evolution chain.
//! Every call goes to the catalog; nothing is cached between requests.

use thiserror::Error;

use super::{CatalogError, CatalogSource};
use crate::evolution::{EvolutionResolver, IdLookup, ResolveError};
use crate::models::{PokemonDetail, ResolvedEntry};

/// Detail / evolution loading errors / 详情加载错误
#[derive(Debug, Error)]
pub enum DetailError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Evolution(#[from] ResolveError),
}

impl DetailError {
    /// The catalog error at the bottom of the chain, if any
    pub fn catalog_error(&self) -> Option<&CatalogError> {
        match self {
            DetailError::Catalog(e) => Some(e),
            DetailError::Evolution(e) => e.catalog_error(),
        }
    }
}

/// Resolve the evolution line `id` belongs to / 加载进化链
///
/// Species without a chain resource resolve to an empty list.
pub async fn load_evolutions<S, L>(
    source: &S,
    lookup: &L,
    resolver: &EvolutionResolver,
    id: u32,
) -> Result<Vec<ResolvedEntry>, DetailError>
where
    S: CatalogSource + ?Sized,
    L: IdLookup + ?Sized,
{
    let record = source.fetch_pokemon(id).await?;
    let species = source.fetch_species(&record.species.url).await?;
    evolutions_for_species(source, lookup, resolver, species.evolution_chain_url.as_deref()).await
}

/// Full detail view for one id / 加载详情
pub async fn load_pokemon_detail<S, L>(
    source: &S,
    lookup: &L,
    resolver: &EvolutionResolver,
    id: u32,
) -> Result<PokemonDetail, DetailError>
where
    S: CatalogSource + ?Sized,
    L: IdLookup + ?Sized,
{
    let record = source.fetch_pokemon(id).await?;
    let species = source.fetch_species(&record.species.url).await?;
    let evolutions =
        evolutions_for_species(source, lookup, resolver, species.evolution_chain_url.as_deref()).await?;

    Ok(PokemonDetail {
        record,
        egg_groups: species.egg_groups,
        evolutions,
    })
}

async fn evolutions_for_species<S, L>(
    source: &S,
    lookup: &L,
    resolver: &EvolutionResolver,
    chain_url: Option<&str>,
) -> Result<Vec<ResolvedEntry>, DetailError>
where
    S: CatalogSource + ?Sized,
    L: IdLookup + ?Sized,
{
    let Some(chain_url) = chain_url else {
        return Ok(Vec::new());
    };
    let root = source.fetch_evolution_chain(chain_url).await?;
    Ok(resolver.resolve(root.as_ref(), source, lookup).await?)
}
