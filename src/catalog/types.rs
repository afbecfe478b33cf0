//! PokeAPI response types / PokeAPI 响应类型

use serde::Deserialize;

use crate::models::{ChainNode, PokemonRecord, ResolvedEntry, SpeciesInfo, SpeciesRef};

/// `{name, url}` pair used all over the API / 命名资源
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Url-only resource reference / 资源引用
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

/// GET /pokemon?limit=&offset=
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonListResponse {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkSprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: ArtworkSprites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

/// GET /pokemon/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetailResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub height: u32,
    pub species: NamedResource,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl PokemonDetailResponse {
    /// Light entry; `url` is the canonical resource url for this id
    pub fn to_entry(&self, url: String) -> ResolvedEntry {
        ResolvedEntry {
            id: self.id,
            name: self.name.clone(),
            url,
            icon_url: self.sprites.front_default.clone(),
            artwork_url: self.sprites.other.official_artwork.front_default.clone(),
        }
    }

    pub fn into_record(self, url: String) -> PokemonRecord {
        let entry = self.to_entry(url);
        PokemonRecord {
            entry,
            types: self.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: self.abilities.into_iter().map(|a| a.ability.name).collect(),
            weight: self.weight,
            height: self.height,
            species: SpeciesRef {
                name: self.species.name,
                url: self.species.url,
            },
        }
    }
}

/// GET /pokemon-species/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesResponse {
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    pub evolution_chain: Option<ApiResource>,
}

impl From<SpeciesResponse> for SpeciesInfo {
    fn from(species: SpeciesResponse) -> Self {
        SpeciesInfo {
            egg_groups: species.egg_groups.into_iter().map(|g| g.name).collect(),
            evolution_chain_url: species.evolution_chain.map(|c| c.url),
        }
    }
}

/// One link of `chain` / 进化链节点
#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl From<ChainLink> for ChainNode {
    fn from(link: ChainLink) -> Self {
        ChainNode {
            species_name: link.species.name,
            children: link.evolves_to.into_iter().map(ChainNode::from).collect(),
        }
    }
}

/// GET /evolution-chain/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResponse {
    pub id: u32,
    pub chain: Option<ChainLink>,
}
