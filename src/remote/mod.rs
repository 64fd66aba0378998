mod client;

pub use client::PokeApiClient;

use async_trait::async_trait;

use crate::error::Result;

/// One entry of the catalog listing
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    /// Raw lowercase name as the API serves it
    pub name: String,
    /// Resource URL; the trailing path segment carries the id
    pub url: String,
}

/// Detail payload for one Pokémon, reduced to what the cache consumes
#[derive(Clone, Debug, PartialEq)]
pub struct PokemonDetail {
    /// Ability resource URLs, in the API's order
    pub ability_urls: Vec<String>,
}

/// One localized effect entry of an ability
#[derive(Clone, Debug, PartialEq)]
pub struct LocalizedEffect {
    /// Locale tag, e.g. "en"
    pub language: String,
    pub effect: String,
}

/// Detail payload for one ability
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityDetail {
    pub name: String,
    pub effect_entries: Vec<LocalizedEffect>,
}

/// Fetch collaborator for the PokeAPI.
///
/// All calls are all-or-nothing: no partial payloads, no cancellation
/// contract. Failures map to `Error::Transport` or `Error::NotFound` and are
/// always safe to retry.
#[async_trait]
pub trait PokeApi: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>>;

    async fn fetch_pokemon_detail(&self, id: u32) -> Result<PokemonDetail>;

    async fn fetch_ability_detail(&self, id: u32) -> Result<AbilityDetail>;
}
