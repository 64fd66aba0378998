use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::{AbilityDetail, CatalogEntry, LocalizedEffect, PokeApi, PokemonDetail};
use crate::error::{Error, Result};

/// HTTP implementation of [`PokeApi`] against the public PokeAPI v2 shapes.
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    list_limit: u32,
}

impl PokeApiClient {
    pub fn new(base_url: &str, list_limit: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            list_limit,
        }
    }

    /// GET a URL and deserialize the JSON body.
    ///
    /// `not_found` is the error to surface on a 404; the catalog endpoint has
    /// no meaningful id to report, so it maps 404 to a transport failure.
    async fn get_json<T>(&self, url: String, not_found: Option<Error>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(url = %url, "PokeAPI request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                Err(not_found.unwrap_or_else(|| Error::Transport(format!("{url}: 404"))))
            }
            status if !status.is_success() => {
                Err(Error::Transport(format!("{url}: status {status}")))
            }
            _ => response
                .json::<T>()
                .await
                .map_err(|e| Error::Transport(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl PokeApi for PokeApiClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let url = format!("{}/pokemon?limit={}", self.base_url, self.list_limit);
        let body: ListResponse = self.get_json(url, None).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| CatalogEntry {
                name: r.name,
                url: r.url,
            })
            .collect())
    }

    async fn fetch_pokemon_detail(&self, id: u32) -> Result<PokemonDetail> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        let body: DetailResponse = self.get_json(url, Some(Error::NotFound(id))).await?;

        Ok(PokemonDetail {
            ability_urls: body.abilities.into_iter().map(|a| a.ability.url).collect(),
        })
    }

    async fn fetch_ability_detail(&self, id: u32) -> Result<AbilityDetail> {
        let url = format!("{}/ability/{}", self.base_url, id);
        let body: AbilityResponse = self.get_json(url, Some(Error::NotFound(id))).await?;

        Ok(AbilityDetail {
            name: body.name,
            effect_entries: body
                .effect_entries
                .into_iter()
                .map(|e| LocalizedEffect {
                    language: e.language.name,
                    effect: e.effect,
                })
                .collect(),
        })
    }
}

// Raw PokeAPI payload shapes, reduced to the fields the cache consumes

#[derive(Deserialize)]
struct ListResponse {
    results: Vec<ListResult>,
}

#[derive(Deserialize)]
struct ListResult {
    name: String,
    url: String,
}

#[derive(Deserialize)]
struct DetailResponse {
    abilities: Vec<AbilitySlot>,
}

#[derive(Deserialize)]
struct AbilitySlot {
    ability: AbilityRef,
}

#[derive(Deserialize)]
struct AbilityRef {
    url: String,
}

#[derive(Deserialize)]
struct AbilityResponse {
    name: String,
    effect_entries: Vec<EffectEntry>,
}

#[derive(Deserialize)]
struct EffectEntry {
    effect: String,
    language: LanguageRef,
}

#[derive(Deserialize)]
struct LanguageRef {
    name: String,
}
