use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::PokedexConfig;
use crate::error::{Error, Result};
use crate::model::{self, Ability, Pokemon};
use crate::remote::PokeApi;
use crate::store::Store;

/// Orchestrates fetching against the shared caches.
///
/// Entries start thin (empty `ability_ids`) after a catalog load and are
/// upgraded at most once by `hydrate_pokemon`; abilities are cached lazily,
/// one entry per distinct reference. Concurrent hydrations of the same id are
/// serialized through a per-id guard so a detail is fetched at most once;
/// unrelated ids hydrate fully in parallel.
pub struct Hydrator {
    api: Arc<dyn PokeApi>,

    pokemon: Arc<Store<u32, Pokemon>>,
    abilities: Arc<Store<u32, Ability>>,

    sprite_base_url: String,
    target_locale: String,
    placeholder: String,

    /// Per-id in-flight guards; an entry exists only while a hydration for
    /// that id is running
    pokemon_in_flight: DashMap<u32, Arc<Mutex<()>>>,
    ability_in_flight: DashMap<u32, Arc<Mutex<()>>>,
}

impl Hydrator {
    pub fn new(
        api: Arc<dyn PokeApi>,
        pokemon: Arc<Store<u32, Pokemon>>,
        abilities: Arc<Store<u32, Ability>>,
        config: &PokedexConfig,
    ) -> Self {
        Self {
            api,
            pokemon,
            abilities,
            sprite_base_url: config.api.sprite_base_url.clone(),
            target_locale: config.locale.target.clone(),
            placeholder: config.locale.placeholder.clone(),
            pokemon_in_flight: DashMap::new(),
            ability_in_flight: DashMap::new(),
        }
    }

    /// Fetch the full catalog and atomically replace the primary store with
    /// thin entries. On failure the store keeps its previous contents.
    pub async fn load_catalog(&self) -> Result<usize> {
        let entries = self.api.fetch_catalog().await?;

        let mut fresh = HashMap::with_capacity(entries.len());
        for entry in entries {
            let id = model::extract_id_from_url(&entry.url)
                .ok_or_else(|| Error::Transport(format!("bad resource url: {}", entry.url)))?;
            fresh.insert(
                id,
                Pokemon {
                    id,
                    name: model::capitalize_first(&entry.name),
                    sprite: model::sprite_url(&self.sprite_base_url, id),
                    // Empty until detail hydration
                    ability_ids: Vec::new(),
                    favorite: false,
                },
            );
        }

        let count = fresh.len();
        self.pokemon.replace_all(fresh);
        info!(count, "catalog loaded");
        Ok(count)
    }

    /// Upgrade one Pokémon to carry its ability references.
    ///
    /// Idempotent: an already-hydrated entry is returned without a fetch, so
    /// at most one network hydration ever happens per id. The id must already
    /// be in the primary store (`Error::NotCached` otherwise). On fetch
    /// failure the entry stays thin and the call is safe to retry.
    pub async fn hydrate_pokemon(&self, id: u32) -> Result<Pokemon> {
        let cached = self.pokemon.get(&id).ok_or(Error::NotCached(id))?;
        if cached.is_hydrated() {
            return Ok(cached);
        }

        let guard = self
            .pokemon_in_flight
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _held = guard.lock().await;

        let result = self.fetch_and_commit_pokemon(id).await;
        self.pokemon_in_flight.remove(&id);
        result
    }

    async fn fetch_and_commit_pokemon(&self, id: u32) -> Result<Pokemon> {
        // A concurrent call may have committed while we waited for the guard
        if let Some(current) = self.pokemon.get(&id) {
            if current.is_hydrated() {
                debug!(id, "detail already hydrated by a concurrent call");
                return Ok(current);
            }
        }

        let detail = self.api.fetch_pokemon_detail(id).await?;

        let mut ability_ids = Vec::with_capacity(detail.ability_urls.len());
        for url in &detail.ability_urls {
            let ability_id = model::extract_id_from_url(url)
                .ok_or_else(|| Error::Transport(format!("bad ability url: {url}")))?;
            ability_ids.push(ability_id);
        }

        // Commit only the references; a favorite toggle that landed during
        // the fetch is preserved by the read-modify-write.
        let updated = self
            .pokemon
            .update(&id, |p| p.ability_ids = ability_ids.clone())
            .ok_or(Error::NotCached(id))?;

        info!(id, abilities = updated.ability_ids.len(), "detail hydrated");
        Ok(updated)
    }

    /// Resolve one ability, fetching and caching it on first use.
    ///
    /// Same at-most-once discipline as `hydrate_pokemon`, keyed independently
    /// per ability id. A cached ability is immutable and returned as-is.
    pub async fn hydrate_ability(&self, id: u32) -> Result<Ability> {
        if let Some(cached) = self.abilities.get(&id) {
            return Ok(cached);
        }

        let guard = self
            .ability_in_flight
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _held = guard.lock().await;

        let result = self.fetch_and_commit_ability(id).await;
        self.ability_in_flight.remove(&id);
        result
    }

    async fn fetch_and_commit_ability(&self, id: u32) -> Result<Ability> {
        if let Some(cached) = self.abilities.get(&id) {
            return Ok(cached);
        }

        let detail = self.api.fetch_ability_detail(id).await?;

        let description = detail
            .effect_entries
            .iter()
            .find(|entry| entry.language == self.target_locale)
            .map(|entry| entry.effect.clone())
            .unwrap_or_else(|| self.placeholder.clone());

        let ability = Ability {
            id,
            name: model::capitalize_first(&detail.name),
            description,
        };

        self.abilities.put(id, ability.clone());
        debug!(id, "ability cached");
        Ok(ability)
    }

    /// Resolve a batch of ability references concurrently.
    ///
    /// Each reference is fetched independently; one failure never blocks or
    /// invalidates the others, and failed ids stay absent and retryable.
    pub async fn hydrate_abilities(&self, ids: &[u32]) -> Vec<(u32, Result<Ability>)> {
        let fetches = ids.iter().map(|&id| async move {
            let result = self.hydrate_ability(id).await;
            if let Err(e) = &result {
                warn!(id, error = %e, "ability hydration failed");
            }
            (id, result)
        });
        join_all(fetches).await
    }
}
