use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use pokedex::config::{self, PokedexConfig};
use pokedex::favorite::Favorites;
use pokedex::hydration::Hydrator;
use pokedex::remote::PokeApiClient;
use pokedex::store::Store;
use pokedex::view::{DetailView, Filter, ListView, Sort};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=info".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => config::load_config(&path)
            .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?,
        None => PokedexConfig::default(),
    };

    info!("Pokedex cache starting...");

    // Process-scoped singletons, owned by this composition root
    let pokemon = Arc::new(Store::new());
    let abilities = Arc::new(Store::new());
    let api = Arc::new(PokeApiClient::new(
        &config.api.base_url,
        config.api.list_limit,
    ));
    let hydrator = Hydrator::new(api, pokemon.clone(), abilities.clone(), &config);
    let favorites = Favorites::new(pokemon.clone());

    let list = ListView::spawn(&pokemon, Filter::All, Sort::ById);
    let mut list_rx = list.observe();

    let count = hydrator.load_catalog().await?;
    list_rx.changed().await?;
    info!(count, "catalog ready");

    // Walk one entry through the full pipeline: hydrate, resolve abilities,
    // favorite it, and read everything back through the derived views.
    let first = match list_rx.borrow_and_update().first().cloned() {
        Some(p) => p,
        None => {
            info!("catalog is empty, nothing to hydrate");
            return Ok(());
        }
    };

    let detail = DetailView::spawn(&pokemon, &abilities, first.id);
    let mut detail_rx = detail.observe();

    let hydrated = hydrator.hydrate_pokemon(first.id).await?;
    let results = hydrator.hydrate_abilities(&hydrated.ability_ids).await;
    let resolved = results.iter().filter(|(_, r)| r.is_ok()).count();

    while detail_rx.borrow().abilities.len() < resolved {
        detail_rx.changed().await?;
    }
    for ability in &detail_rx.borrow().abilities {
        info!(pokemon = %hydrated.name, ability = %ability.name, description = %ability.description, "resolved");
    }

    favorites.set(first.id, true)?;
    list.set_filter(Filter::Favorites);
    while list_rx.borrow().len() != 1 {
        list_rx.changed().await?;
    }
    info!(favorites = list_rx.borrow().len(), name = %first.name, "favorites view ready");

    Ok(())
}
