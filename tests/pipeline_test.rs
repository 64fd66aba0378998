// End-to-end pass over the public surface: catalog load, detail hydration,
// ability resolution, favorite mutation, and both derived views.

use std::sync::Arc;

use async_trait::async_trait;

use pokedex::config::PokedexConfig;
use pokedex::error::{Error, Result};
use pokedex::favorite::Favorites;
use pokedex::hydration::Hydrator;
use pokedex::model::{Ability, Pokemon};
use pokedex::remote::{AbilityDetail, CatalogEntry, LocalizedEffect, PokeApi, PokemonDetail};
use pokedex::store::Store;
use pokedex::view::{DetailView, Filter, ListView, Sort};

struct StaticApi;

#[async_trait]
impl PokeApi for StaticApi {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        Ok(vec![
            entry(1, "bulbasaur"),
            entry(2, "zygarde-complete"),
            entry(3, "abomasnow"),
        ])
    }

    async fn fetch_pokemon_detail(&self, id: u32) -> Result<PokemonDetail> {
        match id {
            1 => Ok(PokemonDetail {
                ability_urls: vec![
                    "https://pokeapi.co/api/v2/ability/65/".to_string(),
                    "https://pokeapi.co/api/v2/ability/34/".to_string(),
                ],
            }),
            _ => Err(Error::NotFound(id)),
        }
    }

    async fn fetch_ability_detail(&self, id: u32) -> Result<AbilityDetail> {
        match id {
            65 => Ok(AbilityDetail {
                name: "overgrow".to_string(),
                effect_entries: vec![LocalizedEffect {
                    language: "en".to_string(),
                    effect: "Powers up Grass moves in a pinch.".to_string(),
                }],
            }),
            34 => Ok(AbilityDetail {
                name: "chlorophyll".to_string(),
                // No English entry; the placeholder policy applies
                effect_entries: vec![LocalizedEffect {
                    language: "de".to_string(),
                    effect: "Verdoppelt Initiative bei Sonne.".to_string(),
                }],
            }),
            _ => Err(Error::NotFound(id)),
        }
    }
}

fn entry(id: u32, name: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
    }
}

struct App {
    pokemon: Arc<Store<u32, Pokemon>>,
    abilities: Arc<Store<u32, Ability>>,
    hydrator: Hydrator,
    favorites: Favorites,
}

fn app() -> App {
    let pokemon = Arc::new(Store::new());
    let abilities = Arc::new(Store::new());
    let hydrator = Hydrator::new(
        Arc::new(StaticApi),
        pokemon.clone(),
        abilities.clone(),
        &PokedexConfig::default(),
    );
    let favorites = Favorites::new(pokemon.clone());
    App {
        pokemon,
        abilities,
        hydrator,
        favorites,
    }
}

#[tokio::test]
async fn test_full_browse_and_hydrate_flow() {
    let app = app();

    let list = ListView::spawn(&app.pokemon, Filter::All, Sort::ById);
    let mut list_rx = list.observe();

    // Catalog load populates thin entries and reaches the view
    assert_eq!(app.hydrator.load_catalog().await.unwrap(), 3);
    list_rx.changed().await.unwrap();
    {
        let current = list_rx.borrow_and_update();
        assert_eq!(
            current.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Bulbasaur", "Zygarde-complete", "Abomasnow"]
        );
        assert!(current.iter().all(|p| !p.is_hydrated()));
    }

    // Open the detail screen for Bulbasaur
    let detail = DetailView::spawn(&app.pokemon, &app.abilities, 1);
    let mut detail_rx = detail.observe();

    let hydrated = app.hydrator.hydrate_pokemon(1).await.unwrap();
    assert_eq!(hydrated.ability_ids, vec![65, 34]);

    let results = app.hydrator.hydrate_abilities(&hydrated.ability_ids).await;
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    // The joined view settles once both references resolve
    while detail_rx.borrow().abilities.len() < 2 {
        detail_rx.changed().await.unwrap();
    }
    let snapshot = detail_rx.borrow().clone();
    assert_eq!(snapshot.pokemon.unwrap().name, "Bulbasaur");
    assert_eq!(snapshot.abilities[0].name, "Overgrow");
    assert_eq!(
        snapshot.abilities[0].description,
        "Powers up Grass moves in a pinch."
    );
    assert_eq!(snapshot.abilities[1].name, "Chlorophyll");
    assert_eq!(snapshot.abilities[1].description, "No description");
}

#[tokio::test]
async fn test_favorites_filter_and_sort_cycle() {
    let app = app();
    app.hydrator.load_catalog().await.unwrap();

    let list = ListView::spawn(&app.pokemon, Filter::All, Sort::ById);
    let mut rx = list.observe();

    // Favoriting flows back through the primary store into the view
    app.favorites.set(1, true).unwrap();
    list.set_filter(Filter::Favorites);
    loop {
        rx.changed().await.unwrap();
        let current = rx.borrow_and_update().clone();
        if current.len() == 1 {
            assert_eq!(current[0].id, 1);
            assert!(current[0].favorite);
            break;
        }
    }

    // Sort cycling over the whole catalog (first element per step)
    list.set_filter(Filter::All);
    assert_eq!(list.cycle_sort(), Sort::NameAsc);
    loop {
        rx.changed().await.unwrap();
        let current = rx.borrow_and_update().clone();
        if current.len() == 3 && current[0].name == "Abomasnow" {
            break;
        }
    }

    assert_eq!(list.cycle_sort(), Sort::NameDesc);
    loop {
        rx.changed().await.unwrap();
        let current = rx.borrow_and_update().clone();
        if current.first().map(|p| p.name.as_str()) == Some("Zygarde-complete") {
            break;
        }
    }

    assert_eq!(list.cycle_sort(), Sort::ById);
}

#[tokio::test]
async fn test_detail_for_missing_upstream_id_propagates_not_found() {
    let app = app();
    app.hydrator.load_catalog().await.unwrap();

    // Listed locally, but the upstream detail endpoint knows no id 3
    let err = app.hydrator.hydrate_pokemon(3).await.unwrap_err();
    assert_eq!(err, Error::NotFound(3));

    // The entry stays thin and the cache is otherwise untouched
    assert!(!app.pokemon.get(&3).unwrap().is_hydrated());
    assert_eq!(app.pokemon.len(), 3);
}
