use std::collections::HashMap;

use tokio::sync::watch;

use crate::model::{Ability, Pokemon};
use crate::store::Store;

/// What the detail projection publishes for one Pokémon id
#[derive(Clone, Debug, PartialEq)]
pub struct DetailSnapshot {
    /// The entry, if the id is in the primary cache at all
    pub pokemon: Option<Pokemon>,
    /// Resolved abilities in `ability_ids` order; references not yet in the
    /// ability cache are omitted until they resolve
    pub abilities: Vec<Ability>,
}

/// Join one Pokémon with its currently-resolved abilities. Pure.
pub fn project_detail(
    pokemon: Option<&Pokemon>,
    abilities: &HashMap<u32, Ability>,
) -> DetailSnapshot {
    let resolved = pokemon
        .map(|p| {
            p.ability_ids
                .iter()
                .filter_map(|id| abilities.get(id).cloned())
                .collect()
        })
        .unwrap_or_default();

    DetailSnapshot {
        pokemon: pokemon.cloned(),
        abilities: resolved,
    }
}

/// Recomputing detail projection for a single id, joined across both stores.
///
/// Recomputes whenever either store commits, so the snapshot grows as detail
/// hydration lands and ability fetches resolve one by one.
pub struct DetailView {
    out: watch::Receiver<DetailSnapshot>,
}

impl DetailView {
    pub fn spawn(primary: &Store<u32, Pokemon>, abilities: &Store<u32, Ability>, id: u32) -> Self {
        let mut pokemon_rx = primary.observe();
        let mut ability_rx = abilities.observe();

        let initial = {
            let pokemon_map = pokemon_rx.borrow_and_update();
            let ability_map = ability_rx.borrow_and_update();
            project_detail(pokemon_map.get(&id), &ability_map)
        };
        let (out_tx, out) = watch::channel(initial);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = pokemon_rx.changed() => if changed.is_err() { break },
                    changed = ability_rx.changed() => if changed.is_err() { break },
                }

                let snapshot = {
                    let pokemon_map = pokemon_rx.borrow_and_update();
                    let ability_map = ability_rx.borrow_and_update();
                    project_detail(pokemon_map.get(&id), &ability_map)
                };

                if out_tx.send(snapshot).is_err() {
                    break;
                }
            }
        });

        Self { out }
    }

    pub fn observe(&self) -> watch::Receiver<DetailSnapshot> {
        self.out.clone()
    }

    pub fn current(&self) -> DetailSnapshot {
        self.out.borrow().clone()
    }
}
