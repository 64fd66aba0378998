use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Pokemon;
use crate::store::Store;

/// Local favorite mutations. Synchronous; never touches the network path.
pub struct Favorites {
    pokemon: Arc<Store<u32, Pokemon>>,
}

impl Favorites {
    pub fn new(pokemon: Arc<Store<u32, Pokemon>>) -> Self {
        Self { pokemon }
    }

    /// Set the favorite flag on one cached entry.
    ///
    /// Applied as a read-modify-write against the freshest committed
    /// snapshot, so a hydration that commits concurrently is never clobbered:
    /// only the flag changes, whatever the rest of the record holds by then.
    pub fn set(&self, id: u32, value: bool) -> Result<Pokemon> {
        self.pokemon
            .update(&id, |p| p.favorite = value)
            .ok_or(Error::NotCached(id))
    }

    /// Flip the favorite flag on one cached entry
    pub fn toggle(&self, id: u32) -> Result<Pokemon> {
        self.pokemon
            .update(&id, |p| p.favorite = !p.favorite)
            .ok_or(Error::NotCached(id))
    }
}
