use thiserror::Error;

/// Errors surfaced by the cache and its fetch collaborators.
///
/// None of these are retried internally; every operation that can fail with
/// `Transport` or `NotFound` is idempotent and safe to re-invoke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A collaborator call failed (network error, bad status, malformed payload)
    #[error("transport failure: {0}")]
    Transport(String),

    /// The upstream API reports the id does not exist
    #[error("resource {0} not found upstream")]
    NotFound(u32),

    /// The operation requires a Pokémon already present in the cache;
    /// ids must be listed before they can be detailed or flagged
    #[error("pokemon {0} is not cached; load the catalog first")]
    NotCached(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
