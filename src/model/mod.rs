use serde::{Deserialize, Serialize};


/// A catalog entry. Created thin by the list load, upgraded in place by
/// detail hydration, flagged locally by the favorite gateway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Stable identifier assigned by the upstream API
    pub id: u32,

    /// Display name, first character capitalized
    pub name: String,

    /// Sprite image URL, derived from `id` at ingestion time
    pub sprite: String,

    /// Ability references. Empty means "detail not yet fetched" — the
    /// upstream guarantees every Pokémon has at least one ability, so
    /// emptiness is an unambiguous hydration marker.
    pub ability_ids: Vec<u32>,

    /// Local favorite flag, never sent upstream
    pub favorite: bool,
}

impl Pokemon {
    /// Whether detail hydration has completed for this entry
    pub fn is_hydrated(&self) -> bool {
        !self.ability_ids.is_empty()
    }
}

/// One ability referenced from a Pokémon's detail. Immutable once cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: u32,
    pub name: String,
    /// Effect text in the configured locale, or the configured placeholder
    pub description: String,
}

/// Extract the numeric id from a PokeAPI resource URL.
///
/// The id is the final path segment, with trailing slashes trimmed first.
/// Catalog entries and ability references share this convention.
///
/// # Examples
///
/// ```
/// use pokedex::model::extract_id_from_url;
///
/// assert_eq!(extract_id_from_url("https://pokeapi.co/api/v2/pokemon/25/"), Some(25));
/// assert_eq!(extract_id_from_url("https://pokeapi.co/api/v2/ability/65"), Some(65));
/// assert_eq!(extract_id_from_url("not-a-resource-url"), None);
/// ```
pub fn extract_id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Capitalize the first character of a raw API name; the rest is untouched.
pub fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Deterministic sprite URL for a Pokémon id.
pub fn sprite_url(base: &str, id: u32) -> String {
    format!("{}/{}.png", base.trim_end_matches('/'), id)
}
