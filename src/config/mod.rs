use serde::Deserialize;

/// Complete configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PokedexConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// PokeAPI base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How many catalog entries to request (the full dex)
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
    /// Base URL for sprite images, joined with the Pokémon id
    #[serde(default = "default_sprite_base_url")]
    pub sprite_base_url: String,
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_list_limit() -> u32 {
    1302
}

fn default_sprite_base_url() -> String {
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            list_limit: default_list_limit(),
            sprite_base_url: default_sprite_base_url(),
        }
    }
}

/// Locale selection for ability descriptions
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Locale tag an effect entry must carry to be selected
    #[serde(default = "default_target")]
    pub target: String,
    /// Description used when no entry matches the target locale
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_target() -> String {
    "en".to_string()
}

fn default_placeholder() -> String {
    "No description".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            locale: LocaleConfig::default(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<PokedexConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: PokedexConfig = toml::from_str(&contents)?;
    Ok(config)
}
