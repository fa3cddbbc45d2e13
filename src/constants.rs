/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// Rendering
pub const WRAP_WIDTH: usize = 100;
pub const DETAIL_INDENT: &str = "\t\t";
pub const LIST_INDENT: &str = "\t";
pub const MISSING_VALUE: &str = "-";

// Input / Output
pub const BATCH_FILE_EXTENSION: &str = "txt";
pub const PRINT_TARGET: &str = "print";
pub const SPRITE_FILE_EXTENSION: &str = "png";

// Language used when picking effect text out of localized entries
pub const EFFECT_LANGUAGE: &str = "en";

// Placeholder PokeAPI embeds in move effects
pub const EFFECT_CHANCE_PLACEHOLDER: &str = "$effect_chance";
