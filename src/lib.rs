pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod runtime;
pub mod utils;

pub use api::{Lookup, PokeApiClient};
pub use app::{load_config, Config};
pub use domain::{Entity, Mode};
pub use runtime::{QueryPipeline, Request};
pub use utils::PokedexError;
