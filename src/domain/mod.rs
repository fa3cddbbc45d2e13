// Gateway module for domain records, decoding and rendering
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod decode;
mod mode;
mod render;
mod types;

// Public re-exports - the ONLY way to access domain functionality
pub use decode::{decode_ability, decode_move, decode_pokemon, decode_stat};
pub use mode::{Mode, ModeBehavior, Resource};
pub use render::{render, title_case, wrap};
pub use types::{Ability, Details, Entity, Move, MoveSummary, Pokemon, Stat, StatSummary};

#[cfg(test)]
pub(crate) use decode::fixtures;
