use std::collections::HashMap;

/// A Pokemon as returned by the `pokemon` endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub name: String,
    pub id: u32,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub stats: Vec<StatSummary>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub moves: Vec<MoveSummary>,
    /// Front sprite location, when the API has one
    pub sprite_url: Option<String>,
}

/// A stat entry of a Pokemon: name and base value
#[derive(Debug, Clone, PartialEq)]
pub struct StatSummary {
    pub name: String,
    pub base_stat: u32,
}

/// A move entry of a Pokemon: name and the level it is learned at
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSummary {
    pub name: String,
    pub level_learned_at: u32,
}

/// A Pokemon stat as returned by the `stat` endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub name: String,
    pub id: u32,
    pub is_battle_only: bool,
}

/// An ability as returned by the `ability` endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Ability {
    pub name: String,
    pub id: u32,
    pub generation: String,
    pub effect: String,
    pub short_effect: String,
    /// Names of every Pokemon that can have this ability
    pub pokemon: Vec<String>,
}

/// A move as returned by the `move` endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub name: String,
    pub id: u32,
    pub generation: String,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    pub power: Option<u32>,
    pub type_name: String,
    pub damage_class: String,
    pub short_effect: String,
}

/// The result of mapping one top-level query
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Pokemon(Pokemon),
    Ability(Ability),
    Move(Move),
}

/// Detail records used for expanded Pokemon rendering, keyed by name.
/// Filled in by the caller; rendering never fetches anything itself.
#[derive(Debug, Clone, Default)]
pub struct Details {
    pub stats: HashMap<String, Stat>,
    pub abilities: HashMap<String, Ability>,
    pub moves: HashMap<String, Move>,
}
