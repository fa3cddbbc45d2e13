use clap::ValueEnum;
use serde_json::Value;
use std::fmt;

use super::decode;
use super::types::Entity;
use crate::utils::PokedexError;

/// API resources the client knows how to address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Pokemon,
    Ability,
    Move,
    Stat,
}

impl Resource {
    /// Path segment of the resource under the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Resource::Pokemon => "pokemon",
            Resource::Ability => "ability",
            Resource::Move => "move",
            Resource::Stat => "stat",
        }
    }
}

/// What kind of entity a run looks up
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Query Pokemon information
    Pokemon,
    /// Query ability information
    Ability,
    /// Query move information
    Move,
}

type Decoder = fn(&str, Value) -> Result<Entity, PokedexError>;

/// Per-mode behaviour: where to look, what to call it, how to decode it
pub struct ModeBehavior {
    pub resource: Resource,
    pub label: &'static str,
    pub supports_expanded: bool,
    pub decode: Decoder,
}

static POKEMON_BEHAVIOR: ModeBehavior = ModeBehavior {
    resource: Resource::Pokemon,
    label: "Pokemon",
    supports_expanded: true,
    decode: decode::decode_pokemon_entity,
};

static ABILITY_BEHAVIOR: ModeBehavior = ModeBehavior {
    resource: Resource::Ability,
    label: "Ability",
    supports_expanded: false,
    decode: decode::decode_ability_entity,
};

static MOVE_BEHAVIOR: ModeBehavior = ModeBehavior {
    resource: Resource::Move,
    label: "Move",
    supports_expanded: false,
    decode: decode::decode_move_entity,
};

impl Mode {
    pub fn behavior(self) -> &'static ModeBehavior {
        match self {
            Mode::Pokemon => &POKEMON_BEHAVIOR,
            Mode::Ability => &ABILITY_BEHAVIOR,
            Mode::Move => &MOVE_BEHAVIOR,
        }
    }

    pub fn resource(self) -> Resource {
        self.behavior().resource
    }

    pub fn label(self) -> &'static str {
        self.behavior().label
    }

    pub fn supports_expanded(self) -> bool {
        self.behavior().supports_expanded
    }

    /// Map a raw payload into this mode's entity
    pub fn decode(self, identifier: &str, payload: Value) -> Result<Entity, PokedexError> {
        (self.behavior().decode)(identifier, payload)
    }

    /// The user-facing message for a query that produced nothing usable
    pub fn not_found_message(self, identifier: &str) -> String {
        format!(
            "{} with name/id '{}' could not be found.",
            self.label(),
            identifier
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource().path())
    }
}
