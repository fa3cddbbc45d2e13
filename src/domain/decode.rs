//! Typed decoding of PokeAPI payloads into domain records.
//!
//! Each entity has a private `Raw*` mirror of the fields we need from the
//! response. Anything missing or of the wrong type becomes a single
//! [`PokedexError::Format`] naming the identifier that was queried.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::types::{Ability, Entity, Move, MoveSummary, Pokemon, Stat, StatSummary};
use crate::constants::{EFFECT_CHANCE_PLACEHOLDER, EFFECT_LANGUAGE};
use crate::utils::PokedexError;

/// Decode a `pokemon` payload
pub fn decode_pokemon(identifier: &str, payload: Value) -> Result<Pokemon, PokedexError> {
    let raw: RawPokemon = from_payload(identifier, payload)?;

    Ok(Pokemon {
        name: raw.name,
        id: raw.id,
        height: raw.height,
        weight: raw.weight,
        stats: raw
            .stats
            .into_iter()
            .map(|s| StatSummary {
                name: s.stat.name,
                base_stat: s.base_stat,
            })
            .collect(),
        types: raw.types.into_iter().map(RawPokemonType::into_name).collect(),
        abilities: raw.abilities.into_iter().map(|a| a.ability.name).collect(),
        moves: raw
            .moves
            .into_iter()
            .map(|m| MoveSummary {
                name: m.entry.name,
                level_learned_at: m
                    .version_group_details
                    .first()
                    .map(|d| d.level_learned_at)
                    .unwrap_or(0),
            })
            .collect(),
        sprite_url: raw.sprites.and_then(|s| s.front_default),
    })
}

/// Decode an `ability` payload
pub fn decode_ability(identifier: &str, payload: Value) -> Result<Ability, PokedexError> {
    let raw: RawAbility = from_payload(identifier, payload)?;
    let entry = english_entry(identifier, raw.effect_entries)?;

    Ok(Ability {
        name: raw.name,
        id: raw.id,
        generation: raw.generation.name,
        effect: entry.effect.unwrap_or_default(),
        short_effect: entry.short_effect,
        pokemon: raw.pokemon.into_iter().map(|p| p.pokemon.name).collect(),
    })
}

/// Decode a `move` payload
pub fn decode_move(identifier: &str, payload: Value) -> Result<Move, PokedexError> {
    let raw: RawMove = from_payload(identifier, payload)?;
    let entry = english_entry(identifier, raw.effect_entries)?;

    let short_effect = match raw.effect_chance {
        Some(chance) => entry
            .short_effect
            .replace(EFFECT_CHANCE_PLACEHOLDER, &chance.to_string()),
        None => entry.short_effect,
    };

    Ok(Move {
        name: raw.name,
        id: raw.id,
        generation: raw.generation.name,
        accuracy: raw.accuracy,
        pp: raw.pp,
        power: raw.power,
        type_name: raw.kind.name,
        damage_class: raw.damage_class.name,
        short_effect,
    })
}

/// Decode a `stat` payload
pub fn decode_stat(identifier: &str, payload: Value) -> Result<Stat, PokedexError> {
    let raw: RawStat = from_payload(identifier, payload)?;

    Ok(Stat {
        name: raw.name,
        id: raw.id,
        is_battle_only: raw.is_battle_only,
    })
}

pub(super) fn decode_pokemon_entity(identifier: &str, payload: Value) -> Result<Entity, PokedexError> {
    decode_pokemon(identifier, payload).map(Entity::Pokemon)
}

pub(super) fn decode_ability_entity(identifier: &str, payload: Value) -> Result<Entity, PokedexError> {
    decode_ability(identifier, payload).map(Entity::Ability)
}

pub(super) fn decode_move_entity(identifier: &str, payload: Value) -> Result<Entity, PokedexError> {
    decode_move(identifier, payload).map(Entity::Move)
}

fn from_payload<T: DeserializeOwned>(identifier: &str, payload: Value) -> Result<T, PokedexError> {
    serde_json::from_value(payload).map_err(|e| format_error(identifier, e.to_string()))
}

fn format_error(identifier: &str, reason: impl Into<String>) -> PokedexError {
    PokedexError::Format {
        identifier: identifier.to_string(),
        reason: reason.into(),
    }
}

fn english_entry(
    identifier: &str,
    entries: Vec<RawEffectEntry>,
) -> Result<RawEffectEntry, PokedexError> {
    entries
        .into_iter()
        .find(|e| e.language.name == EFFECT_LANGUAGE)
        .ok_or_else(|| format_error(identifier, "no English effect entry"))
}

// Payload shapes (PokeAPI v2)

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawPokemon {
    name: String,
    id: u32,
    height: u32,
    weight: u32,
    stats: Vec<RawPokemonStat>,
    types: Vec<RawPokemonType>,
    abilities: Vec<RawPokemonAbility>,
    moves: Vec<RawPokemonMove>,
    #[serde(default)]
    sprites: Option<RawSprites>,
}

#[derive(Debug, Deserialize)]
struct RawPokemonStat {
    base_stat: u32,
    stat: NamedResource,
}

/// Types come as `{"slot": 1, "type": {"name": ..}}`; a bare name is accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPokemonType {
    Slot {
        #[serde(rename = "type")]
        kind: NamedResource,
    },
    Name(String),
}

impl RawPokemonType {
    fn into_name(self) -> String {
        match self {
            RawPokemonType::Slot { kind } => kind.name,
            RawPokemonType::Name(name) => name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPokemonAbility {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct RawPokemonMove {
    #[serde(rename = "move")]
    entry: NamedResource,
    #[serde(default)]
    version_group_details: Vec<RawVersionGroupDetail>,
}

#[derive(Debug, Deserialize)]
struct RawVersionGroupDetail {
    level_learned_at: u32,
}

#[derive(Debug, Deserialize)]
struct RawSprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEffectEntry {
    #[serde(default)]
    effect: Option<String>,
    short_effect: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct RawAbility {
    name: String,
    id: u32,
    generation: NamedResource,
    effect_entries: Vec<RawEffectEntry>,
    pokemon: Vec<RawAbilityPokemon>,
}

#[derive(Debug, Deserialize)]
struct RawAbilityPokemon {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct RawMove {
    name: String,
    id: u32,
    generation: NamedResource,
    accuracy: Option<u32>,
    pp: Option<u32>,
    power: Option<u32>,
    #[serde(rename = "type")]
    kind: NamedResource,
    damage_class: NamedResource,
    effect_chance: Option<u32>,
    effect_entries: Vec<RawEffectEntry>,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    name: String,
    id: u32,
    is_battle_only: bool,
}
