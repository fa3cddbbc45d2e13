//! Text rendering for looked-up entities.
//!
//! Two registers are produced: a summary with one numbered line per list
//! item, and (for Pokemon only) an expanded form that inlines the detail
//! record of every ability, move and stat under its numbered line.
//! Rendering is pure; detail records are supplied by the caller.

use super::types::{Ability, Details, Entity, Move, Pokemon, Stat};
use crate::constants::{DETAIL_INDENT, LIST_INDENT, MISSING_VALUE, WRAP_WIDTH};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render an entity. `expanded` only affects Pokemon.
pub fn render(entity: &Entity, expanded: bool, details: &Details) -> String {
    match entity {
        Entity::Pokemon(pokemon) => render_pokemon(pokemon, expanded, details),
        Entity::Ability(ability) => render_ability(ability),
        Entity::Move(mv) => render_move(mv),
    }
}

pub fn render_pokemon(pokemon: &Pokemon, expanded: bool, details: &Details) -> String {
    let types = if pokemon.types.is_empty() {
        MISSING_VALUE.to_string()
    } else {
        pokemon
            .types
            .iter()
            .map(|t| title_case(t))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let stats = numbered(pokemon.stats.iter().map(|stat| {
        let line = format!("{}, Base Stat: {}", title_case(&stat.name), stat.base_stat);
        let detail = expanded.then(|| {
            details
                .stats
                .get(&stat.name)
                .map(stat_detail)
                .unwrap_or_else(|| missing_detail(&stat.name))
        });
        (line, detail)
    }));

    let abilities = numbered(pokemon.abilities.iter().map(|name| {
        let detail = expanded.then(|| {
            details
                .abilities
                .get(name)
                .map(ability_detail)
                .unwrap_or_else(|| missing_detail(name))
        });
        (title_case(name), detail)
    }));

    let moves = numbered(pokemon.moves.iter().map(|mv| {
        let line = format!(
            "{}, Level Learned at: {}",
            title_case(&mv.name),
            mv.level_learned_at
        );
        let detail = expanded.then(|| {
            details
                .moves
                .get(&mv.name)
                .map(move_detail)
                .unwrap_or_else(|| missing_detail(&mv.name))
        });
        (line, detail)
    }));

    format!(
        "Name: {}\nId: {}\nHeight: {} m\nWeight: {} kg\nTypes: {}\nStats:{}\nAbilities:{}\nMoves:{}",
        title_case(&pokemon.name),
        pokemon.id,
        format_metres(pokemon.height),
        format_kilograms(pokemon.weight),
        types,
        stats,
        abilities,
        moves,
    )
}

pub fn render_ability(ability: &Ability) -> String {
    format!(
        "Ability Name: {}\nId: {}\nGeneration: {}\nEffect: {}\n\nEffect (short): {}\n\nPokemon: {}",
        title_case(&ability.name),
        ability.id,
        ability.generation,
        ability.effect,
        ability.short_effect,
        ability.pokemon.join(", "),
    )
}

pub fn render_move(mv: &Move) -> String {
    format!(
        "Move Name: {}\nId: {}\nGeneration: {}\nAccuracy: {}\nPP: {}\nPower: {}\nType: {}\nDamage Class: {}\nEffect (Short): {}",
        title_case(&mv.name),
        mv.id,
        mv.generation,
        optional(mv.accuracy),
        optional(mv.pp),
        optional(mv.power),
        mv.type_name,
        mv.damage_class,
        mv.short_effect,
    )
}

fn stat_detail(stat: &Stat) -> String {
    format!(
        "{DETAIL_INDENT}Id: {}\n{DETAIL_INDENT}Is Battle Only: {}",
        stat.id, stat.is_battle_only
    )
}

fn ability_detail(ability: &Ability) -> String {
    format!(
        "{i}Id: {}\n{i}Generation: {}\n{i}Effect: {}\n\n{i}Effect (short): {}\n\n{i}Pokemon: {}",
        ability.id,
        ability.generation,
        wrap_detail(&ability.effect),
        wrap_detail(&ability.short_effect),
        wrap_detail(&ability.pokemon.join(", ")),
        i = DETAIL_INDENT,
    )
}

fn move_detail(mv: &Move) -> String {
    format!(
        "{i}Id: {}\n{i}Generation: {}\n{i}Accuracy: {}\n{i}PP: {}\n{i}Power: {}\n{i}Type: {}\n{i}Damage Class: {}\n{i}Effect (Short): {}",
        mv.id,
        mv.generation,
        optional(mv.accuracy),
        optional(mv.pp),
        optional(mv.power),
        mv.type_name,
        mv.damage_class,
        wrap_detail(&mv.short_effect),
        i = DETAIL_INDENT,
    )
}

fn missing_detail(name: &str) -> String {
    format!("{DETAIL_INDENT}No details found for '{}'.", name)
}

/// Join `(line, detail)` pairs into `\n\t1) line[\ndetail]` items
fn numbered(items: impl Iterator<Item = (String, Option<String>)>) -> String {
    let mut out = String::new();
    for (index, (line, detail)) in items.enumerate() {
        out.push_str(&format!("\n{LIST_INDENT}{}) {}", index + 1, line));
        if let Some(detail) = detail {
            out.push('\n');
            out.push_str(&detail);
        }
    }
    out
}

fn wrap_detail(text: &str) -> String {
    wrap(text, WRAP_WIDTH, DETAIL_INDENT)
}

fn optional(value: Option<u32>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}

/// Decimetres shown as metres with one decimal place
pub fn format_metres(decimetres: u32) -> String {
    format!("{}.{}", decimetres / 10, decimetres % 10)
}

/// Hectograms shown as whole kilograms (truncated)
pub fn format_kilograms(hectograms: u32) -> String {
    (hectograms / 10).to_string()
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
/// `mega-punch` becomes `Mega-Punch`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Greedy word wrap measured in terminal columns. The first line may use
/// the full `width`; continuation lines start with `subsequent_indent`,
/// which counts towards the width (a tab counts as one column).
/// Runs of whitespace collapse to one space and words wider than a line
/// are split.
pub fn wrap(text: &str, width: usize, subsequent_indent: &str) -> String {
    let indent_width: usize = subsequent_indent
        .chars()
        .map(|ch| ch.width().unwrap_or(1))
        .sum();
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            let limit = if lines.is_empty() {
                width
            } else {
                width.saturating_sub(indent_width)
            }
            .max(1);
            let gap = usize::from(line_width > 0);
            let rest_width = rest.width();

            if line_width + gap + rest_width <= limit {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(rest);
                line_width += gap + rest_width;
                rest = "";
            } else if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            } else {
                let split = split_at_width(rest, limit);
                lines.push(rest[..split].to_string());
                rest = &rest[split..];
            }
        }
    }
    if line_width > 0 {
        lines.push(line);
    }

    lines.join(&format!("\n{}", subsequent_indent))
}

/// Byte offset of the longest prefix of `word` fitting in `limit` columns;
/// always at least one character.
fn split_at_width(word: &str, limit: usize) -> usize {
    let mut used = 0;
    for (offset, ch) in word.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if offset > 0 && used + ch_width > limit {
            return offset;
        }
        used += ch_width;
    }
    word.len()
}
