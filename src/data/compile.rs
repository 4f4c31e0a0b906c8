//! Compiles one raw record into its canonical-plus-overlays form.
//!
//! Moves and traits are auxiliary: callers drop them when compilation fails.
//! Creatures are primary: any error here aborts the run.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::data::codec::{
    valid_through_for_change_group, versions_for_group, DamageCategory, ElementType,
    EncounterMethod, GameVersion, Generation, LearnMethod,
};
use crate::data::locator::id_from_locator;
use crate::data::model::{
    BaseStats, Creature, LearnedMove, Location, Move, MoveId, Trait, TraitId, TypePair,
    VersionedLearnset,
};
use crate::data::raw::{
    RawAbility, RawAbilitySlot, RawCreature, RawEncounterArea, RawMove, RawStat, RawTypeSlot,
};
use crate::error::Result;
use crate::history::{Overlay, OverlayList};

/// Language tag of the descriptions kept for traits.
pub const REFERENCE_LANGUAGE: &str = "en";

/// Compile a move. Fails when its current type or category is outside the
/// strict enumerations, which is how later-generation-only moves drop out.
pub fn compile_move(raw: &RawMove) -> Result<Move> {
    let element = ElementType::parse_strict(&raw.element.name)?;
    let category = DamageCategory::parse_strict(&raw.damage_class.name)?;

    let mut past = Vec::new();
    for entry in &raw.past_values {
        let Some(old) = &entry.element else {
            continue;
        };
        let group = entry.version_group.name.as_str();
        let Some(valid_through) = valid_through_for_change_group(group) else {
            debug!(move_id = raw.id, group, "past type changed before generation 2, skipped");
            continue;
        };
        let Ok(old_element) = ElementType::parse_strict(&old.name) else {
            debug!(move_id = raw.id, old = %old.name, "past type not in scope, skipped");
            continue;
        };
        past.push((valid_through, old_element));
    }

    Ok(Move {
        id: raw.id,
        name: display_name(&raw.name),
        element,
        category,
        power: raw.power.map_or(0, saturate_u8),
        accuracy: raw.accuracy.map_or(0, saturate_u8),
        pp: raw.pp.map_or(0, saturate_u8),
        past_elements: ordered_overlays(past)?,
    })
}

/// Compile a trait, keeping the first reference-language short description.
pub fn compile_trait(raw: &RawAbility) -> Trait {
    let short_desc = raw
        .effect_entries
        .iter()
        .find(|entry| entry.language.name == REFERENCE_LANGUAGE)
        .map(|entry| entry.short_effect.clone())
        .unwrap_or_default();
    Trait {
        id: raw.id,
        name: raw.name.clone(),
        short_desc,
    }
}

/// Move and trait ids a creature record refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatureRefs {
    pub moves: BTreeSet<MoveId>,
    pub traits: BTreeSet<TraitId>,
}

/// Every move id and every non-hidden trait id referenced by a creature.
pub fn creature_references(raw: &RawCreature) -> Result<CreatureRefs> {
    let mut refs = CreatureRefs::default();
    for entry in &raw.moves {
        refs.moves.insert(id_from_locator(&entry.move_ref.url)?);
    }
    for ability in raw.abilities.iter().filter(|ability| !ability.is_hidden) {
        refs.traits.insert(id_from_locator(&ability.ability.url)?);
    }
    Ok(refs)
}

/// Compile a creature and its optional encounter side record.
pub fn compile_creature(
    raw: &RawCreature,
    encounters: Option<&[RawEncounterArea]>,
) -> Result<Creature> {
    let past = raw
        .past_types
        .iter()
        .filter_map(|entry| match Generation::parse_full(&entry.generation.name) {
            Some(generation) => Some((generation, type_pair(&entry.types))),
            None => {
                debug!(
                    creature_id = raw.id,
                    generation = %entry.generation.name,
                    "unrecognised past-type generation, skipped"
                );
                None
            }
        })
        .collect();

    Ok(Creature {
        id: raw.id,
        name: raw.name.clone(),
        types: type_pair(&raw.types),
        past_types: ordered_overlays(past)?,
        stats: base_stats(&raw.stats),
        height: saturate_u16(raw.height),
        weight: saturate_u16(raw.weight),
        traits: trait_slots(raw.id, &raw.abilities),
        learnsets: learnsets(raw),
        locations: encounters.map(locations).unwrap_or_default(),
    })
}

/// Order past values into an overlay list.
///
/// Values are sorted by the generation they were recorded against, bounds past
/// the supported range are clamped to its end (they cover every supported
/// query), and of several values sharing a bound the first is kept.
fn ordered_overlays<T>(mut past: Vec<(Generation, T)>) -> Result<OverlayList<T>> {
    past.sort_by_key(|(generation, _)| *generation);
    let mut overlays: Vec<Overlay<T>> = past
        .into_iter()
        .map(|(generation, value)| Overlay::new(generation.clamp_supported(), value))
        .collect();
    overlays.dedup_by_key(|overlay| overlay.valid_through);
    OverlayList::new(overlays)
}

fn type_pair(slots: &[RawTypeSlot]) -> TypePair {
    let mut pair = [ElementType::None; 2];
    for slot in slots {
        let element = ElementType::parse_lenient(&slot.element.name);
        match slot.slot {
            1 => pair[0] = element,
            2 => pair[1] = element,
            _ => {}
        }
    }
    pair
}

fn base_stats(stats: &[RawStat]) -> BaseStats {
    let mut base = BaseStats::default();
    for stat in stats {
        let value = saturate_u8(stat.base_stat);
        match stat.stat.name.as_str() {
            "hp" => base.hp = value,
            "attack" => base.attack = value,
            "defense" => base.defense = value,
            "special-attack" => base.special_attack = value,
            "special-defense" => base.special_defense = value,
            "speed" => base.speed = value,
            _ => {}
        }
    }
    base
}

/// Non-hidden trait ids for slots 1 and 2; a later entry for a slot replaces an earlier one.
fn trait_slots(creature_id: u16, abilities: &[RawAbilitySlot]) -> [Option<TraitId>; 2] {
    let mut slots = [None; 2];
    for ability in abilities.iter().filter(|ability| !ability.is_hidden) {
        let Ok(id) = id_from_locator(&ability.ability.url) else {
            debug!(
                creature_id,
                url = %ability.ability.url,
                "unreadable trait locator, skipped"
            );
            continue;
        };
        match ability.slot {
            1 => slots[0] = Some(id),
            2 => slots[1] = Some(id),
            _ => {}
        }
    }
    slots
}

fn learnsets(raw: &RawCreature) -> Vec<VersionedLearnset> {
    let mut by_version: BTreeMap<GameVersion, Vec<LearnedMove>> = BTreeMap::new();
    for entry in &raw.moves {
        let Ok(move_id) = id_from_locator(&entry.move_ref.url) else {
            debug!(
                creature_id = raw.id,
                url = %entry.move_ref.url,
                "unreadable move locator, skipped"
            );
            continue;
        };
        for detail in &entry.version_group_details {
            let versions = versions_for_group(&detail.version_group.name);
            if versions.is_empty() {
                continue;
            }
            let learned = LearnedMove {
                move_id,
                method: LearnMethod::fold(&detail.move_learn_method.name),
                level: saturate_u8(detail.level_learned_at),
            };
            for version in versions {
                by_version.entry(*version).or_default().push(learned);
            }
        }
    }

    by_version
        .into_iter()
        .map(|(version, mut moves)| {
            moves.sort_by_key(|learned| (learned.level, learned.move_id, learned.method));
            VersionedLearnset { version, moves }
        })
        .collect()
}

fn locations(areas: &[RawEncounterArea]) -> Vec<Location> {
    let mut out = Vec::new();
    for area in areas {
        for details in &area.version_details {
            let Some(version) = GameVersion::parse(&details.version.name) else {
                continue;
            };
            for detail in &details.encounter_details {
                out.push(Location {
                    version,
                    method: EncounterMethod::fold(&detail.method.name),
                    min_level: saturate_u8(detail.min_level),
                    max_level: saturate_u8(detail.max_level),
                    chance: saturate_u8(detail.chance),
                    area: area.location_area.name.clone(),
                });
            }
        }
    }
    out
}

/// Title-case a slug per hyphen-separated word: `vine-whip` becomes `Vine-Whip`.
pub fn display_name(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut word_start = true;
    for ch in slug.chars() {
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_start = !ch.is_alphanumeric();
    }
    out
}

fn saturate_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn saturate_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
