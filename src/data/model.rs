//! Compiled dex records. Written by the compiler, loaded by the store.
//!
//! Creatures reference moves and traits by id only; those ids may be absent
//! from the move and trait tables when the referenced record could not be
//! compiled.

use serde::{Deserialize, Serialize};

use crate::data::codec::{DamageCategory, ElementType, EncounterMethod, GameVersion, LearnMethod};
use crate::history::OverlayList;

pub type CreatureId = u16;
pub type MoveId = u16;
pub type TraitId = u16;

/// Slot 1 and slot 2 element types. A single-typed creature has `None` in slot 2.
pub type TypePair = [ElementType; 2];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: MoveId,
    pub name: String,
    pub element: ElementType,
    pub category: DamageCategory,
    pub power: u8,
    pub accuracy: u8,
    pub pp: u8,
    #[serde(default, skip_serializing_if = "OverlayList::is_empty")]
    pub past_elements: OverlayList<ElementType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub id: TraitId,
    pub name: String,
    pub short_desc: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .iter()
        .map(|&stat| u16::from(stat))
        .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedMove {
    pub move_id: MoveId,
    pub method: LearnMethod,
    pub level: u8,
}

/// Moves a creature can acquire in one release, ordered by (level, move id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedLearnset {
    pub version: GameVersion,
    pub moves: Vec<LearnedMove>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub version: GameVersion,
    pub method: EncounterMethod,
    pub min_level: u8,
    pub max_level: u8,
    pub chance: u8,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub types: TypePair,
    #[serde(default, skip_serializing_if = "OverlayList::is_empty")]
    pub past_types: OverlayList<TypePair>,
    pub stats: BaseStats,
    pub height: u16,
    pub weight: u16,
    pub traits: [Option<TraitId>; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learnsets: Vec<VersionedLearnset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

impl Creature {
    /// Moves learnable in one release; empty when the release has no data.
    pub fn learnset(&self, version: GameVersion) -> &[LearnedMove] {
        self.learnsets
            .iter()
            .find(|learnset| learnset.version == version)
            .map(|learnset| learnset.moves.as_slice())
            .unwrap_or_default()
    }

    /// Every move id referenced by any release, with repeats.
    pub fn move_ids(&self) -> impl Iterator<Item = MoveId> + '_ {
        self.learnsets
            .iter()
            .flat_map(|learnset| learnset.moves.iter().map(|learned| learned.move_id))
    }

    pub fn trait_ids(&self) -> impl Iterator<Item = TraitId> + '_ {
        self.traits.iter().flatten().copied()
    }

    pub fn locations_in(&self, version: GameVersion) -> impl Iterator<Item = &Location> + '_ {
        self.locations
            .iter()
            .filter(move |location| location.version == version)
    }
}

/// The three compiled tables, each sorted by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledTables {
    pub creatures: Vec<Creature>,
    pub moves: Vec<Move>,
    pub traits: Vec<Trait>,
}
