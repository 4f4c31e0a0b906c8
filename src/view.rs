//! Generation-resolved views of compiled records, shared by `show` and the HTTP API.
//! Enumerations are rendered by their source slug rather than their numeric code.

use serde::Serialize;

use crate::data::codec::{ElementType, GameVersion, Generation};
use crate::data::model::{BaseStats, Creature, LearnedMove, Location, Move, Trait, TraitId};
use crate::data::store::DexStore;

#[derive(Debug, Clone, Serialize)]
pub struct MoveView {
    pub id: u16,
    pub name: String,
    #[serde(rename = "type")]
    pub element: &'static str,
    pub category: &'static str,
    pub power: u8,
    pub accuracy: u8,
    pub pp: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitView {
    pub id: u16,
    pub name: String,
    pub short_desc: String,
}

/// A trait slot; `detail` is null when the trait did not compile.
#[derive(Debug, Clone, Serialize)]
pub struct TraitSlotView {
    pub id: TraitId,
    pub detail: Option<TraitView>,
}

/// One learnable move; `detail` is null when the move did not compile.
#[derive(Debug, Clone, Serialize)]
pub struct LearnedMoveView {
    pub move_id: u16,
    pub method: &'static str,
    pub level: u8,
    pub detail: Option<MoveView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearnsetView {
    pub version: &'static str,
    pub moves: Vec<LearnedMoveView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub version: &'static str,
    pub area: String,
    pub method: &'static str,
    pub min_level: u8,
    pub max_level: u8,
    pub chance: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatureView {
    pub id: u16,
    pub name: String,
    pub generation: u8,
    pub types: Vec<&'static str>,
    pub stats: BaseStats,
    pub height: u16,
    pub weight: u16,
    pub traits: Vec<TraitSlotView>,
    pub learnsets: Vec<LearnsetView>,
    pub locations: Vec<LocationView>,
}

/// Short listing row for search results.
#[derive(Debug, Clone, Serialize)]
pub struct CreatureSummary {
    pub id: u16,
    pub name: String,
    pub types: Vec<&'static str>,
}

pub fn move_view(mv: &Move, generation: Generation) -> MoveView {
    MoveView {
        id: mv.id,
        name: mv.name.clone(),
        element: mv.element_for(generation).source_name(),
        category: mv.category_for(generation).source_name(),
        power: mv.power,
        accuracy: mv.accuracy,
        pp: mv.pp,
    }
}

pub fn trait_view(record: &Trait) -> TraitView {
    TraitView {
        id: record.id,
        name: record.name.clone(),
        short_desc: record.short_desc.clone(),
    }
}

fn type_names(pair: [ElementType; 2]) -> Vec<&'static str> {
    pair.iter()
        .filter(|element| !element.is_none())
        .map(|element| element.source_name())
        .collect()
}

fn learned_move_view(
    learned: &LearnedMove,
    mv: Option<&Move>,
    generation: Generation,
) -> LearnedMoveView {
    LearnedMoveView {
        move_id: learned.move_id,
        method: learned.method.source_name(),
        level: learned.level,
        detail: mv.map(|mv| move_view(mv, generation)),
    }
}

fn location_view(location: &Location) -> LocationView {
    LocationView {
        version: location.version.source_name(),
        area: location.area.clone(),
        method: location.method.source_name(),
        min_level: location.min_level,
        max_level: location.max_level,
        chance: location.chance,
    }
}

/// Resolve a creature at `generation`: types from its overlays, learnsets and
/// locations from that generation's releases, moves resolved at the same
/// generation.
pub fn creature_view(
    store: &DexStore,
    creature: &Creature,
    generation: Generation,
) -> CreatureView {
    let learnsets = GameVersion::in_generation(generation)
        .filter_map(|version| {
            let moves: Vec<_> = store
                .learned_moves(creature, version)
                .map(|(learned, mv)| learned_move_view(learned, mv, generation))
                .collect();
            (!moves.is_empty()).then(|| LearnsetView {
                version: version.source_name(),
                moves,
            })
        })
        .collect();

    let locations = creature
        .locations
        .iter()
        .filter(|location| location.version.generation() == generation)
        .map(location_view)
        .collect();

    let traits = creature
        .trait_ids()
        .map(|id| TraitSlotView {
            id,
            detail: store.get_trait(id).map(trait_view),
        })
        .collect();

    CreatureView {
        id: creature.id,
        name: creature.name.clone(),
        generation: generation.number(),
        types: type_names(creature.types_for(generation)),
        stats: creature.stats,
        height: creature.height,
        weight: creature.weight,
        traits,
        learnsets,
        locations,
    }
}

pub fn creature_summary(creature: &Creature) -> CreatureSummary {
    CreatureSummary {
        id: creature.id,
        name: creature.name.clone(),
        types: type_names(creature.types),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::codec::{DamageCategory, LearnMethod};
    use crate::data::model::{CompiledTables, VersionedLearnset};
    use crate::history::{Overlay, OverlayList};

    fn bite() -> Move {
        Move {
            id: 44,
            name: "Bite".to_string(),
            element: ElementType::Dark,
            category: DamageCategory::Physical,
            power: 60,
            accuracy: 100,
            pp: 25,
            past_elements: OverlayList::new(vec![Overlay::new(Generation::I, ElementType::Normal)])
                .unwrap(),
        }
    }

    #[test]
    fn creature_view_resolves_moves_and_reports_absent_references() {
        let creature = Creature {
            id: 19,
            name: "rattata".to_string(),
            types: [ElementType::Normal, ElementType::None],
            past_types: OverlayList::empty(),
            stats: BaseStats::default(),
            height: 3,
            weight: 35,
            traits: [Some(50), None],
            learnsets: vec![
                VersionedLearnset {
                    version: GameVersion::Red,
                    moves: vec![
                        LearnedMove { move_id: 44, method: LearnMethod::LevelUp, level: 7 },
                        LearnedMove { move_id: 999, method: LearnMethod::Machine, level: 0 },
                    ],
                },
                VersionedLearnset {
                    version: GameVersion::Gold,
                    moves: vec![LearnedMove {
                        move_id: 44,
                        method: LearnMethod::LevelUp,
                        level: 7,
                    }],
                },
            ],
            locations: Vec::new(),
        };
        let store = DexStore::from_tables(CompiledTables {
            creatures: vec![creature],
            moves: vec![bite()],
            traits: Vec::new(),
        })
        .unwrap();
        let creature = store.creature(19).unwrap();

        let view = creature_view(&store, creature, Generation::I);
        assert_eq!(view.types, vec!["normal"]);
        assert_eq!(view.learnsets.len(), 1);
        assert_eq!(view.learnsets[0].version, "red");
        let first = view.learnsets[0].moves[0].detail.as_ref().unwrap();
        assert_eq!((first.element, first.category), ("normal", "physical"));
        assert!(view.learnsets[0].moves[1].detail.is_none());
        assert!(view.traits[0].detail.is_none());

        let view = creature_view(&store, creature, Generation::II);
        let first = view.learnsets[0].moves[0].detail.as_ref().unwrap();
        assert_eq!((first.element, first.category), ("dark", "physical"));
    }
}
