//! Raw PokeAPI record shapes (partial). Only the fields the compiler reads are
//! declared; everything else in the source documents is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

// ----- Creature (pokemon/<id>/index.json) -----

#[derive(Debug, Clone, Deserialize)]
pub struct RawTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub element: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPastTypes {
    pub generation: RawNamedResource,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStat {
    pub base_stat: u32,
    pub stat: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAbilitySlot {
    pub slot: u8,
    #[serde(default)]
    pub is_hidden: bool,
    pub ability: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVersionGroupDetail {
    #[serde(default)]
    pub level_learned_at: u32,
    pub move_learn_method: RawNamedResource,
    pub version_group: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCreatureMove {
    #[serde(rename = "move")]
    pub move_ref: RawNamedResource,
    #[serde(default)]
    pub version_group_details: Vec<RawVersionGroupDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCreature {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub past_types: Vec<RawPastTypes>,
    #[serde(default)]
    pub stats: Vec<RawStat>,
    #[serde(default)]
    pub abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    pub moves: Vec<RawCreatureMove>,
}

// ----- Encounters (pokemon/<id>/encounters/index.json) -----

#[derive(Debug, Clone, Deserialize)]
pub struct RawEncounterDetail {
    #[serde(default)]
    pub chance: u32,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub max_level: u32,
    pub method: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVersionEncounters {
    #[serde(default)]
    pub encounter_details: Vec<RawEncounterDetail>,
    pub version: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEncounterArea {
    pub location_area: RawNamedResource,
    #[serde(default)]
    pub version_details: Vec<RawVersionEncounters>,
}

// ----- Move (move/<id>/index.json) -----

#[derive(Debug, Clone, Deserialize)]
pub struct RawPastMoveValues {
    #[serde(rename = "type", default)]
    pub element: Option<RawNamedResource>,
    pub version_group: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMove {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub pp: Option<u32>,
    pub damage_class: RawNamedResource,
    #[serde(rename = "type")]
    pub element: RawNamedResource,
    #[serde(default)]
    pub past_values: Vec<RawPastMoveValues>,
}

// ----- Ability (ability/<id>/index.json) -----

#[derive(Debug, Clone, Deserialize)]
pub struct RawEffectEntry {
    pub language: RawNamedResource,
    #[serde(default)]
    pub short_effect: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAbility {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub effect_entries: Vec<RawEffectEntry>,
}
