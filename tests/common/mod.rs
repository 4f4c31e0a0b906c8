//! A small PokeAPI-shaped snapshot shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use retrodex::data::source::{MemorySource, RecordKind};
use serde_json::{json, Value};

const API: &str = "https://pokeapi.co/api/v2";

fn named(kind: &str, name: &str, id: u16) -> Value {
    json!({ "name": name, "url": format!("{API}/{kind}/{id}/") })
}

fn plain(name: &str) -> Value {
    json!({ "name": name, "url": "" })
}

fn type_slots(types: &[&str]) -> Value {
    Value::Array(
        types
            .iter()
            .enumerate()
            .map(|(idx, name)| json!({ "slot": idx + 1, "type": plain(name) }))
            .collect(),
    )
}

fn stats(values: [u32; 6]) -> Value {
    let names = ["hp", "attack", "defense", "special-attack", "special-defense", "speed"];
    Value::Array(
        names
            .iter()
            .zip(values)
            .map(|(name, base)| json!({ "base_stat": base, "effort": 0, "stat": plain(name) }))
            .collect(),
    )
}

/// `(move id, move name, [(version group, method, level)])`
type MoveEntry<'a> = (u16, &'a str, Vec<(&'a str, &'a str, u32)>);

fn creature_moves(entries: Vec<MoveEntry<'_>>) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(id, name, details)| {
                let details: Vec<Value> = details
                    .iter()
                    .map(|(group, method, level)| {
                        json!({
                            "level_learned_at": level,
                            "move_learn_method": plain(method),
                            "version_group": plain(group),
                        })
                    })
                    .collect();
                json!({ "move": named("move", name, *id), "version_group_details": details })
            })
            .collect(),
    )
}

fn ability(id: u16, name: &str, slot: u8, hidden: bool) -> Value {
    json!({ "ability": named("ability", name, id), "is_hidden": hidden, "slot": slot })
}

fn bulbasaur() -> Value {
    json!({
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "types": type_slots(&["grass", "poison"]),
        "stats": stats([45, 49, 49, 65, 65, 45]),
        "abilities": [ability(65, "overgrow", 1, false), ability(34, "chlorophyll", 3, true)],
        "moves": creature_moves(vec![
            (45, "growl", vec![("red-blue", "level-up", 1)]),
            (22, "vine-whip", vec![("red-blue", "level-up", 13)]),
            (33, "tackle", vec![("red-blue", "level-up", 1), ("x-y", "level-up", 1)]),
        ]),
    })
}

fn charmander() -> Value {
    json!({
        "id": 4,
        "name": "charmander",
        "height": 6,
        "weight": 85,
        "types": type_slots(&["fire"]),
        "stats": stats([39, 52, 43, 60, 50, 65]),
        "abilities": [ability(66, "blaze", 1, false), ability(94, "solar-power", 3, true)],
        "moves": creature_moves(vec![
            (10, "scratch", vec![("red-blue", "level-up", 1)]),
            (7, "fire-punch", vec![("firered-leafgreen", "tutor", 0)]),
        ]),
    })
}

fn rattata() -> Value {
    json!({
        "id": 19,
        "name": "rattata",
        "height": 3,
        "weight": 35,
        "types": type_slots(&["normal"]),
        "stats": stats([30, 56, 35, 25, 35, 72]),
        "abilities": [ability(50, "run-away", 1, false), ability(62, "guts", 2, false)],
        "moves": creature_moves(vec![
            (33, "tackle", vec![("red-blue", "level-up", 1), ("gold-silver", "level-up", 1)]),
            (44, "bite", vec![("gold-silver", "level-up", 13)]),
        ]),
    })
}

fn clefairy() -> Value {
    json!({
        "id": 35,
        "name": "clefairy",
        "height": 6,
        "weight": 75,
        "types": type_slots(&["fairy"]),
        "past_types": [{ "generation": plain("generation-v"), "types": type_slots(&["normal"]) }],
        "stats": stats([70, 45, 48, 60, 65, 35]),
        "abilities": [ability(56, "cute-charm", 1, false)],
        "moves": creature_moves(vec![
            (1, "pound", vec![("red-blue", "level-up", 1)]),
            (204, "charm", vec![("gold-silver", "egg", 0)]),
        ]),
    })
}

fn magnemite() -> Value {
    json!({
        "id": 81,
        "name": "magnemite",
        "height": 3,
        "weight": 60,
        "types": type_slots(&["electric", "steel"]),
        "past_types": [{ "generation": plain("generation-i"), "types": type_slots(&["electric"]) }],
        "stats": stats([25, 35, 70, 95, 55, 45]),
        "abilities": [
            ability(42, "magnet-pull", 1, false),
            ability(5, "sturdy", 2, false),
            ability(148, "analytic", 3, true),
        ],
        "moves": creature_moves(vec![(84, "thunder-shock", vec![("red-blue", "level-up", 21)])]),
    })
}

fn magnemite_encounters() -> Value {
    json!([{
        "location_area": plain("power-plant-area"),
        "version_details": [{
            "max_chance": 30,
            "version": plain("red"),
            "encounter_details": [
                { "chance": 30, "min_level": 21, "max_level": 23, "method": plain("walk") }
            ],
        }],
    }])
}

fn mv(id: u16, name: &str, element: &str, class: &str, power: Option<u32>, past: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "power": power,
        "accuracy": 100,
        "pp": 25,
        "type": plain(element),
        "damage_class": plain(class),
        "past_values": past,
    })
}

fn trait_doc(id: u16, name: &str, short_effect: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "effect_entries": [
            { "language": plain("de"), "short_effect": "nicht englisch" },
            { "language": plain("en"), "short_effect": short_effect },
        ],
    })
}

/// Every document in the snapshot, keyed the way a source stores them.
pub fn documents() -> Vec<(RecordKind, u16, Value)> {
    let none = json!([]);
    vec![
        (RecordKind::Creature, 1, bulbasaur()),
        (RecordKind::Creature, 4, charmander()),
        (RecordKind::Creature, 19, rattata()),
        (RecordKind::Creature, 35, clefairy()),
        (RecordKind::Creature, 81, magnemite()),
        (RecordKind::Encounters, 81, magnemite_encounters()),
        (RecordKind::Move, 1, mv(1, "pound", "normal", "physical", Some(40), none.clone())),
        (RecordKind::Move, 7, mv(7, "fire-punch", "fire", "physical", Some(75), none.clone())),
        (RecordKind::Move, 10, mv(10, "scratch", "normal", "physical", Some(40), none.clone())),
        (RecordKind::Move, 22, mv(22, "vine-whip", "grass", "physical", Some(45), none.clone())),
        (RecordKind::Move, 33, mv(33, "tackle", "normal", "physical", Some(40), none.clone())),
        (RecordKind::Move, 45, mv(45, "growl", "normal", "status", None, none.clone())),
        (
            RecordKind::Move,
            84,
            mv(84, "thunder-shock", "electric", "special", Some(40), none.clone()),
        ),
        (
            RecordKind::Move,
            44,
            mv(
                44,
                "bite",
                "dark",
                "physical",
                Some(60),
                json!([{ "type": plain("normal"), "version_group": plain("gold-silver") }]),
            ),
        ),
        (
            RecordKind::Move,
            204,
            mv(
                204,
                "charm",
                "fairy",
                "status",
                None,
                json!([{ "type": plain("normal"), "version_group": plain("x-y") }]),
            ),
        ),
        (RecordKind::Ability, 5, trait_doc(5, "sturdy", "Prevents OHKO moves.")),
        (RecordKind::Ability, 42, trait_doc(42, "magnet-pull", "Traps steel types.")),
        (RecordKind::Ability, 50, trait_doc(50, "run-away", "Ensures escape.")),
        (RecordKind::Ability, 56, trait_doc(56, "cute-charm", "May infatuate on contact.")),
        (RecordKind::Ability, 62, trait_doc(62, "guts", "Boosts attack when statused.")),
        (RecordKind::Ability, 65, trait_doc(65, "overgrow", "Boosts grass moves in a pinch.")),
        (RecordKind::Ability, 66, trait_doc(66, "blaze", "Boosts fire moves in a pinch.")),
        (RecordKind::Ability, 34, trait_doc(34, "chlorophyll", "Doubles speed in sun.")),
    ]
}

pub fn memory_snapshot() -> MemorySource {
    let mut source = MemorySource::new();
    for (kind, id, doc) in documents() {
        source.insert(kind, id, doc.to_string());
    }
    source
}

/// Write the snapshot under `root` in the `api/v2` directory layout.
pub fn write_snapshot(root: &Path) {
    for (kind, id, doc) in documents() {
        let path = root.join(kind.relative_path(id));
        fs::create_dir_all(path.parent().expect("record path has a parent")).unwrap();
        fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    }
}
