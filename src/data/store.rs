//! Compiled table files and the read-only store built from them.
//! Load once, share via `Arc` with every consumer; nothing mutates it afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::data::codec::GameVersion;
use crate::data::model::{
    CompiledTables, Creature, CreatureId, LearnedMove, Move, MoveId, Trait, TraitId,
};
use crate::error::{Error, Result};

pub const CREATURES_FILE: &str = "creatures.json";
pub const MOVES_FILE: &str = "moves.json";
pub const TRAITS_FILE: &str = "traits.json";

/// Write the three tables as pretty JSON arrays. Identical tables produce
/// byte-identical files.
pub fn write_tables(dir: &Path, tables: &CompiledTables) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    Ok(vec![
        write_table(&dir.join(CREATURES_FILE), &tables.creatures)?,
        write_table(&dir.join(MOVES_FILE), &tables.moves)?,
        write_table(&dir.join(TRAITS_FILE), &tables.traits)?,
    ])
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<PathBuf> {
    let mut payload = serde_json::to_string_pretty(rows)?;
    payload.push('\n');
    fs::write(path, payload)?;
    Ok(path.to_path_buf())
}

pub fn read_tables(dir: &Path) -> Result<CompiledTables> {
    Ok(CompiledTables {
        creatures: read_table(&dir.join(CREATURES_FILE))?,
        moves: read_table(&dir.join(MOVES_FILE))?,
        traits: read_table(&dir.join(TRAITS_FILE))?,
    })
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(Error::MissingSourceFile(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| Error::MalformedSourceDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Normalize a name for lookup: lowercase, spaces and underscores become hyphens.
fn normalize_lookup(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split(|ch: char| ch.is_whitespace() || ch == '_' || ch == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn dense_index<T>(
    rows: Vec<T>,
    kind: &'static str,
    id_of: impl Fn(&T) -> u16,
) -> Result<Vec<Option<T>>> {
    let len = rows.iter().map(|row| usize::from(id_of(row)) + 1).max().unwrap_or(0);
    let mut slots: Vec<Option<T>> = Vec::with_capacity(len);
    slots.resize_with(len, || None);
    for row in rows {
        let id = id_of(&row);
        let slot = &mut slots[usize::from(id)];
        if slot.is_some() {
            return Err(Error::DuplicateRecord { kind, id });
        }
        *slot = Some(row);
    }
    Ok(slots)
}

/// Read-only dex tables indexed by id.
#[derive(Debug)]
pub struct DexStore {
    creatures: Vec<Option<Creature>>,
    moves: Vec<Option<Move>>,
    traits: Vec<Option<Trait>>,
    creature_names: HashMap<String, CreatureId>,
}

impl DexStore {
    /// Build the store from compiled tables. Fails on duplicate ids.
    pub fn from_tables(tables: CompiledTables) -> Result<Self> {
        let creature_names = tables
            .creatures
            .iter()
            .map(|creature| (normalize_lookup(&creature.name), creature.id))
            .collect();
        Ok(Self {
            creatures: dense_index(tables.creatures, "creature", |c| c.id)?,
            moves: dense_index(tables.moves, "move", |m| m.id)?,
            traits: dense_index(tables.traits, "trait", |t| t.id)?,
            creature_names,
        })
    }

    /// Load the tables written by the compiler from `dir`.
    pub fn load(dir: &Path) -> Result<Arc<DexStore>> {
        let store = Self::from_tables(read_tables(dir)?)?;
        info!(
            dir = %dir.display(),
            creatures = store.creature_count(),
            moves = store.move_count(),
            traits = store.trait_count(),
            "dex tables loaded"
        );
        Ok(Arc::new(store))
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(usize::from(id))?.as_ref()
    }

    pub fn get_move(&self, id: MoveId) -> Option<&Move> {
        self.moves.get(usize::from(id))?.as_ref()
    }

    pub fn get_trait(&self, id: TraitId) -> Option<&Trait> {
        self.traits.get(usize::from(id))?.as_ref()
    }

    /// Creatures in id order.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter().flatten()
    }

    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter().flatten()
    }

    pub fn traits(&self) -> impl Iterator<Item = &Trait> {
        self.traits.iter().flatten()
    }

    pub fn creature_count(&self) -> usize {
        self.creatures().count()
    }

    pub fn move_count(&self) -> usize {
        self.moves().count()
    }

    pub fn trait_count(&self) -> usize {
        self.traits().count()
    }

    /// Resolve a creature by numeric id or by name.
    pub fn find_creature(&self, name_or_id: &str) -> Option<&Creature> {
        if let Ok(id) = name_or_id.trim().parse::<CreatureId>() {
            return self.creature(id);
        }
        let id = self.creature_names.get(&normalize_lookup(name_or_id))?;
        self.creature(*id)
    }

    /// Creatures whose name matches `query` exactly, by prefix or by substring, in id order.
    /// An empty query lists every creature.
    pub fn search(&self, query: &str) -> Vec<&Creature> {
        let query = normalize_lookup(query);
        self.creatures()
            .filter(|creature| {
                query.is_empty() || normalize_lookup(&creature.name).contains(&query)
            })
            .collect()
    }

    /// A creature's trait slots resolved against the trait table.
    pub fn creature_traits(&self, creature: &Creature) -> [Option<&Trait>; 2] {
        creature.traits.map(|slot| slot.and_then(|id| self.get_trait(id)))
    }

    /// Moves learnable in `version`, each paired with its record when it compiled.
    pub fn learned_moves<'a>(
        &'a self,
        creature: &'a Creature,
        version: GameVersion,
    ) -> impl Iterator<Item = (&'a LearnedMove, Option<&'a Move>)> + 'a {
        creature
            .learnset(version)
            .iter()
            .map(move |learned| (learned, self.get_move(learned.move_id)))
    }
}
