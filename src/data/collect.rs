//! Two-pass collection: discover the creatures, gather the moves and traits
//! they reference, compile everything and write the tables.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::CompileConfig;
use crate::data::compile::{compile_creature, compile_move, compile_trait, creature_references};
use crate::data::model::{CompiledTables, CreatureId, MoveId, TraitId};
use crate::data::registry::{build_registry, write_registry};
use crate::data::source::{DirSource, RecordKind, RecordSource};
use crate::data::store::write_tables;
use crate::error::{Error, Result};

/// Counts reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub creatures: usize,
    pub moves: usize,
    pub traits: usize,
    pub skipped_moves: Vec<MoveId>,
    pub skipped_traits: Vec<TraitId>,
}

/// Ids to compile: the explicit list, or `1..=scan_limit`, keeping only ids
/// whose creature record exists. Ascending and deduplicated.
pub fn working_set<S: RecordSource + ?Sized>(
    source: &S,
    explicit: Option<&[CreatureId]>,
    scan_limit: CreatureId,
) -> Vec<CreatureId> {
    let candidates: BTreeSet<CreatureId> = match explicit {
        Some(ids) => ids.iter().copied().collect(),
        None => (1..=scan_limit).collect(),
    };
    candidates
        .into_iter()
        .filter(|id| {
            let present = source.exists(RecordKind::Creature, *id);
            if !present && explicit.is_some() {
                warn!(creature_id = id, "requested creature has no record, skipped");
            }
            present
        })
        .collect()
}

/// Compile the working set into sorted tables.
///
/// Creature failures abort the run. Moves and traits that fail to load or
/// compile are left out; references to them stay in place and resolve to
/// absent.
pub fn compile_tables<S: RecordSource + ?Sized>(
    source: &S,
    ids: &[CreatureId],
) -> Result<(CompiledTables, CompileSummary)> {
    let mut move_ids = BTreeSet::new();
    let mut trait_ids = BTreeSet::new();
    for &id in ids {
        let refs = creature_references(&source.creature(id)?)?;
        move_ids.extend(refs.moves);
        trait_ids.extend(refs.traits);
    }
    info!(
        creatures = ids.len(),
        moves = move_ids.len(),
        traits = trait_ids.len(),
        "references collected"
    );

    let mut tables = CompiledTables::default();
    let mut summary = CompileSummary::default();

    for &id in ids {
        let raw = source.creature(id)?;
        let encounters = source.encounters(id)?;
        let creature = compile_creature(&raw, encounters.as_deref())?;
        debug!(creature_id = id, name = %creature.name, "creature compiled");
        tables.creatures.push(creature);
    }

    for &id in &move_ids {
        match source.move_record(id).and_then(|raw| compile_move(&raw)) {
            Ok(mv) => {
                debug!(move_id = id, name = %mv.name, "move compiled");
                tables.moves.push(mv);
            }
            Err(err) => {
                warn!(move_id = id, error = %err, "move skipped");
                summary.skipped_moves.push(id);
            }
        }
    }

    for &id in &trait_ids {
        match source.ability(id) {
            Ok(raw) => tables.traits.push(compile_trait(&raw)),
            Err(err) => {
                warn!(trait_id = id, error = %err, "trait skipped");
                summary.skipped_traits.push(id);
            }
        }
    }

    tables.creatures.sort_by_key(|creature| creature.id);
    tables.moves.sort_by_key(|mv| mv.id);
    tables.traits.sort_by_key(|t| t.id);

    summary.creatures = tables.creatures.len();
    summary.moves = tables.moves.len();
    summary.traits = tables.traits.len();
    Ok((tables, summary))
}

/// Full compile run against a snapshot directory: tables plus registry.
pub fn run(config: &CompileConfig) -> Result<CompileSummary> {
    if !config.data_dir.is_dir() {
        return Err(Error::Config(format!(
            "data directory '{}' does not exist",
            config.data_dir.display()
        )));
    }
    let source = DirSource::new(&config.data_dir);
    let ids = working_set(&source, config.creature_ids.as_deref(), config.scan_limit);
    info!(source = %source.describe(), creatures = ids.len(), "compiling");

    let (tables, summary) = compile_tables(&source, &ids)?;
    write_tables(&config.out_dir, &tables)?;
    let registry = build_registry(&source.describe(), &config.data_version, &tables, Utc::now());
    write_registry(&config.out_dir, &registry)?;

    info!(
        out_dir = %config.out_dir.display(),
        creatures = summary.creatures,
        moves = summary.moves,
        traits = summary.traits,
        skipped_moves = summary.skipped_moves.len(),
        skipped_traits = summary.skipped_traits.len(),
        "tables written"
    );
    Ok(summary)
}
