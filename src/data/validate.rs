//! Consistency checks over compiled tables.

use std::collections::HashSet;
use std::fmt;

use crate::data::model::{CompiledTables, Creature, Move};
use crate::history::OverlayList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Check ordering and referential consistency of compiled tables.
///
/// References to moves or traits missing from the tables are reported as
/// info: a skipped move leaves its references behind on purpose.
pub fn validate_tables(tables: &CompiledTables) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_ids(&mut report, "creature", tables.creatures.iter().map(|c| c.id));
    check_ids(&mut report, "move", tables.moves.iter().map(|m| m.id));
    check_ids(&mut report, "trait", tables.traits.iter().map(|t| t.id));

    let move_ids: HashSet<_> = tables.moves.iter().map(|m| m.id).collect();
    let trait_ids: HashSet<_> = tables.traits.iter().map(|t| t.id).collect();

    for mv in &tables.moves {
        check_move(&mut report, mv);
    }
    for creature in &tables.creatures {
        check_creature(&mut report, creature, &move_ids, &trait_ids);
    }
    report
}

fn check_ids(report: &mut ValidationReport, kind: &str, ids: impl Iterator<Item = u16>) {
    let mut seen = HashSet::new();
    let mut previous: Option<u16> = None;
    for id in ids {
        let context = format!("{kind}[{id}]");
        if !seen.insert(id) {
            report.push(ValidationSeverity::Error, &context, "duplicate id");
        } else if previous.is_some_and(|prev| prev > id) {
            report.push(ValidationSeverity::Error, &context, "table not sorted by id");
        }
        previous = Some(id);
    }
}

fn check_overlays<T>(report: &mut ValidationReport, context: &str, overlays: &OverlayList<T>) {
    let mut previous = None;
    for overlay in overlays {
        if !overlay.valid_through.is_supported() {
            report.push(
                ValidationSeverity::Error,
                context,
                format!("overlay bound {} outside the supported range", overlay.valid_through),
            );
        }
        if previous.is_some_and(|prev| prev >= overlay.valid_through) {
            report.push(ValidationSeverity::Error, context, "overlays not strictly ascending");
        }
        previous = Some(overlay.valid_through);
    }
}

fn check_move(report: &mut ValidationReport, mv: &Move) {
    let context = format!("move[{}]", mv.id);
    check_overlays(report, &context, &mv.past_elements);
}

fn check_creature(
    report: &mut ValidationReport,
    creature: &Creature,
    move_ids: &HashSet<u16>,
    trait_ids: &HashSet<u16>,
) {
    let context = format!("creature[{}]", creature.id);
    check_overlays(report, &context, &creature.past_types);

    if creature.learnsets.is_empty() {
        report.push(ValidationSeverity::Warning, &context, "no learnable moves");
    }
    let mut versions = HashSet::new();
    for learnset in &creature.learnsets {
        if !versions.insert(learnset.version) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate learnset for {}", learnset.version),
            );
        }
        let sorted = learnset.moves.windows(2).all(|pair| {
            (pair[0].level, pair[0].move_id, pair[0].method)
                <= (pair[1].level, pair[1].move_id, pair[1].method)
        });
        if !sorted {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("learnset for {} not sorted by level", learnset.version),
            );
        }
    }

    let mut missing_moves: Vec<_> = creature
        .move_ids()
        .filter(|id| !move_ids.contains(id))
        .collect();
    missing_moves.sort_unstable();
    missing_moves.dedup();
    for id in missing_moves {
        report.push(
            ValidationSeverity::Info,
            &context,
            format!("references move {id} absent from the move table"),
        );
    }
    for id in creature.trait_ids().filter(|id| !trait_ids.contains(id)) {
        report.push(
            ValidationSeverity::Info,
            &context,
            format!("references trait {id} absent from the trait table"),
        );
    }
}
