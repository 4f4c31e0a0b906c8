//! Where raw records come from.
//!
//! [`DirSource`] reads a PokeAPI `api/v2` snapshot from disk:
//!
//! ```text
//! pokemon/<id>/index.json
//! pokemon/<id>/encounters/index.json
//! move/<id>/index.json
//! ability/<id>/index.json
//! ```
//!
//! [`MemorySource`] holds the same documents in memory, keyed the same way.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::data::raw::{RawAbility, RawCreature, RawEncounterArea, RawMove};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Creature,
    Encounters,
    Move,
    Ability,
}

impl RecordKind {
    /// Path of a record relative to the snapshot root.
    pub fn relative_path(self, id: u16) -> PathBuf {
        match self {
            RecordKind::Creature => PathBuf::from(format!("pokemon/{id}/index.json")),
            RecordKind::Encounters => PathBuf::from(format!("pokemon/{id}/encounters/index.json")),
            RecordKind::Move => PathBuf::from(format!("move/{id}/index.json")),
            RecordKind::Ability => PathBuf::from(format!("ability/{id}/index.json")),
        }
    }
}

/// Read access to raw records. Implementations return the raw document text;
/// the provided methods decode it.
pub trait RecordSource {
    /// Raw JSON text of a record, or `Ok(None)` when it does not exist.
    fn read(&self, kind: RecordKind, id: u16) -> Result<Option<String>>;

    /// Display path for a record, used in errors and logs.
    fn locate(&self, kind: RecordKind, id: u16) -> PathBuf;

    /// Short description of the source for provenance.
    fn describe(&self) -> String;

    fn exists(&self, kind: RecordKind, id: u16) -> bool {
        matches!(self.read(kind, id), Ok(Some(_)))
    }

    fn creature(&self, id: u16) -> Result<RawCreature> {
        read_required(self, RecordKind::Creature, id)
    }

    /// Encounter areas, or `None` when the side record is absent.
    fn encounters(&self, id: u16) -> Result<Option<Vec<RawEncounterArea>>> {
        match self.read(RecordKind::Encounters, id)? {
            Some(text) => parse_document(&self.locate(RecordKind::Encounters, id), &text).map(Some),
            None => Ok(None),
        }
    }

    fn move_record(&self, id: u16) -> Result<RawMove> {
        read_required(self, RecordKind::Move, id)
    }

    fn ability(&self, id: u16) -> Result<RawAbility> {
        read_required(self, RecordKind::Ability, id)
    }
}

fn read_required<S, T>(source: &S, kind: RecordKind, id: u16) -> Result<T>
where
    S: RecordSource + ?Sized,
    T: DeserializeOwned,
{
    let path = source.locate(kind, id);
    let text = source
        .read(kind, id)?
        .ok_or_else(|| Error::MissingSourceFile(path.clone()))?;
    parse_document(&path, &text)
}

fn parse_document<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::MalformedSourceDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// PokeAPI snapshot rooted at an `api/v2` directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RecordSource for DirSource {
    fn read(&self, kind: RecordKind, id: u16) -> Result<Option<String>> {
        match fs::read_to_string(self.locate(kind, id)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn locate(&self, kind: RecordKind, id: u16) -> PathBuf {
        self.root.join(kind.relative_path(id))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn exists(&self, kind: RecordKind, id: u16) -> bool {
        self.locate(kind, id).is_file()
    }
}

/// Raw documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<(RecordKind, u16), String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RecordKind, id: u16, document: impl Into<String>) -> &mut Self {
        self.documents.insert((kind, id), document.into());
        self
    }

    pub fn with(mut self, kind: RecordKind, id: u16, document: impl Into<String>) -> Self {
        self.insert(kind, id, document);
        self
    }
}

impl RecordSource for MemorySource {
    fn read(&self, kind: RecordKind, id: u16) -> Result<Option<String>> {
        Ok(self.documents.get(&(kind, id)).cloned())
    }

    fn locate(&self, kind: RecordKind, id: u16) -> PathBuf {
        Path::new("memory").join(kind.relative_path(id))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} documents)", self.documents.len())
    }
}
