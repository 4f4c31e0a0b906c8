use serde::Serialize;

use crate::data::codec::Generation;
use crate::data::registry::Registry;
use crate::data::store::DexStore;
use crate::view::{creature_summary, creature_view, move_view, trait_view, CreatureSummary};

/// Generation used when a request does not name one.
pub const DEFAULT_GENERATION: Generation = Generation::III;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody<'a> {
    pub status: &'static str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataVersionResponse<'a> {
    pub creatures: usize,
    pub moves: usize,
    pub traits: usize,
    pub supported_generations: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<&'a Registry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatureListResponse {
    pub query: String,
    pub count: usize,
    pub creatures: Vec<CreatureSummary>,
}

/// Parse a `generation` parameter; absent means [`DEFAULT_GENERATION`].
pub fn parse_generation(raw: Option<&str>) -> Result<Generation, String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_GENERATION);
    };
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(Generation::new)
        .ok_or_else(|| format!("generation must be 1, 2 or 3 (got '{raw}')"))
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "retrodex-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn error_payload(message: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ErrorBody {
        status: "error",
        message,
    })
}

pub fn data_version_payload(
    store: &DexStore,
    registry: Option<&Registry>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DataVersionResponse {
        creatures: store.creature_count(),
        moves: store.move_count(),
        traits: store.trait_count(),
        supported_generations: Generation::SUPPORTED.iter().map(|g| g.number()).collect(),
        datasets: registry,
    })
}

pub fn creatures_payload(store: &DexStore, query: &str) -> Result<String, serde_json::Error> {
    let creatures: Vec<_> = store.search(query).into_iter().map(creature_summary).collect();
    serde_json::to_string_pretty(&CreatureListResponse {
        query: query.to_string(),
        count: creatures.len(),
        creatures,
    })
}

/// `Ok(None)` when the id is unknown.
pub fn creature_payload(
    store: &DexStore,
    id: u16,
    generation: Generation,
) -> Result<Option<String>, serde_json::Error> {
    store
        .creature(id)
        .map(|creature| serde_json::to_string_pretty(&creature_view(store, creature, generation)))
        .transpose()
}

pub fn move_payload(
    store: &DexStore,
    id: u16,
    generation: Generation,
) -> Result<Option<String>, serde_json::Error> {
    store
        .get_move(id)
        .map(|mv| serde_json::to_string_pretty(&move_view(mv, generation)))
        .transpose()
}

pub fn trait_payload(store: &DexStore, id: u16) -> Result<Option<String>, serde_json::Error> {
    store
        .get_trait(id)
        .map(|record| serde_json::to_string_pretty(&trait_view(record)))
        .transpose()
}
