use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tracing::{info, warn};

use crate::data::registry::{load_registry, Registry};
use crate::data::store::DexStore;
use crate::error::Result;

pub mod api;
pub mod routes;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<DexStore>,
    pub registry: Option<Arc<Registry>>,
}

impl AppState {
    pub fn new(store: Arc<DexStore>) -> Self {
        Self {
            store,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    /// Load the tables from `dir`. A missing or unreadable registry is logged
    /// and served without provenance.
    pub fn load(dir: &Path) -> Result<Self> {
        let state = Self::new(DexStore::load(dir)?);
        match load_registry(dir) {
            Ok(registry) => Ok(state.with_registry(registry)),
            Err(err) => {
                warn!(error = %err, "data registry unavailable");
                Ok(state)
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let response = routes::route_request(&state, method.as_str(), uri.path(), &query);
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, response.content_type)], response.body).into_response()
}

pub fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        info!("retrodex server listening on http://{bind_addr}");
        axum::serve(listener, router(state)).await
    })
}
