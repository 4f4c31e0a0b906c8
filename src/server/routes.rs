use std::collections::HashMap;

use crate::data::codec::Generation;
use crate::server::api;
use crate::server::AppState;

pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

pub fn route_request(
    state: &AppState,
    method: &str,
    path: &str,
    query: &HashMap<String, String>,
) -> HttpResponse {
    let store = state.store.as_ref();
    let path = path.trim_end_matches('/');
    if method != "GET" {
        return error_response(405, "Only GET is supported");
    }

    match path {
        "/api/health" => ok_or_500(api::health_payload()),
        "/api/data/version" => {
            ok_or_500(api::data_version_payload(store, state.registry.as_deref()))
        }
        "/api/creatures" => {
            let q = query.get("q").map(String::as_str).unwrap_or("");
            ok_or_500(api::creatures_payload(store, q))
        }
        path if path.starts_with("/api/creatures/") => {
            let Some(id) = parse_id(path, "/api/creatures/") else {
                return error_response(400, "Creature id must be a number");
            };
            match generation_param(query) {
                Ok(generation) => found_or_404(
                    api::creature_payload(store, id, generation),
                    "Creature not found",
                ),
                Err(response) => response,
            }
        }
        path if path.starts_with("/api/moves/") => {
            let Some(id) = parse_id(path, "/api/moves/") else {
                return error_response(400, "Move id must be a number");
            };
            match generation_param(query) {
                Ok(generation) => {
                    found_or_404(api::move_payload(store, id, generation), "Move not found")
                }
                Err(response) => response,
            }
        }
        path if path.starts_with("/api/traits/") => {
            let Some(id) = parse_id(path, "/api/traits/") else {
                return error_response(400, "Trait id must be a number");
            };
            found_or_404(api::trait_payload(store, id), "Trait not found")
        }
        _ => error_response(404, "Route not found"),
    }
}

fn parse_id(path: &str, prefix: &str) -> Option<u16> {
    path.strip_prefix(prefix)?.parse().ok()
}

fn generation_param(query: &HashMap<String, String>) -> Result<Generation, HttpResponse> {
    api::parse_generation(query.get("generation").map(String::as_str))
        .map_err(|message| error_response(400, &message))
}

fn ok_or_500(payload: Result<String, serde_json::Error>) -> HttpResponse {
    match payload {
        Ok(body) => HttpResponse {
            status_code: 200,
            content_type: "application/json",
            body,
        },
        Err(err) => error_response(500, &err.to_string()),
    }
}

fn found_or_404(payload: Result<Option<String>, serde_json::Error>, missing: &str) -> HttpResponse {
    match payload {
        Ok(Some(body)) => ok_or_500(Ok(body)),
        Ok(None) => error_response(404, missing),
        Err(err) => error_response(500, &err.to_string()),
    }
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    let fallback = "{\n  \"status\": \"error\",\n  \"message\": \"Unknown error\"\n}".to_string();
    HttpResponse {
        status_code,
        content_type: "application/json",
        body: api::error_payload(message).unwrap_or(fallback),
    }
}
