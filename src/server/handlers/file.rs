//! Design operations: CreateDesign, LoadDesign, CloseDesign

use super::{parse_params, require_design, respond};
use crate::persist::{CsvDesignStore, DesignStore};
use crate::server::protocol::{error_codes, Response};
use crate::server::state::ServerState;
use serde::Deserialize;
use std::time::Instant;

#[derive(Deserialize)]
struct DesignParams {
    name: String,
}

const DESIGN_PARAMS: &str = "{name: string}";

/// Design names become directory and file names
fn valid_design_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\')
}

fn design_store(state: &ServerState, id: &Option<serde_json::Value>, params: Option<serde_json::Value>) -> Result<CsvDesignStore, Response> {
    let params: DesignParams = parse_params(id, params, DESIGN_PARAMS)?;
    if !valid_design_name(&params.name) {
        return Err(Response::error(
            id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Invalid design name: '{}'", params.name),
        ));
    }
    Ok(CsvDesignStore::new(&state.session.config().designs_root, &params.name))
}

/// Handle CreateDesign request - starts an empty design directory
pub fn handle_create_design(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let store = match design_store(state, &id, params) {
        Ok(store) => store,
        Err(response) => return response,
    };

    if store.exists() {
        return Response::error(
            id,
            error_codes::DESIGN_EXISTS,
            format!("Design '{}' already exists at {}", store.name(), store.dir().display()),
        );
    }

    log::info!("Creating design at {}", store.dir().display());
    let name = store.name().to_string();
    let result = state
        .session
        .create_design(store, &mut state.canvas)
        .map(|()| {
            serde_json::json!({
                "name": name,
                "workspace": state.session.workspace(),
            })
        });
    respond(state, id, result)
}

/// Handle LoadDesign request - replays a saved design
pub fn handle_load_design(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let store = match design_store(state, &id, params) {
        Ok(store) => store,
        Err(response) => return response,
    };

    log::info!("Loading design from {}", store.dir().display());
    let start = Instant::now();
    let name = store.name().to_string();
    let result = state
        .session
        .open_design(store, &mut state.canvas)
        .map(|()| {
            serde_json::json!({
                "name": name,
                "components": state.session.components().len(),
                "traces": state.session.traces().len(),
                "connections": state.session.connections().len(),
            })
        });
    log::info!("Load time: {:.2?}", start.elapsed());
    respond(state, id, result)
}

/// Handle CloseDesign request
pub fn handle_close_design(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if let Err(response) = require_design(state, &id) {
        return response;
    }
    state.session.close_design(&mut state.canvas);
    respond(state, id, Ok(serde_json::json!({ "closed": true })))
}
