//! Handler module declarations, request dispatch and shared helpers

pub mod edit;
pub mod file;
pub mod query;

pub use edit::*;
pub use file::*;
pub use query::*;

use crate::layout::LayoutResult;
use crate::server::protocol::{error_codes, Request, Response};
use crate::server::state::ServerState;
use serde::de::DeserializeOwned;

/// Route one request to its handler
pub fn handle_request(state: &mut ServerState, request: Request) -> Response {
    let Request { id, method, params } = request;
    log::debug!("Request {}", method);

    match method.as_str() {
        "CreateDesign" => handle_create_design(state, id, params),
        "LoadDesign" => handle_load_design(state, id, params),
        "CloseDesign" => handle_close_design(state, id),
        "ListComponentTypes" => handle_list_component_types(state, id),
        "SelectComponent" => handle_select_component(state, id, params),
        "Click" => handle_click(state, id, params),
        "ToggleTunnel" => handle_toggle_tunnel(state, id),
        "Rotate" => handle_rotate(state, id),
        "Save" => handle_save(state, id),
        "Delete" => handle_delete(state, id),
        "QueryPinAtPoint" => handle_query_pin_at_point(state, id, params),
        "GetDesignState" => handle_get_design_state(state, id),
        _ => {
            log::warn!("Unknown method: {}", method);
            Response::error(id, error_codes::METHOD_NOT_FOUND, format!("Method not found: {}", method))
        }
    }
}

/// Deserialize params or produce an INVALID_PARAMS response
pub(crate) fn parse_params<T: DeserializeOwned>(
    id: &Option<serde_json::Value>,
    params: Option<serde_json::Value>,
    expected: &str,
) -> Result<T, Response> {
    params
        .and_then(|p| serde_json::from_value(p).ok())
        .ok_or_else(|| {
            Response::error(
                id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid params: expected {}", expected),
            )
        })
}

pub(crate) fn require_design(state: &ServerState, id: &Option<serde_json::Value>) -> Result<(), Response> {
    if state.is_design_open() {
        Ok(())
    } else {
        Err(Response::error(
            id.clone(),
            error_codes::NO_DESIGN_OPEN,
            "No design open. Call CreateDesign or LoadDesign first.".to_string(),
        ))
    }
}

/// Package a session result together with the draw events it emitted
pub(crate) fn respond(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    result: LayoutResult<serde_json::Value>,
) -> Response {
    let events = state.canvas.drain();
    match result {
        Ok(outcome) => Response::success(
            id,
            serde_json::json!({
                "outcome": outcome,
                "events": events,
            }),
        ),
        Err(e) => {
            log::warn!("{}", e);
            Response::layout_error(id, &e)
        }
    }
}
