//! Edit operations: SelectComponent, Click, ToggleTunnel, Rotate, Save, Delete
//!
//! Clients forward every workspace click as `Click`, including the click
//! that pressed a Tunnel, Rotate or Delete control, then send the command.

use super::{parse_params, require_design, respond};
use crate::layout::Point;
use crate::server::protocol::Response;
use crate::server::state::ServerState;
use serde::Deserialize;

/// Handle SelectComponent request - arms placement of a component type
pub fn handle_select_component(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct SelectParams {
        component: String,
    }

    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let params: SelectParams = match parse_params(&id, params, "{component: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let result = state
        .session
        .select_component(&params.component)
        .map(|()| serde_json::json!({ "selected": params.component }));
    respond(state, id, result)
}

/// Handle Click request - places the armed component or adds a trace vertex
pub fn handle_click(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct ClickParams {
        x: f64,
        y: f64,
    }

    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let params: ClickParams = match parse_params(&id, params, "{x: number, y: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let result = state
        .session
        .click(Point::new(params.x, params.y), &mut state.canvas)
        .map(|outcome| serde_json::json!(outcome));
    respond(state, id, result)
}

/// Handle ToggleTunnel request
pub fn handle_toggle_tunnel(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let tunnel = state.session.toggle_tunnel();
    respond(state, id, Ok(serde_json::json!({ "tunnel": tunnel })))
}

/// Handle Rotate request - quarter-turns the last placed component
pub fn handle_rotate(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let result = state
        .session
        .rotate(&mut state.canvas)
        .map(|tag| serde_json::json!({ "tag": tag }));
    respond(state, id, result)
}

/// Handle Save request - persists the open trace session
pub fn handle_save(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let result = state.session.save().map(|tag| serde_json::json!({ "tag": tag }));
    respond(state, id, result)
}

/// Handle Delete request - removes the component or trace under the last pick
pub fn handle_delete(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let result = state
        .session
        .delete(&mut state.canvas)
        .map(|deleted| serde_json::json!({ "deleted": deleted }));
    respond(state, id, result)
}
