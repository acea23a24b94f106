//! Query handlers: QueryPinAtPoint, GetDesignState, ListComponentTypes

use super::{parse_params, require_design};
use crate::layout::Point;
use crate::server::protocol::Response;
use crate::server::state::ServerState;
use serde::Deserialize;

/// Handle QueryPinAtPoint request - finds the pin a click at (x, y) would snap to
pub fn handle_query_pin_at_point(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct QueryPinParams {
        x: f64,
        y: f64,
    }

    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let params: QueryPinParams = match parse_params(&id, params, "{x: number, y: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let pin = state.session.pin_at(Point::new(params.x, params.y));
    Response::success(
        id,
        serde_json::json!({
            "pin": pin,
        }),
    )
}

/// Handle GetDesignState request - full snapshot of the open design
pub fn handle_get_design_state(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    if let Err(response) = require_design(state, &id) {
        return response;
    }
    let session = &state.session;

    let components: Vec<serde_json::Value> = session
        .components()
        .iter()
        .map(|c| {
            serde_json::json!({
                "tag": c.tag,
                "component": c.component,
                "center": c.center,
                "rotation_degrees": c.rotation.degrees(),
                "pins": c.pins,
                "outline": c.perimeter.corners(),
            })
        })
        .collect();

    Response::success(
        id,
        serde_json::json!({
            "name": session.design_name(),
            "workspace": session.workspace(),
            "components": components,
            "traces": session.traces(),
            "connections": session.connections(),
            "pin_count": session.pins().len(),
            "pending_vertices": session.pending_vertices(),
            "tunnel": session.tunnel(),
            "selected": session.selected(),
            "armed": session.is_armed(),
            "last_placed": session.last_placed(),
        }),
    )
}

/// Handle ListComponentTypes request - component library names in file order
pub fn handle_list_component_types(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let catalog = state.session.catalog();
    let types: Vec<serde_json::Value> = catalog
        .names()
        .filter_map(|name| catalog.lookup(name).ok())
        .map(|def| {
            serde_json::json!({
                "name": def.name,
                "width": def.width,
                "length": def.length,
                "pin_count": def.pin_count(),
            })
        })
        .collect();
    Response::success(id, serde_json::json!({ "types": types }))
}
