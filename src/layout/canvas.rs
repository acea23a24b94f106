//! Drawing/notification interface the layout core calls into
//!
//! The core never renders. It reports what changed through [`Canvas`], and
//! the front end decides how to show it. Everything drawn for an entity is
//! keyed by that entity's tag so it can be erased as a unit.

use crate::layout::geometry::{PlacedComponent, Point, WorkspaceBounds};
use serde::Serialize;

pub trait Canvas {
    fn draw_component(&mut self, component: &PlacedComponent);
    fn draw_segment(&mut self, from: Point, to: Point, tunnel: bool, tag: &str);
    /// Remove everything drawn under `tag`
    fn erase(&mut self, tag: &str);
    fn draw_workspace(&mut self, bounds: &WorkspaceBounds);
}

/// Canvas that ignores every call
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn draw_component(&mut self, _component: &PlacedComponent) {}
    fn draw_segment(&mut self, _from: Point, _to: Point, _tunnel: bool, _tag: &str) {}
    fn erase(&mut self, _tag: &str) {}
    fn draw_workspace(&mut self, _bounds: &WorkspaceBounds) {}
}

/// One drawing instruction, serializable for the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawEvent {
    Component {
        tag: String,
        component: String,
        center: Point,
        rotation_degrees: u16,
        pins: Vec<Point>,
        outline: [Point; 4],
    },
    Segment {
        tag: String,
        from: Point,
        to: Point,
        tunnel: bool,
    },
    Erase {
        tag: String,
    },
    Workspace {
        x: [f64; 2],
        y: [f64; 2],
    },
}

/// Canvas that queues events for a front end to drain
#[derive(Debug, Default, Clone)]
pub struct EventCanvas {
    events: Vec<DrawEvent>,
}

impl EventCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Canvas for EventCanvas {
    fn draw_component(&mut self, component: &PlacedComponent) {
        self.events.push(DrawEvent::Component {
            tag: component.tag.clone(),
            component: component.component.clone(),
            center: component.center,
            rotation_degrees: component.rotation.degrees(),
            pins: component.pins.clone(),
            outline: component.perimeter.corners(),
        });
    }

    fn draw_segment(&mut self, from: Point, to: Point, tunnel: bool, tag: &str) {
        self.events.push(DrawEvent::Segment {
            tag: tag.to_string(),
            from,
            to,
            tunnel,
        });
    }

    fn erase(&mut self, tag: &str) {
        self.events.push(DrawEvent::Erase { tag: tag.to_string() });
    }

    fn draw_workspace(&mut self, bounds: &WorkspaceBounds) {
        self.events.push(DrawEvent::Workspace { x: bounds.x, y: bounds.y });
    }
}
