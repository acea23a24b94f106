//! Layout session: the one owner of all mutable design state
//!
//! Every user command lands here and runs to completion before the next.
//! Each mutating command writes the affected tables first and commits to
//! memory only once the write succeeded, so a failed write leaves the
//! session as it was.
//!
//! Front ends forward every workspace click through [`LayoutSession::click`],
//! including the click that lands on a Tunnel, Rotate or Delete control.
//! Those commands therefore start by dropping the newest buffered vertex.

use crate::layout::canvas::Canvas;
use crate::layout::catalog::ComponentCatalog;
use crate::layout::config::LayoutConfig;
use crate::layout::deletion::{self, DeletionTarget};
use crate::layout::error::{LayoutError, LayoutResult};
use crate::layout::geometry::{PinIndex, PinPoint, PlacedComponent, Point, Rotation, TraceRecord, WorkspaceBounds};
use crate::layout::placement;
use crate::layout::tags::TagRegistry;
use crate::layout::traces::TraceRecorder;
use crate::persist::{ComponentRecord, DesignStore, PinRecord, StoreError, Table, TraceRow, WorkspaceRecord};
use serde::Serialize;

/// What a workspace click did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The armed component was placed under `tag`
    Placed { tag: String, center: Point },
    /// A trace vertex was buffered
    Vertex {
        point: Point,
        /// Tag of the component whose pin the vertex snapped to
        snapped_to: Option<String>,
        /// Line tag of the segment this vertex closed
        segment: Option<String>,
    },
}

/// Entity removed by a delete command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deleted {
    Component { tag: String, pins_removed: usize },
    Trace { tag: String },
}

/// Everything that is rebuilt when a design is opened
#[derive(Debug, Default)]
struct DesignState {
    components: Vec<PlacedComponent>,
    traces: Vec<TraceRecord>,
    connections: Vec<PinRecord>,
    pins: PinIndex,
    tags: TagRegistry,
    recorder: TraceRecorder,
    /// Handle to the most recently placed component, by tag
    last_placed: Option<String>,
    /// Component type of the last rotation, for accumulating quarter turns
    last_rotated: Option<String>,
}

pub struct LayoutSession {
    config: LayoutConfig,
    catalog: ComponentCatalog,
    store: Option<Box<dyn DesignStore>>,
    workspace: Option<WorkspaceBounds>,
    state: DesignState,
    selected: Option<String>,
    armed: bool,
}

impl LayoutSession {
    pub fn new(config: LayoutConfig, catalog: ComponentCatalog) -> Self {
        Self {
            config,
            catalog,
            store: None,
            workspace: None,
            state: DesignState::default(),
            selected: None,
            armed: false,
        }
    }

    // ---- Design lifecycle ----

    /// Start a new design in `store` with the configured workspace bounds
    pub fn create_design<S>(&mut self, mut store: S, canvas: &mut dyn Canvas) -> LayoutResult<()>
    where
        S: DesignStore + 'static,
    {
        let bounds = self.config.workspace_bounds();
        store.initialize(&WorkspaceRecord::from(&bounds))?;
        log::info!("Created design '{}'", store.name());

        self.erase_all(canvas);
        self.state = DesignState::default();
        self.reset_selection();
        self.store = Some(Box::new(store));
        self.workspace = Some(bounds);
        canvas.draw_workspace(&bounds);
        Ok(())
    }

    /// Rebuild a saved design by replaying its tables through the placement
    /// engine and trace recorder. Nothing is committed unless every table
    /// reads and replays cleanly.
    pub fn open_design<S>(&mut self, store: S, canvas: &mut dyn Canvas) -> LayoutResult<()>
    where
        S: DesignStore + 'static,
    {
        let load = |table: Table| move |e: StoreError| LayoutError::load(table.label(), e);

        let workspace_row = store.read_workspace().map_err(load(Table::Workspace))?;
        let bounds = WorkspaceBounds::try_from(&workspace_row).map_err(load(Table::Workspace))?;
        let component_rows = store.read_components().map_err(load(Table::Components))?;
        let connection_rows = store.read_pins().map_err(load(Table::Pins))?;
        let trace_rows = store.read_traces().map_err(load(Table::Traces))?;

        let mut fresh = DesignState::default();
        for row in &component_rows {
            let def = self
                .catalog
                .lookup(&row.component)
                .map_err(|e| LayoutError::load(Table::Components.label(), e))?;
            let rotation = Rotation::from_degrees(row.orientation);
            let placed = placement::place(def, &self.config, row.center(), rotation, row.tag.clone());
            fresh.tags.register_component(&row.tag);
            fresh.pins.insert_all(placed.pin_points());
            fresh.last_placed = Some(row.tag.clone());
            fresh.components.push(placed);
        }

        let mut segments = Vec::new();
        for row in trace_rows {
            let record = TraceRecord::try_from(row).map_err(load(Table::Traces))?;
            let (drawn, replayed) = fresh.recorder.replay(&record, &mut fresh.tags);
            segments.extend(drawn);
            fresh.traces.push(replayed);
        }
        fresh.tags.set_line_counter(fresh.traces.len() as u64);
        fresh.connections = connection_rows;

        log::info!(
            "Loaded design '{}': {} components, {} pins, {} traces, {} connections",
            store.name(),
            fresh.components.len(),
            fresh.pins.len(),
            fresh.traces.len(),
            fresh.connections.len()
        );

        self.erase_all(canvas);
        self.state = fresh;
        self.reset_selection();
        self.store = Some(Box::new(store));
        self.workspace = Some(bounds);

        canvas.draw_workspace(&bounds);
        for component in &self.state.components {
            canvas.draw_component(component);
        }
        for segment in &segments {
            canvas.draw_segment(segment.from, segment.to, segment.tunnel, &segment.tag);
        }
        Ok(())
    }

    pub fn close_design(&mut self, canvas: &mut dyn Canvas) {
        if let Some(store) = &self.store {
            log::info!("Closed design '{}'", store.name());
        }
        self.erase_all(canvas);
        self.state = DesignState::default();
        self.reset_selection();
        self.store = None;
        self.workspace = None;
    }

    // ---- Commands ----

    /// Arm placement of `component` on the next click
    pub fn select_component(&mut self, component: &str) -> LayoutResult<()> {
        self.catalog.lookup(component)?;
        self.selected = Some(component.to_string());
        self.armed = true;
        self.state.recorder.break_chain();
        self.state.last_rotated = None;
        log::debug!("Selected component type '{}'", component);
        Ok(())
    }

    /// Place the armed component at `point`, or buffer a trace vertex
    pub fn click(&mut self, point: Point, canvas: &mut dyn Canvas) -> LayoutResult<ClickOutcome> {
        match self.selected.clone() {
            Some(component) if self.armed => self.place_selected(&component, point, canvas),
            _ => self.record_vertex(point, canvas),
        }
    }

    /// Flip the tunnel flag; returns the new state
    pub fn toggle_tunnel(&mut self) -> bool {
        self.absorb_control_click();
        let tunnel = self.state.recorder.toggle_tunnel();
        log::debug!("Tunnel mode {}", if tunnel { "on" } else { "off" });
        tunnel
    }

    /// Turn the most recently placed component a further quarter turn.
    ///
    /// Rotations accumulate only while the selection keeps the type of the
    /// previous rotation; otherwise the component goes to 90 degrees.
    pub fn rotate(&mut self, canvas: &mut dyn Canvas) -> LayoutResult<String> {
        self.absorb_control_click();

        let handle = self.state.last_placed.clone().ok_or(LayoutError::NothingToRotate)?;
        let row = self
            .state
            .components
            .iter()
            .position(|c| c.tag == handle)
            .ok_or(LayoutError::NothingToRotate)?;

        let old = &self.state.components[row];
        let accumulate = self.state.last_rotated.is_some() && self.state.last_rotated == self.selected;
        let rotation = if accumulate { old.rotation.quarter_turn() } else { Rotation::QUARTER };
        let def = self.catalog.lookup(&old.component)?;
        let center = old.center;
        let component = old.component.clone();

        self.state.tags.release_component(&handle);
        let matches = self
            .state
            .components
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != row && c.component == component && c.rotation == rotation)
            .count();
        let tag = self.state.tags.allocate_component(&component, rotation, matches);
        let rotated = placement::place(def, &self.config, center, rotation, tag.clone());

        let mut rows = component_rows(&self.state.components);
        rows[row] = ComponentRecord::from_placed(&rotated);
        if let Err(e) = self.persist(|store| store.write_components(&rows)) {
            self.state.tags.release_component(&tag);
            self.state.tags.register_component(&handle);
            return Err(e);
        }

        self.state.pins.remove_tag(&handle);
        canvas.erase(&handle);
        self.state.pins.insert_all(rotated.pin_points());
        canvas.draw_component(&rotated);
        self.state.components[row] = rotated;
        self.state.last_placed = Some(tag.clone());
        self.state.last_rotated = Some(component);

        log::info!("Rotated {} to {} degrees as {}", handle, rotation.degrees(), tag);
        Ok(tag)
    }

    /// Persist the open trace session as one record. An empty session is
    /// not an error and writes nothing.
    pub fn save(&mut self) -> LayoutResult<Option<String>> {
        let Some(record) = self.state.recorder.pending(&mut self.state.tags) else {
            self.state.recorder.break_chain();
            log::warn!("Save with an empty trace session; nothing written");
            return Ok(None);
        };

        let mut rows = trace_rows(&self.state.traces);
        rows.push(TraceRow::from(&record));
        self.persist(|store| store.write_traces(&rows))?;

        self.state.recorder.save(&mut self.state.tags);
        log::info!("Saved trace {} with {} vertices", record.tag, record.vertices.len());
        let tag = record.tag.clone();
        self.state.traces.push(record);
        Ok(Some(tag))
    }

    /// Delete whatever the last buffered vertex picks: a component first,
    /// else a trace. `Ok(None)` means nothing was in range.
    pub fn delete(&mut self, canvas: &mut dyn Canvas) -> LayoutResult<Option<Deleted>> {
        self.absorb_control_click();
        let query = self.state.recorder.last().ok_or(LayoutError::EmptySelection)?;

        let target = deletion::resolve(&self.state.components, &self.state.traces, query, &self.config);
        let deleted = match target {
            Some(DeletionTarget::Component(row)) => Some(self.delete_component(row, canvas)?),
            Some(DeletionTarget::Trace(row)) => Some(self.delete_trace(row, canvas)?),
            None => {
                log::debug!("Nothing to delete near ({:.2}, {:.2})", query.x, query.y);
                None
            }
        };

        // The pick vertex is not part of any trace
        self.state.recorder.discard_last();
        Ok(deleted)
    }

    // ---- Queries ----

    /// Nearest live pin within the snap radius
    pub fn pin_at(&self, point: Point) -> Option<&PinPoint> {
        self.state.pins.nearest(point, self.config.snap_radius)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    pub fn store(&self) -> Option<&dyn DesignStore> {
        self.store.as_deref()
    }

    pub fn has_design(&self) -> bool {
        self.store.is_some()
    }

    pub fn design_name(&self) -> Option<&str> {
        self.store.as_ref().map(|s| s.name())
    }

    pub fn workspace(&self) -> Option<&WorkspaceBounds> {
        self.workspace.as_ref()
    }

    pub fn components(&self) -> &[PlacedComponent] {
        &self.state.components
    }

    pub fn traces(&self) -> &[TraceRecord] {
        &self.state.traces
    }

    pub fn connections(&self) -> &[PinRecord] {
        &self.state.connections
    }

    pub fn pins(&self) -> &PinIndex {
        &self.state.pins
    }

    pub fn pending_vertices(&self) -> &[Point] {
        self.state.recorder.vertices()
    }

    pub fn tunnel(&self) -> bool {
        self.state.recorder.tunnel()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn last_placed(&self) -> Option<&str> {
        self.state.last_placed.as_deref()
    }

    // ---- Internals ----

    fn place_selected(&mut self, component: &str, point: Point, canvas: &mut dyn Canvas) -> LayoutResult<ClickOutcome> {
        let def = self.catalog.lookup(component)?;
        let center = self
            .state
            .pins
            .nearest(point, self.config.snap_radius)
            .map_or(point, |pin| pin.position);

        let rotation = Rotation::ZERO;
        let matches = self
            .state
            .components
            .iter()
            .filter(|c| c.component == component && c.rotation == rotation)
            .count();
        let tag = self.state.tags.allocate_component(component, rotation, matches);
        let placed = placement::place(def, &self.config, center, rotation, tag.clone());

        let mut rows = component_rows(&self.state.components);
        rows.push(ComponentRecord::from_placed(&placed));
        if let Err(e) = self.persist(|store| store.write_components(&rows)) {
            self.state.tags.release_component(&tag);
            return Err(e);
        }

        self.state.pins.insert_all(placed.pin_points());
        canvas.draw_component(&placed);
        self.state.components.push(placed);
        self.state.last_placed = Some(tag.clone());
        self.state.recorder.break_chain();
        self.armed = false;

        log::info!("Placed {} at ({:.2}, {:.2})", tag, center.x, center.y);
        Ok(ClickOutcome::Placed { tag, center })
    }

    fn record_vertex(&mut self, point: Point, canvas: &mut dyn Canvas) -> LayoutResult<ClickOutcome> {
        let snapped = self
            .state
            .pins
            .nearest(point, self.config.snap_radius)
            .map(PinRecord::from);

        let point = match &snapped {
            Some(connection) => {
                let mut rows = self.state.connections.clone();
                rows.push(connection.clone());
                self.persist(|store| store.write_pins(&rows))?;
                self.state.connections.push(connection.clone());
                Point::new(connection.x, connection.y)
            }
            None => point,
        };

        let segment = self.state.recorder.record_point(point, &mut self.state.tags);
        if let Some(segment) = &segment {
            canvas.draw_segment(segment.from, segment.to, segment.tunnel, &segment.tag);
        }
        log::debug!(
            "Vertex ({:.2}, {:.2}){}",
            point.x,
            point.y,
            snapped.as_ref().map(|c| format!(" snapped to {}", c.tag)).unwrap_or_default()
        );

        Ok(ClickOutcome::Vertex {
            point,
            snapped_to: snapped.map(|c| c.tag),
            segment: segment.map(|s| s.tag),
        })
    }

    fn delete_component(&mut self, row: usize, canvas: &mut dyn Canvas) -> LayoutResult<Deleted> {
        let tag = self.state.components[row].tag.clone();

        let mut rows = component_rows(&self.state.components);
        rows.remove(row);
        let connections: Vec<PinRecord> = self
            .state
            .connections
            .iter()
            .filter(|c| c.tag != tag)
            .cloned()
            .collect();
        self.persist(|store| {
            store.write_components(&rows)?;
            store.write_pins(&connections)
        })?;

        self.state.components.remove(row);
        let pins_removed = self.state.pins.remove_tag(&tag).len();
        self.state.tags.release_component(&tag);
        self.state.connections = connections;
        if self.state.last_placed.as_deref() == Some(tag.as_str()) {
            self.state.last_placed = None;
        }
        canvas.erase(&tag);

        log::info!("Deleted component {} and {} pins", tag, pins_removed);
        Ok(Deleted::Component { tag, pins_removed })
    }

    fn delete_trace(&mut self, row: usize, canvas: &mut dyn Canvas) -> LayoutResult<Deleted> {
        let tag = self.state.traces[row].tag.clone();

        let mut rows = trace_rows(&self.state.traces);
        rows.remove(row);
        self.persist(|store| store.write_traces(&rows))?;

        self.state.traces.remove(row);
        self.state.tags.release_line(&tag);
        canvas.erase(&tag);

        log::info!("Deleted trace {}", tag);
        Ok(Deleted::Trace { tag })
    }

    /// The click that pressed a control is not a trace vertex
    fn absorb_control_click(&mut self) {
        self.state.recorder.break_chain();
        self.state.recorder.discard_last();
    }

    fn reset_selection(&mut self) {
        self.selected = None;
        self.armed = false;
    }

    fn erase_all(&self, canvas: &mut dyn Canvas) {
        for component in &self.state.components {
            canvas.erase(&component.tag);
        }
        for trace in &self.state.traces {
            canvas.erase(&trace.tag);
        }
        if let Some(tag) = self.state.recorder.open_tag() {
            canvas.erase(tag);
        }
    }

    fn persist<F>(&mut self, write: F) -> LayoutResult<()>
    where
        F: FnOnce(&mut dyn DesignStore) -> Result<(), StoreError>,
    {
        if let Some(store) = self.store.as_mut() {
            write(store.as_mut())?;
        }
        Ok(())
    }
}

fn component_rows(components: &[PlacedComponent]) -> Vec<ComponentRecord> {
    components.iter().map(ComponentRecord::from_placed).collect()
}

fn trace_rows(traces: &[TraceRecord]) -> Vec<TraceRow> {
    traces.iter().map(TraceRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::{DrawEvent, EventCanvas, NullCanvas};
    use crate::layout::catalog::ComponentDefinition;
    use crate::persist::MemoryDesignStore;

    fn catalog() -> ComponentCatalog {
        ComponentCatalog::from_definitions(vec![
            ComponentDefinition {
                name: "Via".to_string(),
                width: 1.0,
                length: 1.0,
                lead_length: 0.0,
                pin_offsets: vec![Point::new(0.0, 0.0)],
            },
            ComponentDefinition {
                name: "R10k".to_string(),
                width: 4.0,
                length: 2.0,
                lead_length: 0.5,
                pin_offsets: vec![Point::new(-2.0, 0.0), Point::new(2.0, 0.0)],
            },
        ])
    }

    fn session() -> LayoutSession {
        let mut session = LayoutSession::new(LayoutConfig::default(), catalog());
        session
            .create_design(MemoryDesignStore::new("test"), &mut NullCanvas)
            .unwrap();
        session
    }

    fn place(session: &mut LayoutSession, component: &str, x: f64, y: f64) -> String {
        session.select_component(component).unwrap();
        match session.click(Point::new(x, y), &mut NullCanvas).unwrap() {
            ClickOutcome::Placed { tag, .. } => tag,
            other => panic!("expected placement, got {:?}", other),
        }
    }

    fn stored_components(session: &LayoutSession) -> Vec<ComponentRecord> {
        session.store().unwrap().read_components().unwrap()
    }

    #[test]
    fn test_unknown_component_is_rejected() {
        let mut session = session();
        let err = session.select_component("Capacitor").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownComponentType(_)));
        assert!(!session.is_armed());
    }

    #[test]
    fn test_placement_disarms_and_persists() {
        let mut session = session();
        let tag = place(&mut session, "Via", 100.0, 100.0);
        assert_eq!(tag, "Via_0_0");
        assert!(!session.is_armed());
        assert_eq!(session.pins().len(), 1);
        assert_eq!(stored_components(&session)[0].tag, "Via_0_0");

        // Next click is a trace vertex, not another placement
        let outcome = session.click(Point::new(150.0, 150.0), &mut NullCanvas).unwrap();
        assert!(matches!(outcome, ClickOutcome::Vertex { .. }));
        assert_eq!(session.components().len(), 1);
    }

    #[test]
    fn test_trace_vertex_snaps_and_logs_connection() {
        let mut session = session();
        place(&mut session, "Via", 100.0, 100.0);

        let outcome = session.click(Point::new(101.5, 101.0), &mut NullCanvas).unwrap();
        assert_eq!(
            outcome,
            ClickOutcome::Vertex {
                point: Point::new(100.0, 100.0),
                snapped_to: Some("Via_0_0".to_string()),
                segment: None,
            }
        );
        assert_eq!(session.connections().len(), 1);
        assert_eq!(session.store().unwrap().read_pins().unwrap().len(), 1);

        // Exactly at the radius does not snap
        let far = session.click(Point::new(103.0, 100.0), &mut NullCanvas).unwrap();
        assert!(matches!(far, ClickOutcome::Vertex { snapped_to: None, .. }));
    }

    #[test]
    fn test_rotate_replaces_handle_and_accumulates() {
        let mut session = session();
        place(&mut session, "R10k", 100.0, 100.0);
        let mut canvas = EventCanvas::new();

        let first = session.rotate(&mut canvas).unwrap();
        assert_eq!(first, "R10k_0_90");
        assert_eq!(session.components().len(), 1);
        assert_eq!(session.pins().len(), 2);
        assert!(session.pins().pins_for_tag("R10k_0_0").is_empty());
        assert_eq!(
            canvas.events()[0],
            DrawEvent::Erase { tag: "R10k_0_0".to_string() }
        );

        let second = session.rotate(&mut NullCanvas).unwrap();
        assert_eq!(second, "R10k_0_180");
        assert_eq!(stored_components(&session)[0].orientation, 180);
    }

    #[test]
    fn test_rotate_without_placement_fails() {
        let mut session = session();
        assert!(matches!(session.rotate(&mut NullCanvas), Err(LayoutError::NothingToRotate)));
    }

    #[test]
    fn test_save_flushes_session() {
        let mut session = session();
        session.click(Point::new(10.0, 10.0), &mut NullCanvas).unwrap();
        session.click(Point::new(50.0, 10.0), &mut NullCanvas).unwrap();
        assert_eq!(session.save().unwrap().as_deref(), Some("line_1"));
        assert!(session.pending_vertices().is_empty());
        assert_eq!(session.traces()[0].vertices.len(), 2);
        assert_eq!(session.store().unwrap().read_traces().unwrap().len(), 1);

        assert_eq!(session.save().unwrap(), None);
    }

    #[test]
    fn test_delete_requires_a_pick() {
        let mut session = session();
        // Only the control click itself is buffered
        session.click(Point::new(300.0, 10.0), &mut NullCanvas).unwrap();
        assert!(matches!(session.delete(&mut NullCanvas), Err(LayoutError::EmptySelection)));
    }

    #[test]
    fn test_delete_component_cascades_pins_and_connections() {
        let mut session = session();
        place(&mut session, "R10k", 100.0, 100.0);
        place(&mut session, "Via", 50.0, 50.0);
        session.click(Point::new(92.5, 100.0), &mut NullCanvas).unwrap();
        session.click(Point::new(50.0, 50.0), &mut NullCanvas).unwrap();
        session.save().unwrap();
        assert_eq!(session.connections().len(), 2);

        // Pick, then the Delete control click
        session.click(Point::new(101.0, 101.0), &mut NullCanvas).unwrap();
        session.click(Point::new(300.0, 10.0), &mut NullCanvas).unwrap();
        let deleted = session.delete(&mut NullCanvas).unwrap();

        assert_eq!(
            deleted,
            Some(Deleted::Component { tag: "R10k_0_0".to_string(), pins_removed: 2 })
        );
        assert_eq!(session.pins().len(), 1);
        assert_eq!(session.traces().len(), 1);
        assert_eq!(session.connections().len(), 1);
        assert_eq!(session.connections()[0].tag, "Via_0_0");
        assert_eq!(session.last_placed(), Some("Via_0_0"));
        assert!(session.pending_vertices().is_empty());
    }

    #[test]
    fn test_delete_trace_when_no_component_in_range() {
        let mut session = session();
        session.click(Point::new(10.0, 10.0), &mut NullCanvas).unwrap();
        session.click(Point::new(10.0, 90.0), &mut NullCanvas).unwrap();
        session.save().unwrap();

        session.click(Point::new(13.0, 50.0), &mut NullCanvas).unwrap();
        session.click(Point::new(300.0, 10.0), &mut NullCanvas).unwrap();
        let deleted = session.delete(&mut NullCanvas).unwrap();
        assert_eq!(deleted, Some(Deleted::Trace { tag: "line_1".to_string() }));
        assert!(session.traces().is_empty());
        assert!(session.store().unwrap().read_traces().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_tunnel_drops_control_click() {
        let mut session = session();
        session.click(Point::new(10.0, 10.0), &mut NullCanvas).unwrap();
        session.click(Point::new(300.0, 10.0), &mut NullCanvas).unwrap();
        assert!(session.toggle_tunnel());
        assert_eq!(session.pending_vertices(), &[Point::new(10.0, 10.0)]);

        // Chain was broken, so this vertex draws nothing
        let outcome = session.click(Point::new(20.0, 10.0), &mut NullCanvas).unwrap();
        assert!(matches!(outcome, ClickOutcome::Vertex { segment: None, .. }));
    }

    #[test]
    fn test_open_replays_and_failed_open_keeps_state() {
        let mut session = session();
        place(&mut session, "Via", 100.0, 100.0);

        let mut bad = MemoryDesignStore::new("bad");
        bad.workspace = Some(WorkspaceRecord { base_x: vec![2.0, 177.0], base_y: vec![2.0, 252.0] });
        bad.components.push(ComponentRecord {
            component: "Mystery".to_string(),
            x: 1.0,
            y: 1.0,
            orientation: 0,
            perimeter_x: vec![],
            perimeter_y: vec![],
            tag: "Mystery_0_0".to_string(),
        });
        let err = session.open_design(bad, &mut NullCanvas).unwrap_err();
        assert!(matches!(err, LayoutError::Load { table: "components", .. }));
        assert_eq!(session.design_name(), Some("test"));
        assert_eq!(session.components().len(), 1);
    }
}
