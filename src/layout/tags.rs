//! Tag allocation for components and trace lines
//!
//! Tags only need to be unique among live entities. Both allocators probe
//! forward from a starting candidate against the live set and return the
//! first free one.

use crate::layout::geometry::Rotation;
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct TagRegistry {
    live_components: HashSet<String>,
    live_lines: HashSet<String>,
    line_counter: u64,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `"{component}_{ordinal}_{degrees}"`.
    ///
    /// `persisted_matches` is the number of persisted placements sharing this
    /// type and rotation; the ordinal starts there and steps past live tags.
    pub fn allocate_component(&mut self, component: &str, rotation: Rotation, persisted_matches: usize) -> String {
        let mut ordinal = persisted_matches;
        let mut tag = component_tag(component, ordinal, rotation);
        while self.live_components.contains(&tag) {
            ordinal += 1;
            tag = component_tag(component, ordinal, rotation);
        }
        self.live_components.insert(tag.clone());
        tag
    }

    /// Allocate the next free `"line_{n}"`
    pub fn allocate_line(&mut self) -> String {
        self.line_counter += 1;
        let mut tag = line_tag(self.line_counter);
        while self.live_lines.contains(&tag) {
            self.line_counter += 1;
            tag = line_tag(self.line_counter);
        }
        self.live_lines.insert(tag.clone());
        tag
    }

    /// Mark a tag read back from a saved design as live
    pub fn register_component(&mut self, tag: &str) {
        self.live_components.insert(tag.to_string());
    }

    pub fn register_line(&mut self, tag: &str) {
        self.live_lines.insert(tag.to_string());
    }

    pub fn release_component(&mut self, tag: &str) -> bool {
        self.live_components.remove(tag)
    }

    pub fn release_line(&mut self, tag: &str) -> bool {
        self.live_lines.remove(tag)
    }

    pub fn is_component_live(&self, tag: &str) -> bool {
        self.live_components.contains(tag)
    }

    pub fn is_line_live(&self, tag: &str) -> bool {
        self.live_lines.contains(tag)
    }

    /// Restart the line probe from `value`; used after a design replay
    pub fn set_line_counter(&mut self, value: u64) {
        self.line_counter = value;
    }
}

fn component_tag(component: &str, ordinal: usize, rotation: Rotation) -> String {
    format!("{}_{}_{}", component, ordinal, rotation.degrees())
}

fn line_tag(n: u64) -> String {
    format!("line_{}", n)
}
