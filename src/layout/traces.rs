//! Trace recorder: polyline sessions under one line tag
//!
//! A session collects vertices until `save`. Every vertex after the first
//! in an unbroken chain produces a drawn segment carrying the tunnel flag
//! as it stands at that moment. The saved record carries a single flag,
//! the one in force at save time, so toggling mid-session leaves drawn
//! segments and the saved record disagreeing.

use crate::layout::geometry::{Point, TraceRecord, TraceSegment};
use crate::layout::tags::TagRegistry;

#[derive(Debug, Default, Clone)]
pub struct TraceRecorder {
    vertices: Vec<Point>,
    /// Whether the next vertex connects to the previous one
    chain_open: bool,
    /// Line tag of the open session, allocated with its first segment
    tag: Option<String>,
    tunnel: bool,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex; returns the segment it closes, if any
    pub fn record_point(&mut self, point: Point, tags: &mut TagRegistry) -> Option<TraceSegment> {
        let prior = if self.chain_open { self.vertices.last().copied() } else { None };
        self.vertices.push(point);
        self.chain_open = true;

        let from = prior?;
        let tag = self.session_tag(tags);
        Some(TraceSegment {
            from,
            to: point,
            tunnel: self.tunnel,
            tag,
        })
    }

    /// The record `save` would produce, without ending the session
    pub fn pending(&mut self, tags: &mut TagRegistry) -> Option<TraceRecord> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(TraceRecord {
            tunnel: self.tunnel,
            vertices: self.vertices.clone(),
            tag: self.session_tag(tags),
        })
    }

    /// Flush the open session as one record and start a fresh one.
    /// An empty session produces nothing.
    pub fn save(&mut self, tags: &mut TagRegistry) -> Option<TraceRecord> {
        self.chain_open = false;
        if self.vertices.is_empty() {
            self.tag = None;
            return None;
        }

        let tag = self.session_tag(tags);
        self.tag = None;
        Some(TraceRecord {
            tunnel: self.tunnel,
            vertices: std::mem::take(&mut self.vertices),
            tag,
        })
    }

    /// Replay a saved record through the recorder with its own tag and
    /// flag. Recorded coordinates are taken as-is. The toggle state in force
    /// before the replay is restored afterwards.
    pub fn replay(&mut self, record: &TraceRecord, tags: &mut TagRegistry) -> (Vec<TraceSegment>, TraceRecord) {
        let saved_tunnel = self.tunnel;
        self.break_chain();
        self.vertices.clear();
        self.tunnel = record.tunnel;
        tags.register_line(&record.tag);
        self.tag = Some(record.tag.clone());

        let segments = record
            .vertices
            .iter()
            .filter_map(|&v| self.record_point(v, tags))
            .collect();
        let replayed = self.save(tags).unwrap_or_else(|| TraceRecord {
            tunnel: record.tunnel,
            vertices: Vec::new(),
            tag: record.tag.clone(),
        });

        self.tunnel = saved_tunnel;
        (segments, replayed)
    }

    /// Stop the next vertex from connecting to the last one
    pub fn break_chain(&mut self) {
        self.chain_open = false;
    }

    /// Drop the newest buffered vertex
    pub fn discard_last(&mut self) -> Option<Point> {
        self.vertices.pop()
    }

    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    pub fn toggle_tunnel(&mut self) -> bool {
        self.tunnel = !self.tunnel;
        self.tunnel
    }

    pub fn tunnel(&self) -> bool {
        self.tunnel
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn open_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn session_tag(&mut self, tags: &mut TagRegistry) -> String {
        self.tag.get_or_insert_with(|| tags.allocate_line()).clone()
    }
}
