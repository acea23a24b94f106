//! Deletion resolver: which entity does a pick point refer to?
//!
//! Components are tried first, by center distance, then trace records by
//! distance to points resampled along each segment. Both scans run in
//! table order and stop at the first qualifying row; this is an early-exit
//! scan, not a global nearest search.

use crate::layout::config::LayoutConfig;
use crate::layout::geometry::{PlacedComponent, Point, TraceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionTarget {
    /// Row index into the component table
    Component(usize),
    /// Row index into the trace table
    Trace(usize),
}

pub fn resolve(
    components: &[PlacedComponent],
    traces: &[TraceRecord],
    query: Point,
    config: &LayoutConfig,
) -> Option<DeletionTarget> {
    if let Some(row) = find_component(components, query, config.component_pick_radius) {
        return Some(DeletionTarget::Component(row));
    }
    find_trace(traces, query, config.trace_pick_radius, config.trace_pick_samples)
        .map(DeletionTarget::Trace)
}

/// First component whose center lies strictly within `radius` of `query`
pub fn find_component(components: &[PlacedComponent], query: Point, radius: f64) -> Option<usize> {
    components
        .iter()
        .position(|c| c.center.distance(&query) < radius)
}

/// First trace with a resampled segment point strictly within `radius`
pub fn find_trace(traces: &[TraceRecord], query: Point, radius: f64, samples: usize) -> Option<usize> {
    traces.iter().position(|trace| {
        trace.segments().any(|(from, to)| {
            segment_samples(from, to, samples).any(|p| p.distance(&query) < radius)
        })
    })
}

/// `n` points spaced evenly along `from -> to`, excluding `from` and
/// ending on `to`. Zero-length segments yield nothing.
pub fn segment_samples(from: Point, to: Point, n: usize) -> impl Iterator<Item = Point> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    let count = if length == 0.0 { 0 } else { n };

    let (sin, cos) = dy.atan2(dx).sin_cos();
    let step = if n == 0 { 0.0 } else { length / n as f64 };
    (1..=count).map(move |k| {
        let run = step * k as f64;
        Point::new(from.x + run * cos, from.y + run * sin)
    })
}
