//! Geometry module for the layout engine
//!
//! # Submodules
//! - `types` - Core geometric values (Point, Rotation, Perimeter, PlacedComponent, TraceRecord)
//! - `spatial` - R-tree pin index for snap and pick queries

mod types;
mod spatial;

pub use types::{
    Point,
    Rotation,
    Perimeter,
    PinPoint,
    PlacedComponent,
    TraceSegment,
    TraceRecord,
    WorkspaceBounds,
};

pub use spatial::PinIndex;
