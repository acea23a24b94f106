//! Geometric layout engine
//!
//! Places library components on a workspace, records traces between their
//! pins and resolves pick points for deletion. All mutable state lives in
//! [`LayoutSession`]; the other modules are engines it drives.
//!
//! # Submodules
//!
//! - `geometry` - Points, rotations, perimeters, placed components and the pin index
//! - `catalog` - Component library loaded from CSV
//! - `placement` - Pin transforms, perimeter sampling, border adjustment
//! - `tags` - Collision-free component and line tags
//! - `traces` - Polyline sessions and the tunnel flag
//! - `deletion` - Component/trace pick resolution
//! - `canvas` - Drawing interface the session reports changes through
//! - `session` - The context object that owns all mutable state
//! - `config` - Tunable radii, sample counts, scale and paths
//! - `error` - Error types

pub mod canvas;
pub mod catalog;
pub mod config;
pub mod deletion;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod session;
pub mod tags;
pub mod traces;

pub use canvas::{Canvas, DrawEvent, EventCanvas, NullCanvas};
pub use catalog::{ComponentCatalog, ComponentDefinition};
pub use config::LayoutConfig;
pub use error::{LayoutError, LayoutResult};
pub use geometry::{PinIndex, PinPoint, PlacedComponent, Point, Rotation, TraceRecord, WorkspaceBounds};
pub use session::{ClickOutcome, Deleted, LayoutSession};
