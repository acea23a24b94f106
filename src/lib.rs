//! Circuit trace layout engine
//!
//! Places library components on a 2D workspace, records wire traces that
//! snap onto component pins, and persists each design as a directory of
//! CSV tables.
//!
//! ```ignore
//! let catalog = ComponentCatalog::from_path("Pick_and_place_components_with_pads.csv")?;
//! let mut session = LayoutSession::new(LayoutConfig::default(), catalog);
//! session.create_design(CsvDesignStore::new(".", "board"), &mut NullCanvas)?;
//! session.select_component("Via")?;
//! session.click(Point::new(100.0, 100.0), &mut NullCanvas)?;
//! ```

pub mod layout;
pub mod persist;
pub mod server;

pub use layout::{
    Canvas, ClickOutcome, ComponentCatalog, ComponentDefinition, Deleted, DrawEvent, EventCanvas,
    LayoutConfig, LayoutError, LayoutResult, LayoutSession, NullCanvas, Point, Rotation,
};
pub use persist::{CsvDesignStore, DesignStore, MemoryDesignStore, StoreError};
