//! Persistence adapter for layout designs
//!
//! A design is four tables: placements, pin connections, traces and the
//! workspace bounds. The layout session talks to them only through
//! [`DesignStore`], and always rewrites a table whole.
//!
//! # Submodules
//!
//! - `records` - Named-field row types and list-cell codecs
//! - `csv_store` - One CSV file per table inside a design directory
//! - `memory` - In-memory store for tests and scratch sessions

mod csv_store;
mod memory;
mod records;

pub use csv_store::CsvDesignStore;
pub use memory::MemoryDesignStore;
pub use records::{
    format_list, parse_list, ComponentRecord, PinRecord, Table, TableRow, TraceRow, WorkspaceRecord,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed {table} table: {message}")]
    Malformed { table: &'static str, message: String },

    #[error("missing table {0}")]
    MissingTable(PathBuf),
}

/// Table-level access to one design
pub trait DesignStore {
    /// Design identifier
    fn name(&self) -> &str;

    /// Create the design with the given bounds and empty tables
    fn initialize(&mut self, workspace: &WorkspaceRecord) -> Result<(), StoreError>;

    fn read_components(&self) -> Result<Vec<ComponentRecord>, StoreError>;
    fn write_components(&mut self, rows: &[ComponentRecord]) -> Result<(), StoreError>;

    fn read_pins(&self) -> Result<Vec<PinRecord>, StoreError>;
    fn write_pins(&mut self, rows: &[PinRecord]) -> Result<(), StoreError>;

    fn read_traces(&self) -> Result<Vec<TraceRow>, StoreError>;
    fn write_traces(&mut self, rows: &[TraceRow]) -> Result<(), StoreError>;

    fn read_workspace(&self) -> Result<WorkspaceRecord, StoreError>;
}
