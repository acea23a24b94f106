//! In-memory design store

use super::records::{ComponentRecord, PinRecord, Table, TraceRow, WorkspaceRecord};
use super::{DesignStore, StoreError};

/// Holds every table in memory. Fields are public so tests can seed or
/// inspect rows directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryDesignStore {
    pub name: String,
    pub components: Vec<ComponentRecord>,
    pub pins: Vec<PinRecord>,
    pub traces: Vec<TraceRow>,
    pub workspace: Option<WorkspaceRecord>,
}

impl MemoryDesignStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl DesignStore for MemoryDesignStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, workspace: &WorkspaceRecord) -> Result<(), StoreError> {
        self.workspace = Some(workspace.clone());
        self.components.clear();
        self.pins.clear();
        self.traces.clear();
        Ok(())
    }

    fn read_components(&self) -> Result<Vec<ComponentRecord>, StoreError> {
        Ok(self.components.clone())
    }

    fn write_components(&mut self, rows: &[ComponentRecord]) -> Result<(), StoreError> {
        self.components = rows.to_vec();
        Ok(())
    }

    fn read_pins(&self) -> Result<Vec<PinRecord>, StoreError> {
        Ok(self.pins.clone())
    }

    fn write_pins(&mut self, rows: &[PinRecord]) -> Result<(), StoreError> {
        self.pins = rows.to_vec();
        Ok(())
    }

    fn read_traces(&self) -> Result<Vec<TraceRow>, StoreError> {
        Ok(self.traces.clone())
    }

    fn write_traces(&mut self, rows: &[TraceRow]) -> Result<(), StoreError> {
        self.traces = rows.to_vec();
        Ok(())
    }

    fn read_workspace(&self) -> Result<WorkspaceRecord, StoreError> {
        self.workspace.clone().ok_or(StoreError::Malformed {
            table: Table::Workspace.label(),
            message: "no bounds row".to_string(),
        })
    }
}
