//! Server state: the layout session plus the canvas its events queue on

use crate::layout::{ComponentCatalog, EventCanvas, LayoutConfig, LayoutSession};

pub struct ServerState {
    pub session: LayoutSession,
    /// Draw events emitted by the current request, drained into its response
    pub canvas: EventCanvas,
}

impl ServerState {
    pub fn new(config: LayoutConfig, catalog: ComponentCatalog) -> Self {
        Self {
            session: LayoutSession::new(config, catalog),
            canvas: EventCanvas::new(),
        }
    }

    /// Check if a design is open
    pub fn is_design_open(&self) -> bool {
        self.session.has_design()
    }
}
