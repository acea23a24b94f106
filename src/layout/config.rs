//! Layout engine configuration
//!
//! Defaults match the stock workspace; a JSON file may override any subset.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Vertical offset applied to every USB pin after rotation. Specific to the
/// stock USB footprint.
pub const USB_PIN_OFFSET_Y: f64 = -1.0;

/// Component type that receives [`USB_PIN_OFFSET_Y`]
pub const USB_COMPONENT: &str = "USB";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Display scale applied to every catalog dimension
    pub scale: f64,
    pub perimeter_samples: usize,
    pub snap_radius: f64,
    pub component_pick_radius: f64,
    pub trace_pick_radius: f64,
    pub trace_pick_samples: usize,
    pub workspace_origin: [f64; 2],
    /// Workspace extent in unscaled units
    pub workspace_size: [f64; 2],
    pub catalog_path: PathBuf,
    pub designs_root: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: 5.0,
            perimeter_samples: 20,
            snap_radius: 3.0,
            component_pick_radius: 10.0,
            trace_pick_radius: 7.0,
            trace_pick_samples: 40,
            workspace_origin: [2.0, 2.0],
            workspace_size: [35.0, 50.0],
            catalog_path: PathBuf::from("Pick_and_place_components_with_pads.csv"),
            designs_root: PathBuf::from("."),
        }
    }
}

impl LayoutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: LayoutConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        anyhow::ensure!(config.scale > 0.0, "scale must be positive, got {}", config.scale);
        anyhow::ensure!(config.perimeter_samples >= 2, "perimeter_samples must be at least 2");
        anyhow::ensure!(config.trace_pick_samples >= 1, "trace_pick_samples must be at least 1");
        Ok(config)
    }

    /// Workspace corners in scaled coordinates
    pub fn workspace_bounds(&self) -> crate::layout::geometry::WorkspaceBounds {
        let [ox, oy] = self.workspace_origin;
        crate::layout::geometry::WorkspaceBounds {
            x: [ox, ox + self.workspace_size[0] * self.scale],
            y: [oy, oy + self.workspace_size[1] * self.scale],
        }
    }
}
