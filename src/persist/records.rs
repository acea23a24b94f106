//! Named-field rows for every per-design table
//!
//! Each row type knows its table and header so stores can write a header
//! even for an empty table. List-valued cells are stored as `[a, b, c]`.

use super::StoreError;
use crate::layout::geometry::{PinPoint, PlacedComponent, Point, TraceRecord, WorkspaceBounds};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The four tables that make up a design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Components,
    Pins,
    Traces,
    Workspace,
}

impl Table {
    pub const ALL: [Table; 4] = [Table::Components, Table::Pins, Table::Traces, Table::Workspace];

    pub fn label(&self) -> &'static str {
        match self {
            Table::Components => "components",
            Table::Pins => "pins",
            Table::Traces => "traces",
            Table::Workspace => "workspace",
        }
    }

    /// File name inside the design directory for design `name`
    pub fn file_name(&self, name: &str) -> String {
        match self {
            Table::Components => format!("PP_List_Coordinates_{}.csv", name),
            Table::Pins => format!("Pins_Coordinates_{}.csv", name),
            Table::Traces => format!("Traces_Coordinates_{}.csv", name),
            Table::Workspace => format!("Base_Coordinates_{}.csv", name),
        }
    }
}

pub trait TableRow: Serialize + DeserializeOwned + Clone {
    const TABLE: Table;
    const HEADERS: &'static [&'static str];
}

/// Placement table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(rename = "Component")]
    pub component: String,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Orientation")]
    pub orientation: i64,
    #[serde(rename = "Perimeter X", with = "list_cell")]
    pub perimeter_x: Vec<f64>,
    #[serde(rename = "Perimeter Y", with = "list_cell")]
    pub perimeter_y: Vec<f64>,
    #[serde(rename = "Tag")]
    pub tag: String,
}

impl TableRow for ComponentRecord {
    const TABLE: Table = Table::Components;
    const HEADERS: &'static [&'static str] =
        &["Component", "X", "Y", "Orientation", "Perimeter X", "Perimeter Y", "Tag"];
}

impl ComponentRecord {
    pub fn from_placed(placed: &PlacedComponent) -> Self {
        let corners = placed.perimeter.corners();
        Self {
            component: placed.component.clone(),
            x: placed.center.x,
            y: placed.center.y,
            orientation: i64::from(placed.rotation.degrees()),
            perimeter_x: corners.iter().map(|p| round2(p.x)).collect(),
            perimeter_y: corners.iter().map(|p| round2(p.y)).collect(),
            tag: placed.tag.clone(),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pin connection row: a trace vertex that snapped onto a component pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Component")]
    pub component: String,
    #[serde(rename = "Tag")]
    pub tag: String,
}

impl TableRow for PinRecord {
    const TABLE: Table = Table::Pins;
    const HEADERS: &'static [&'static str] = &["X", "Y", "Component", "Tag"];
}

impl From<&PinPoint> for PinRecord {
    fn from(pin: &PinPoint) -> Self {
        Self {
            x: pin.position.x,
            y: pin.position.y,
            component: pin.component.clone(),
            tag: pin.tag.clone(),
        }
    }
}

/// Trace table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    #[serde(rename = "Tunnel", with = "flag_cell")]
    pub tunnel: bool,
    #[serde(rename = "X", with = "list_cell")]
    pub xs: Vec<f64>,
    #[serde(rename = "Y", with = "list_cell")]
    pub ys: Vec<f64>,
    #[serde(rename = "Tag")]
    pub tag: String,
}

impl TableRow for TraceRow {
    const TABLE: Table = Table::Traces;
    const HEADERS: &'static [&'static str] = &["Tunnel", "X", "Y", "Tag"];
}

impl From<&TraceRecord> for TraceRow {
    fn from(record: &TraceRecord) -> Self {
        Self {
            tunnel: record.tunnel,
            xs: record.vertices.iter().map(|p| p.x).collect(),
            ys: record.vertices.iter().map(|p| p.y).collect(),
            tag: record.tag.clone(),
        }
    }
}

impl TryFrom<TraceRow> for TraceRecord {
    type Error = StoreError;

    fn try_from(row: TraceRow) -> Result<Self, Self::Error> {
        if row.xs.len() != row.ys.len() {
            return Err(StoreError::Malformed {
                table: Table::Traces.label(),
                message: format!(
                    "trace '{}' has {} x values but {} y values",
                    row.tag, row.xs.len(), row.ys.len()
                ),
            });
        }
        Ok(TraceRecord {
            tunnel: row.tunnel,
            vertices: row.xs.into_iter().zip(row.ys).map(|(x, y)| Point::new(x, y)).collect(),
            tag: row.tag,
        })
    }
}

/// Workspace-bounds row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    #[serde(rename = "Base X", with = "list_cell")]
    pub base_x: Vec<f64>,
    #[serde(rename = "Base Y", with = "list_cell")]
    pub base_y: Vec<f64>,
}

impl TableRow for WorkspaceRecord {
    const TABLE: Table = Table::Workspace;
    const HEADERS: &'static [&'static str] = &["Base X", "Base Y"];
}

impl From<&WorkspaceBounds> for WorkspaceRecord {
    fn from(bounds: &WorkspaceBounds) -> Self {
        Self {
            base_x: bounds.x.to_vec(),
            base_y: bounds.y.to_vec(),
        }
    }
}

impl TryFrom<&WorkspaceRecord> for WorkspaceBounds {
    type Error = StoreError;

    fn try_from(record: &WorkspaceRecord) -> Result<Self, Self::Error> {
        match (record.base_x.as_slice(), record.base_y.as_slice()) {
            ([x0, x1], [y0, y1]) => Ok(WorkspaceBounds { x: [*x0, *x1], y: [*y0, *y1] }),
            _ => Err(StoreError::Malformed {
                table: Table::Workspace.label(),
                message: format!(
                    "expected two values per axis, got {} and {}",
                    record.base_x.len(),
                    record.base_y.len()
                ),
            }),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a list cell as `[a, b, c]`
pub fn format_list(values: &[f64]) -> String {
    let inner: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
    format!("[{}]", inner.join(", "))
}

/// Parse a bracketed list cell. Commas and/or whitespace separate values.
pub fn parse_list(text: &str) -> Result<Vec<f64>, String> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("list cell '{}' is not bracketed", text))?;

    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| format!("invalid number '{}' in list cell", s)))
        .collect()
}

mod list_cell {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_list(values))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_list(&text).map_err(D::Error::custom)
    }
}

mod flag_cell {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*flag))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!("tunnel flag must be 0 or 1, got {}", other))),
        }
    }
}
