//! Component library
//!
//! The library is an external CSV with one row per component type:
//! `name, width, length, <4 unused columns>, pinCount, leadLength,
//! pinX_0..pinX_{n-1}, pinY_0..pinY_{n-1}`. Rows may carry trailing empty
//! cells, so the reader is flexible about row length.

use crate::layout::error::{LayoutError, LayoutResult};
use crate::layout::geometry::Point;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

const WIDTH_COL: usize = 1;
const LENGTH_COL: usize = 2;
const PIN_COUNT_COL: usize = 7;
const LEAD_LENGTH_COL: usize = 8;
const FIRST_PIN_COL: usize = 9;

/// Immutable definition of one component type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDefinition {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub lead_length: f64,
    /// Pin offsets from the component center, unrotated and unscaled
    pub pin_offsets: Vec<Point>,
}

impl ComponentDefinition {
    pub fn pin_count(&self) -> usize {
        self.pin_offsets.len()
    }
}

/// Component definitions keyed by type name, in library order
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    definitions: IndexMap<String, ComponentDefinition>,
}

impl ComponentCatalog {
    /// Parse a component library from any CSV source
    pub fn load<R: Read>(source: R) -> LayoutResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let mut definitions = IndexMap::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| LayoutError::Catalog(e.to_string()))?;
            // Row numbers in messages count the header as line 1
            let line = row_idx + 2;

            let name = record.get(0).map(str::trim).unwrap_or_default();
            if name.is_empty() {
                continue;
            }

            let definition = parse_definition(name, &record, line)?;
            // First row wins when a library lists a name twice
            definitions.entry(name.to_string()).or_insert(definition);
        }

        log::info!("Loaded {} component definitions", definitions.len());
        Ok(Self { definitions })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> LayoutResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            LayoutError::Catalog(format!("failed to open {}: {}", path.display(), e))
        })?;
        Self::load(std::io::BufReader::new(file))
    }

    pub fn from_definitions(defs: impl IntoIterator<Item = ComponentDefinition>) -> Self {
        let mut definitions = IndexMap::new();
        for def in defs {
            definitions.entry(def.name.clone()).or_insert(def);
        }
        Self { definitions }
    }

    pub fn lookup(&self, name: &str) -> LayoutResult<&ComponentDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| LayoutError::UnknownComponentType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn parse_definition(name: &str, record: &csv::StringRecord, line: usize) -> LayoutResult<ComponentDefinition> {
    let number = |col: usize, what: &str| -> LayoutResult<f64> {
        let cell = record.get(col).map(str::trim).unwrap_or_default();
        cell.parse::<f64>().map_err(|_| {
            LayoutError::Catalog(format!(
                "line {}: '{}' has invalid {} '{}' in column {}",
                line, name, what, cell, col
            ))
        })
    };

    let width = number(WIDTH_COL, "width")?;
    let length = number(LENGTH_COL, "length")?;
    let pin_count = number(PIN_COUNT_COL, "pin count")?;
    if pin_count < 0.0 || pin_count.fract() != 0.0 {
        return Err(LayoutError::Catalog(format!(
            "line {}: '{}' has non-integer pin count {}",
            line, name, pin_count
        )));
    }
    let pin_count = pin_count as usize;
    let needed = pin_count.checked_mul(2).and_then(|n| n.checked_add(FIRST_PIN_COL));
    if needed.map_or(true, |n| n > record.len()) {
        return Err(LayoutError::Catalog(format!(
            "line {}: '{}' declares {} pins but has only {} columns",
            line,
            name,
            pin_count,
            record.len()
        )));
    }
    let lead_length = number(LEAD_LENGTH_COL, "lead length")?;

    let mut pin_offsets = Vec::with_capacity(pin_count);
    for pin in 0..pin_count {
        let x = number(FIRST_PIN_COL + pin, "pin x offset")?;
        let y = number(FIRST_PIN_COL + pin_count + pin, "pin y offset")?;
        pin_offsets.push(Point::new(x, y));
    }

    Ok(ComponentDefinition {
        name: name.to_string(),
        width,
        length,
        lead_length,
        pin_offsets,
    })
}
