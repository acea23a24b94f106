//! Error types for layout operations

use crate::persist::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown component type '{0}'")]
    UnknownComponentType(String),

    #[error("nothing selected: the vertex buffer is empty")]
    EmptySelection,

    #[error("no placed component to rotate")]
    NothingToRotate,

    #[error("component library: {0}")]
    Catalog(String),

    #[error("failed to load design table '{table}': {source}")]
    Load {
        table: &'static str,
        #[source]
        source: Box<LayoutError>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LayoutError {
    pub fn load(table: &'static str, source: impl Into<LayoutError>) -> Self {
        LayoutError::Load {
            table,
            source: Box::new(source.into()),
        }
    }

    /// Short machine-readable kind, used by the server's error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutError::UnknownComponentType(_) => "unknown_component_type",
            LayoutError::EmptySelection => "empty_selection",
            LayoutError::NothingToRotate => "nothing_to_rotate",
            LayoutError::Catalog(_) => "catalog",
            LayoutError::Load { .. } => "load",
            LayoutError::Store(_) => "store",
        }
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;
