//! JSON-RPC protocol types for the layout server

use crate::layout::LayoutError;
use serde::{Deserialize, Serialize};

/// JSON-RPC Request format
#[derive(Debug, Deserialize)]
pub struct Request {
    pub id: Option<serde_json::Value>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC Response format
#[derive(Debug, Serialize)]
pub struct Response {
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

/// JSON-RPC Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub message: String,
    /// Machine-readable error kind for layout failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl Response {
    /// Create a success response with a JSON value
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Response {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<serde_json::Value>, code: i32, message: String) -> Self {
        Response {
            id,
            result: None,
            error: Some(ErrorResponse { code, message, kind: None }),
        }
    }

    /// Map a layout failure onto its error code
    pub fn layout_error(id: Option<serde_json::Value>, err: &LayoutError) -> Self {
        let code = match err {
            LayoutError::UnknownComponentType(_) => error_codes::UNKNOWN_COMPONENT,
            LayoutError::EmptySelection => error_codes::EMPTY_SELECTION,
            LayoutError::NothingToRotate => error_codes::NOTHING_TO_ROTATE,
            LayoutError::Catalog(_) => error_codes::CATALOG_FAILED,
            LayoutError::Load { .. } => error_codes::LOAD_FAILED,
            LayoutError::Store(_) => error_codes::STORE_FAILED,
        };
        Response {
            id,
            result: None,
            error: Some(ErrorResponse {
                code,
                message: err.to_string(),
                kind: Some(err.kind()),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Standard JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Custom error codes
    pub const NO_DESIGN_OPEN: i32 = 2;
    pub const UNKNOWN_COMPONENT: i32 = 3;
    pub const EMPTY_SELECTION: i32 = 4;
    pub const NOTHING_TO_ROTATE: i32 = 5;
    pub const LOAD_FAILED: i32 = 6;
    pub const STORE_FAILED: i32 = 7;
    pub const CATALOG_FAILED: i32 = 8;
    pub const DESIGN_EXISTS: i32 = 9;
}
