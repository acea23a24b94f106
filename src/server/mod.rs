//! Layout server - line-delimited JSON-RPC front end for a layout session
//!
//! Each stdin line is one request; each response is one stdout line. Every
//! mutating response carries the draw events the session emitted.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Server state management
//! - `util` - Logging backend
//! - `handlers` - Request handlers organized by functionality

pub mod handlers;
pub mod protocol;
pub mod state;
pub mod util;

// Re-export key types for convenience
pub use handlers::handle_request;
pub use protocol::{error_codes, ErrorResponse, Request, Response};
pub use state::ServerState;
