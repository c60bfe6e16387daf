//! JSON-RPC 2.0 surface of the blob API.

pub mod error;
pub mod router;
pub mod types;

pub use error::{codes, ApiError};
pub use router::{handle_body, process_single_request, route_method, AppState};
pub use types::{HexBytes, SubmitResponse};
