//! # Algorithms Module
//!
//! Pure protocol logic:
//! - Request payload and URL construction
//! - Response parsing and sentinel classification

pub mod transcoding;

pub use transcoding::{
    build_retrieval_url, build_submit_payload, build_submit_url, classify_retrieval_response,
    decode_record_data, parse_submit_response, RetrievalResponse,
};
