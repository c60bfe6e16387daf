//! # Application Layer
//!
//! Batch submission, retrying retrieval and the service tying them together.

pub mod retrieval;
pub mod service;
pub mod submission;

pub use retrieval::RetrievalEngine;
pub use service::AvailDaService;
pub use submission::SubmissionCoordinator;
