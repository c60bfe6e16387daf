//! # Domain Module
//!
//! Core domain types for the Avail DA adapter.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod invariants;

pub use codec::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
