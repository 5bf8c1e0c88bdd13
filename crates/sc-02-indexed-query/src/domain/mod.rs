//! # Domain Layer
//!
//! Indexer rows, query parameters, projections and the confirmation policy.

pub mod confirmations;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use confirmations::Confirmations;
pub use entities::*;
pub use errors::IndexerError;
pub use value_objects::*;
