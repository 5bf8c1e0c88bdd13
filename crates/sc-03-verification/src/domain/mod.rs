//! # Domain Layer
//!
//! Verdicts, attestation types with their typed body views, boundary DTOs
//! and hard errors.

pub mod attestation_types;
pub mod dto;
pub mod errors;
pub mod status;

pub use attestation_types::*;
pub use dto::*;
pub use errors::VerificationError;
pub use status::{Verification, VerificationResponseStatus, VerificationStatus};
