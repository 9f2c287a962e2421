//! Store implementations for the credential and review collaborator traits

pub mod memory;
pub mod postgres;

pub use memory::{MemoryCredentialStore, MemoryReviewStore};
pub use postgres::{PgCredentialStore, PgReviewStore};
