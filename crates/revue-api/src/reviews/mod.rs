//! Review domain services and DTOs

pub mod service;

pub use service::{ReviewDetailed, ReviewInput, ReviewPatch, ReviewService, ReviewSummary};
