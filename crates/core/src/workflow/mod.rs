//! Review workflow shared by every request kind.
//!
//! This module implements the approve/reject state machine and the
//! in-memory collection that owns requests of one kind.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (ReviewStatus, ReviewState, ReviewKind)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic
//! - `request` - The reviewable request entity
//! - `store` - Insertion-ordered canonical collection

pub mod error;
pub mod request;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use request::{ReviewableRequest, SubjectRef};
pub use service::ReviewService;
pub use store::ReviewStore;
pub use types::{ReviewKind, ReviewState, ReviewStatus};
