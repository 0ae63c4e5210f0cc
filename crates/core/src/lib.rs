//! Core business logic for the back-office.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! The canonical collections live in memory and are owned by [`BackOffice`].
//!
//! # Modules
//!
//! - `workflow` - Generic approve/reject review state machine
//! - `deposit` - Deposit request review
//! - `account` - Account registration, balances and limits
//! - `fixtures` - Mock records for development

pub mod account;
pub mod backoffice;
pub mod deposit;
pub mod fixtures;
pub mod workflow;

pub use backoffice::BackOffice;
pub use workflow::WorkflowError;
