//! Deposit request review.
//!
//! Users upload a payment receipt and ask for a deposit to be recognised;
//! an admin checks the receipt and either approves it with the bank
//! transaction id or rejects it with a reason.

pub mod desk;
pub mod types;

pub use desk::DepositDesk;
pub use types::{Deposit, DepositApproval, DepositDetails, DepositRequest, NewDepositRequest};
