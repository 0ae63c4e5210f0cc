//! User account management.
//!
//! A new account is a registration awaiting review. Once approved it is
//! `Active`; admins can then adjust its balance and set send/withdraw limits.

pub mod limit;
pub mod registry;
pub mod types;

pub use limit::{LimitKind, LimitPeriod, LimitSpec, LimitWindow};
pub use registry::AccountRegistry;
pub use types::{
    Account, AccountApproval, AccountProfile, AccountStatus, Identity, NewAccount, Registration,
    Role,
};
