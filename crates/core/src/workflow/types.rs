//! Workflow domain types for request review.
//!
//! This module defines the status values a reviewable request moves through,
//! the state carried with each status, and the trait that plugs a concrete
//! request kind (deposits, account registrations) into the generic machinery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;


/// Review status of a request.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted by a reviewer (terminal).
    Approved,
    /// Declined by a reviewer (terminal).
    Rejected,
}

impl ReviewStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true once a decision has been made.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a request together with its decision metadata.
///
/// Decision metadata only exists in the decided variants, so a pending
/// request can never carry a reason or a processing timestamp, and a
/// rejection reason is present exactly when the request is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState<A> {
    /// Awaiting a decision.
    Pending,
    /// Approved, with kind-specific approval data.
    Approved {
        /// Data recorded with the approval.
        approval: A,
        /// When the decision was processed.
        processed_at: DateTime<Utc>,
    },
    /// Rejected, with the reviewer's reason.
    Rejected {
        /// Why the request was declined (never blank).
        reason: String,
        /// When the decision was processed.
        processed_at: DateTime<Utc>,
    },
}

impl<A> ReviewState<A> {
    /// Returns the status without its metadata.
    #[must_use]
    pub fn status(&self) -> ReviewStatus {
        match self {
            Self::Pending => ReviewStatus::Pending,
            Self::Approved { .. } => ReviewStatus::Approved,
            Self::Rejected { .. } => ReviewStatus::Rejected,
        }
    }

    /// Returns the approval data, if approved.
    #[must_use]
    pub fn approval(&self) -> Option<&A> {
        match self {
            Self::Approved { approval, .. } => Some(approval),
            _ => None,
        }
    }

    /// Returns the rejection reason, if rejected.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Returns when the decision was processed, if decided.
    #[must_use]
    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending => None,
            Self::Approved { processed_at, .. } | Self::Rejected { processed_at, .. } => {
                Some(*processed_at)
            }
        }
    }
}

/// A kind of request that goes through the review workflow.
///
/// Implementors are zero-sized markers; the associated types carry the
/// kind-specific shape of the request.
pub trait ReviewKind {
    /// Identifier type for requests of this kind.
    type Id: Copy + Eq + fmt::Debug + fmt::Display + From<u64> + Into<u64>;
    /// Data carried by every request of this kind.
    type Payload: Clone + fmt::Debug;
    /// Data recorded when a request of this kind is approved.
    type Approval: Clone + fmt::Debug;

    /// Human-readable name used in errors and logs.
    const LABEL: &'static str;
}
