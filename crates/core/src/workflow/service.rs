//! Workflow service for review state transitions.
//!
//! This module implements the state machine shared by every request kind.
//! It works on states alone; looking entities up and storing the result is
//! the job of [`ReviewStore`](crate::workflow::ReviewStore).

use chrono::{DateTime, Utc};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ReviewState, ReviewStatus};

/// Stateless service for review transitions.
pub struct ReviewService;

impl ReviewService {
    /// Approve a pending request.
    ///
    /// # Returns
    /// * `Ok(ReviewState::Approved)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if already decided
    pub fn approve<A>(
        current: &ReviewState<A>,
        approval: A,
        processed_at: DateTime<Utc>,
    ) -> Result<ReviewState<A>, WorkflowError> {
        Self::ensure_pending(current, ReviewStatus::Approved)?;
        Ok(ReviewState::Approved {
            approval,
            processed_at,
        })
    }

    /// Reject a pending request.
    ///
    /// The reason is trimmed before it is stored. A decided request fails
    /// with `InvalidTransition` whatever the reason.
    ///
    /// # Returns
    /// * `Ok(ReviewState::Rejected)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if already decided
    /// * `Err(WorkflowError::RejectionReasonRequired)` if reason is blank
    pub fn reject<A>(
        current: &ReviewState<A>,
        reason: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<ReviewState<A>, WorkflowError> {
        Self::ensure_pending(current, ReviewStatus::Rejected)?;

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        Ok(ReviewState::Rejected {
            reason: reason.to_string(),
            processed_at,
        })
    }

    fn ensure_pending<A>(current: &ReviewState<A>, to: ReviewStatus) -> Result<(), WorkflowError> {
        let from = current.status();
        if from.is_terminal() {
            return Err(WorkflowError::InvalidTransition { from, to });
        }
        Ok(())
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: ReviewStatus, to: ReviewStatus) -> bool {
        matches!(
            (from, to),
            (
                ReviewStatus::Pending,
                ReviewStatus::Approved | ReviewStatus::Rejected
            )
        )
    }
}
