//! Deposit desk: the canonical collection of deposit requests.

use backoffice_shared::types::DepositRequestId;
use chrono::{DateTime, Utc};

use crate::deposit::types::{Deposit, DepositApproval, DepositDetails, DepositRequest, NewDepositRequest};
use crate::workflow::{ReviewStatus, ReviewStore, SubjectRef, WorkflowError};

/// Owns every deposit request of the session.
///
/// Approving a deposit does not touch any account balance; crediting the
/// user stays a separate admin action.
#[derive(Debug, Clone, Default)]
pub struct DepositDesk {
    store: ReviewStore<Deposit>,
}

impl DepositDesk {
    /// Creates an empty desk.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a new pending deposit request.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or a required field is blank.
    pub fn submit(
        &mut self,
        input: NewDepositRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<&DepositRequest, WorkflowError> {
        if !input.amount.is_positive() {
            return Err(WorkflowError::InvalidAmount {
                amount: input.amount.amount,
                message: "deposit amount must be positive",
            });
        }
        let username = input.username.trim();
        if username.is_empty() {
            return Err(WorkflowError::InvalidInput("username is required".into()));
        }
        let receipt = input.receipt.trim();
        if receipt.is_empty() {
            return Err(WorkflowError::InvalidInput("receipt is required".into()));
        }

        let subject = SubjectRef::new(input.user_id, username);
        let details = DepositDetails {
            amount: input.amount,
            requested_on: input.requested_on,
            receipt: receipt.to_string(),
        };
        Ok(self.store.insert(subject, details, submitted_at))
    }

    /// Returns all deposit requests in filing order.
    pub fn list(&self) -> &[DepositRequest] {
        self.store.list()
    }

    /// Returns deposit requests, optionally restricted to one status.
    pub fn list_by_status(&self, status: Option<ReviewStatus>) -> Vec<&DepositRequest> {
        self.store.list_by_status(status)
    }

    /// Returns requests still awaiting review.
    pub fn pending(&self) -> impl Iterator<Item = &DepositRequest> {
        self.store.pending()
    }

    /// Looks a deposit request up by id.
    pub fn get(&self, id: DepositRequestId) -> Result<&DepositRequest, WorkflowError> {
        self.store.get(id)
    }

    /// Approves a pending deposit, recording the transaction id if one is given.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InvalidTransition` if the request was
    /// already decided.
    pub fn approve(
        &mut self,
        id: DepositRequestId,
        transaction_id: Option<&str>,
        processed_at: DateTime<Utc>,
    ) -> Result<&DepositRequest, WorkflowError> {
        self.store
            .approve(id, DepositApproval::new(transaction_id), processed_at)
    }

    /// Rejects a pending deposit with a reason.
    pub fn reject(
        &mut self,
        id: DepositRequestId,
        reason: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<&DepositRequest, WorkflowError> {
        self.store.reject(id, reason, processed_at)
    }

    /// Deletes a deposit request.
    pub fn remove(&mut self, id: DepositRequestId) -> Result<DepositRequest, WorkflowError> {
        self.store.remove(id)
    }

    /// Returns the number of deposit requests.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if there are no deposit requests.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
