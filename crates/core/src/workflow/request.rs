//! The reviewable request entity shared by every request kind.

use backoffice_shared::types::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflow::types::{ReviewKind, ReviewState, ReviewStatus};

/// Reference to the user a request concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    /// The user's account id.
    pub user_id: AccountId,
    /// The user's username at the time of the request.
    pub username: String,
}

impl SubjectRef {
    /// Creates a new subject reference.
    pub fn new(user_id: AccountId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

/// An entity awaiting a binary approve/reject decision.
///
/// Only [`ReviewStore`](crate::workflow::ReviewStore) builds or mutates these,
/// so the id stays immutable and the state only moves forward.
#[derive(Debug, Clone)]
pub struct ReviewableRequest<K: ReviewKind> {
    pub(crate) id: K::Id,
    pub(crate) subject: SubjectRef,
    pub(crate) payload: K::Payload,
    pub(crate) state: ReviewState<K::Approval>,
    pub(crate) submitted_at: DateTime<Utc>,
}

impl<K: ReviewKind> ReviewableRequest<K> {
    /// Returns the request id.
    pub fn id(&self) -> K::Id {
        self.id
    }

    /// Returns the user the request concerns.
    pub fn subject(&self) -> &SubjectRef {
        &self.subject
    }

    /// Returns the kind-specific data.
    pub fn payload(&self) -> &K::Payload {
        &self.payload
    }

    /// Returns the state including decision metadata.
    pub fn state(&self) -> &ReviewState<K::Approval> {
        &self.state
    }

    /// Returns the current status.
    pub fn status(&self) -> ReviewStatus {
        self.state.status()
    }

    /// Returns true while the request awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.status() == ReviewStatus::Pending
    }

    /// Returns when the request entered the collection.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Returns the rejection reason, if rejected.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.state.rejection_reason()
    }

    /// Returns when the decision was processed, if decided.
    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.state.processed_at()
    }
}
