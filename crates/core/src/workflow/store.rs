//! In-memory canonical collection of reviewable requests.
//!
//! A `ReviewStore` owns every request of one kind for the lifetime of the
//! session. Entries keep insertion order and ids come from a monotonic
//! counter, so an id is never handed out twice even after removals.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::workflow::error::WorkflowError;
use crate::workflow::request::{ReviewableRequest, SubjectRef};
use crate::workflow::service::ReviewService;
use crate::workflow::types::{ReviewKind, ReviewState, ReviewStatus};

/// Insertion-ordered collection of requests of kind `K`.
#[derive(Debug, Clone)]
pub struct ReviewStore<K: ReviewKind> {
    entries: Vec<ReviewableRequest<K>>,
    next_id: u64,
}

impl<K: ReviewKind> Default for ReviewStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ReviewKind> ReviewStore<K> {
    /// Creates an empty store. The first id handed out is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Returns the id the next inserted request will get.
    pub fn next_id(&self) -> K::Id {
        K::Id::from(self.next_id)
    }

    /// Adds a new pending request and returns it.
    pub fn insert(
        &mut self,
        subject: SubjectRef,
        payload: K::Payload,
        submitted_at: DateTime<Utc>,
    ) -> &ReviewableRequest<K> {
        let id = self.next_id();
        self.next_id += 1;

        debug!(kind = K::LABEL, %id, username = %subject.username, "request submitted");

        let index = self.entries.len();
        self.entries.push(ReviewableRequest {
            id,
            subject,
            payload,
            state: ReviewState::Pending,
            submitted_at,
        });
        &self.entries[index]
    }

    /// Returns all requests in insertion order.
    pub fn list(&self) -> &[ReviewableRequest<K>] {
        &self.entries
    }

    /// Returns requests in insertion order, optionally restricted to one status.
    pub fn list_by_status(&self, status: Option<ReviewStatus>) -> Vec<&ReviewableRequest<K>> {
        self.entries
            .iter()
            .filter(|entry| status.is_none_or(|wanted| entry.status() == wanted))
            .collect()
    }

    /// Returns pending requests in insertion order.
    pub fn pending(&self) -> impl Iterator<Item = &ReviewableRequest<K>> {
        self.entries.iter().filter(|entry| entry.is_pending())
    }

    /// Looks a request up by id.
    pub fn get(&self, id: K::Id) -> Result<&ReviewableRequest<K>, WorkflowError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| WorkflowError::not_found(K::LABEL, id))
    }

    pub(crate) fn get_mut(
        &mut self,
        id: K::Id,
    ) -> Result<&mut ReviewableRequest<K>, WorkflowError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| WorkflowError::not_found(K::LABEL, id))
    }

    /// Approves a pending request and returns the updated entity.
    pub fn approve(
        &mut self,
        id: K::Id,
        approval: K::Approval,
        processed_at: DateTime<Utc>,
    ) -> Result<&ReviewableRequest<K>, WorkflowError> {
        let entry = self.get_mut(id)?;
        entry.state = ReviewService::approve(&entry.state, approval, processed_at)?;

        debug!(kind = K::LABEL, %id, "request approved");
        Ok(&*entry)
    }

    /// Rejects a pending request and returns the updated entity.
    pub fn reject(
        &mut self,
        id: K::Id,
        reason: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<&ReviewableRequest<K>, WorkflowError> {
        let entry = self.get_mut(id)?;
        entry.state = ReviewService::reject(&entry.state, reason, processed_at)?;

        debug!(kind = K::LABEL, %id, "request rejected");
        Ok(&*entry)
    }

    /// Removes a request, returning it.
    ///
    /// Removing an unknown id is an error rather than a no-op.
    pub fn remove(&mut self, id: K::Id) -> Result<ReviewableRequest<K>, WorkflowError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| WorkflowError::not_found(K::LABEL, id))?;

        debug!(kind = K::LABEL, %id, "request removed");
        Ok(self.entries.remove(index))
    }

    /// Returns true if any request satisfies the predicate.
    pub fn any(&self, predicate: impl FnMut(&ReviewableRequest<K>) -> bool) -> bool {
        self.entries.iter().any(predicate)
    }

    /// Returns the number of requests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no requests.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
