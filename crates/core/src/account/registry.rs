//! Account registry: the canonical collection of user accounts.

use backoffice_shared::types::{AccountId, Currency, Money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;
use validator::Validate;

use crate::account::limit::{LimitKind, LimitSpec};
use crate::account::types::{
    Account, AccountApproval, AccountProfile, AccountStatus, Identity, NewAccount, Registration,
};
use crate::workflow::{ReviewStore, SubjectRef, WorkflowError};

/// Owns every account of the session.
///
/// Balances are held in a single currency fixed at construction.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    store: ReviewStore<Registration>,
    currency: Currency,
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl AccountRegistry {
    /// Creates an empty registry holding balances in `currency`.
    #[must_use]
    pub fn new(currency: Currency) -> Self {
        Self {
            store: ReviewStore::new(),
            currency,
        }
    }

    /// Returns the balance currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Registers a new account in `Pending` status with a zero balance and no limits.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a field fails validation, `DuplicateUsername` when
    /// the username is taken (compared case-insensitively).
    pub fn create(
        &mut self,
        input: NewAccount,
        submitted_at: DateTime<Utc>,
    ) -> Result<&Account, WorkflowError> {
        let input = input.trimmed();
        input.validate()?;

        let username = input.username;
        if self.is_username_taken(&username) {
            return Err(WorkflowError::DuplicateUsername(username));
        }

        let id = self.store.next_id();
        let profile = AccountProfile {
            identity: Identity {
                first_name: input.first_name,
                last_name: input.last_name,
                username: username.clone(),
                email: input.email,
                date_of_birth: input.date_of_birth,
                place_of_birth: input.place_of_birth,
                residence: input.residence,
                nationality: input.nationality,
            },
            role: input.role,
            id_card: input.id_card,
            balance: Money::zero(self.currency),
            send_limit: None,
            withdraw_limit: None,
        };

        Ok(self
            .store
            .insert(SubjectRef::new(id, username), profile, submitted_at))
    }

    /// Returns true if an account already uses this username.
    pub fn is_username_taken(&self, username: &str) -> bool {
        let wanted = username.trim();
        self.store.any(|account| {
            account
                .profile()
                .identity
                .username
                .eq_ignore_ascii_case(wanted)
        })
    }

    /// Returns all accounts in creation order.
    pub fn list(&self) -> &[Account] {
        self.store.list()
    }

    /// Returns accounts, optionally restricted to one status.
    pub fn list_by_status(&self, status: Option<AccountStatus>) -> Vec<&Account> {
        self.store.list_by_status(status.map(Into::into))
    }

    /// Returns registrations awaiting review.
    pub fn pending(&self) -> impl Iterator<Item = &Account> {
        self.store.pending()
    }

    /// Looks an account up by id.
    pub fn get(&self, id: AccountId) -> Result<&Account, WorkflowError> {
        self.store.get(id)
    }

    /// Approves a pending registration; the account becomes `Active`.
    pub fn approve(
        &mut self,
        id: AccountId,
        notes: Option<String>,
        processed_at: DateTime<Utc>,
    ) -> Result<&Account, WorkflowError> {
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.store
            .approve(id, AccountApproval { notes }, processed_at)
    }

    /// Rejects a pending registration with a reason.
    pub fn reject(
        &mut self,
        id: AccountId,
        reason: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<&Account, WorkflowError> {
        self.store.reject(id, reason, processed_at)
    }

    /// Adds a signed `delta` to the balance.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `NegativeBalance` if the result would be
    /// below zero. The balance is unchanged on error.
    pub fn adjust_balance(
        &mut self,
        id: AccountId,
        delta: Decimal,
    ) -> Result<&Account, WorkflowError> {
        let account = self.store.get_mut(id)?;
        let balance = account.payload.balance;

        let updated = balance
            .checked_add(delta)
            .ok_or(WorkflowError::InvalidAmount {
                amount: delta,
                message: "balance adjustment overflows",
            })?;
        if updated.is_negative() {
            return Err(WorkflowError::NegativeBalance {
                balance: balance.amount,
                delta,
            });
        }

        account.payload.balance = updated;
        debug!(%id, %delta, balance = %updated.amount, "balance adjusted");
        Ok(&*account)
    }

    /// Sets or clears (`None`) the limit for one operation.
    pub fn set_limit(
        &mut self,
        id: AccountId,
        kind: LimitKind,
        limit: Option<LimitSpec>,
    ) -> Result<&Account, WorkflowError> {
        let account = self.store.get_mut(id)?;
        *account.payload.limit_mut(kind) = limit;

        debug!(%id, %kind, cleared = limit.is_none(), "limit updated");
        Ok(&*account)
    }

    /// Deletes an account.
    pub fn remove(&mut self, id: AccountId) -> Result<Account, WorkflowError> {
        self.store.remove(id)
    }

    /// Returns the number of accounts.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if there are no accounts.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
