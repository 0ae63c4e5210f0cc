//! Account domain types.

use backoffice_shared::types::{AccountId, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::account::limit::{LimitKind, LimitSpec};
use crate::workflow::{ReviewKind, ReviewStatus, ReviewableRequest};

/// Marker for the account registration kind.
#[derive(Debug, Clone, Copy)]
pub struct Registration;

/// Personal and identity data captured at registration.
///
/// Immutable once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Place of birth.
    pub place_of_birth: String,
    /// Current residence.
    pub residence: String,
    /// Nationality.
    pub nationality: String,
}

impl Identity {
    /// Returns "first last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Role granted to the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    User,
    /// Back-office administrator.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Everything an account carries besides its review state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    /// Identity fields.
    pub identity: Identity,
    /// Granted role.
    pub role: Role,
    /// Opaque reference (URL) to the identity document image.
    pub id_card: Option<String>,
    /// Current balance, never negative.
    pub balance: Money,
    /// Ceiling on sending, `None` for unlimited.
    pub send_limit: Option<LimitSpec>,
    /// Ceiling on withdrawing, `None` for unlimited.
    pub withdraw_limit: Option<LimitSpec>,
}

impl AccountProfile {
    /// Returns the limit for one operation.
    #[must_use]
    pub fn limit(&self, kind: LimitKind) -> Option<&LimitSpec> {
        match kind {
            LimitKind::Send => self.send_limit.as_ref(),
            LimitKind::Withdraw => self.withdraw_limit.as_ref(),
        }
    }

    pub(crate) fn limit_mut(&mut self, kind: LimitKind) -> &mut Option<LimitSpec> {
        match kind {
            LimitKind::Send => &mut self.send_limit,
            LimitKind::Withdraw => &mut self.withdraw_limit,
        }
    }
}

/// Data recorded when a registration is approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountApproval {
    /// Optional note from the reviewer.
    pub notes: Option<String>,
}

impl ReviewKind for Registration {
    type Id = AccountId;
    type Payload = AccountProfile;
    type Approval = AccountApproval;

    const LABEL: &'static str = "account";
}

/// A user account; its review state is the registration decision.
pub type Account = ReviewableRequest<Registration>;

impl ReviewableRequest<Registration> {
    /// Returns the account status.
    pub fn account_status(&self) -> AccountStatus {
        self.status().into()
    }

    /// Returns the profile.
    pub fn profile(&self) -> &AccountProfile {
        self.payload()
    }
}

/// Account status as shown to admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registration awaiting review.
    Pending,
    /// Registration approved.
    Active,
    /// Registration declined.
    Rejected,
}

impl AccountStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl From<ReviewStatus> for AccountStatus {
    fn from(status: ReviewStatus) -> Self {
        match status {
            ReviewStatus::Pending => Self::Pending,
            ReviewStatus::Approved => Self::Active,
            ReviewStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<AccountStatus> for ReviewStatus {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Pending => Self::Pending,
            AccountStatus::Active => Self::Approved,
            AccountStatus::Rejected => Self::Rejected,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for registering a new account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAccount {
    /// Given name.
    #[validate(length(min = 1, max = 128))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 128))]
    pub last_name: String,
    /// Unique login name.
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// Contact email.
    #[validate(email)]
    pub email: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Place of birth.
    #[validate(length(min = 1, max = 128))]
    pub place_of_birth: String,
    /// Current residence.
    #[validate(length(min = 1, max = 128))]
    pub residence: String,
    /// Nationality.
    #[validate(length(min = 1, max = 128))]
    pub nationality: String,
    /// Granted role.
    #[serde(default)]
    pub role: Role,
    /// Identity document image reference.
    #[serde(default)]
    pub id_card: Option<String>,
}

impl NewAccount {
    /// Trims every text field; a blank id-card reference becomes `None`.
    ///
    /// Validation runs on the result, so padding never counts towards a
    /// minimum length.
    #[must_use]
    pub fn trimmed(self) -> Self {
        let trim = |value: String| value.trim().to_string();
        Self {
            first_name: trim(self.first_name),
            last_name: trim(self.last_name),
            username: trim(self.username),
            email: trim(self.email),
            date_of_birth: self.date_of_birth,
            place_of_birth: trim(self.place_of_birth),
            residence: trim(self.residence),
            nationality: trim(self.nationality),
            role: self.role,
            id_card: self.id_card.map(trim).filter(|card| !card.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_status_mapping() {
        assert_eq!(
            AccountStatus::from(ReviewStatus::Approved),
            AccountStatus::Active
        );
        assert_eq!(
            AccountStatus::from(ReviewStatus::Pending),
            AccountStatus::Pending
        );
        assert_eq!(
            ReviewStatus::from(AccountStatus::Rejected),
            ReviewStatus::Rejected
        );
        assert_eq!(AccountStatus::Active.to_string(), "active");
    }

    #[test]
    fn test_account_status_parse() {
        assert_eq!(AccountStatus::parse("Active"), Some(AccountStatus::Active));
        assert_eq!(AccountStatus::parse("approved"), None);
    }

    #[test]
    fn test_role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::Admin.as_str(), "admin");
    }
}
