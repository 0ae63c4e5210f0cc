//! Deposit request domain types.

use backoffice_shared::types::{AccountId, DepositRequestId, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflow::{ReviewKind, ReviewableRequest};

/// Marker for the deposit request kind.
#[derive(Debug, Clone, Copy)]
pub struct Deposit;

/// Data carried by a deposit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositDetails {
    /// Amount the user claims to have paid in.
    pub amount: Money,
    /// Day the user filed the request.
    pub requested_on: NaiveDate,
    /// Opaque reference (URL) to the uploaded receipt image.
    pub receipt: String,
}

/// Data recorded when a deposit is approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositApproval {
    /// Bank or payment-provider transaction id, if the reviewer entered one.
    pub transaction_id: Option<String>,
}

impl DepositApproval {
    /// Creates approval data. The id is trimmed and a blank id counts as absent.
    pub fn new(transaction_id: Option<&str>) -> Self {
        Self {
            transaction_id: transaction_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}

impl ReviewKind for Deposit {
    type Id = DepositRequestId;
    type Payload = DepositDetails;
    type Approval = DepositApproval;

    const LABEL: &'static str = "deposit request";
}

/// A deposit request in the review workflow.
pub type DepositRequest = ReviewableRequest<Deposit>;

impl ReviewableRequest<Deposit> {
    /// Returns the recorded transaction id, if approved with one.
    pub fn transaction_id(&self) -> Option<&str> {
        self.state()
            .approval()
            .and_then(|approval| approval.transaction_id.as_deref())
    }
}

/// Input for filing a new deposit request.
#[derive(Debug, Clone)]
pub struct NewDepositRequest {
    /// The requesting user's account id.
    pub user_id: AccountId,
    /// The requesting user's username.
    pub username: String,
    /// Amount deposited.
    pub amount: Money,
    /// Day of the request.
    pub requested_on: NaiveDate,
    /// Receipt image reference.
    pub receipt: String,
}
