//! The back-office aggregate.

use backoffice_shared::types::Currency;

use crate::account::AccountRegistry;
use crate::deposit::DepositDesk;

/// Single owner of the session's canonical data.
///
/// Deposits and accounts are kept side by side but never reconciled: approving
/// a deposit does not credit a balance.
#[derive(Debug, Clone, Default)]
pub struct BackOffice {
    /// Deposit requests.
    pub deposits: DepositDesk,
    /// User accounts.
    pub accounts: AccountRegistry,
}

impl BackOffice {
    /// Creates an empty back-office with balances held in `currency`.
    #[must_use]
    pub fn new(currency: Currency) -> Self {
        Self {
            deposits: DepositDesk::new(),
            accounts: AccountRegistry::new(currency),
        }
    }
}
