//! Send and withdraw limits on an account.
//!
//! A limit is a positive ceiling together with the window it applies to.
//! An account without a limit simply has `None` in the slot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::workflow::WorkflowError;

/// Which operation a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    /// Sending money to other users.
    Send,
    /// Withdrawing money out of the platform.
    Withdraw,
}

impl LimitKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LimitKind {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "send" => Ok(Self::Send),
            "withdraw" => Ok(Self::Withdraw),
            other => Err(WorkflowError::InvalidLimit(format!(
                "unknown limit kind '{other}'"
            ))),
        }
    }
}

/// Calendar period a periodic limit resets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitPeriod {
    /// Resets every day.
    Daily,
    /// Resets every week.
    Weekly,
    /// Resets every month.
    Monthly,
    /// Resets every year.
    Yearly,
}

impl LimitPeriod {
    /// Returns the string representation of the period.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// Window a limit amount is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitWindow {
    /// A plain ceiling with no reset window.
    Standing,
    /// A ceiling that resets every calendar period.
    Periodic(LimitPeriod),
    /// A ceiling over a rolling window of the given number of days.
    CustomDays(NonZeroU32),
}

impl LimitWindow {
    /// Returns the form tag for this window.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Periodic(period) => period.as_str(),
            Self::CustomDays(_) => "custom",
        }
    }

    /// Returns the rolling window length, for custom windows.
    #[must_use]
    pub fn days(&self) -> Option<u32> {
        match self {
            Self::CustomDays(days) => Some(days.get()),
            _ => None,
        }
    }
}

/// A limit: a positive amount over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimitSpec {
    window: LimitWindow,
    amount: Decimal,
}

impl LimitSpec {
    /// Creates a limit, checking the amount is positive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLimit` if the amount is zero or negative.
    pub fn new(window: LimitWindow, amount: Decimal) -> Result<Self, WorkflowError> {
        if amount <= Decimal::ZERO {
            return Err(WorkflowError::InvalidLimit(format!(
                "limit amount must be positive, got {amount}"
            )));
        }
        Ok(Self { window, amount })
    }

    /// Shorthand for a standing ceiling.
    pub fn standing(amount: Decimal) -> Result<Self, WorkflowError> {
        Self::new(LimitWindow::Standing, amount)
    }

    /// Builds a limit from the admin form's tag, amount and day count.
    ///
    /// The tag `none` yields `Ok(None)`, meaning the limit is cleared; the
    /// amount and days are ignored in that case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLimit` for an unknown tag, a missing or non-positive
    /// amount, or a custom window without a positive day count.
    pub fn from_parts(
        tag: &str,
        amount: Option<Decimal>,
        days: Option<u32>,
    ) -> Result<Option<Self>, WorkflowError> {
        let window = match tag.trim().to_lowercase().as_str() {
            "none" => return Ok(None),
            "standing" => LimitWindow::Standing,
            "daily" => LimitWindow::Periodic(LimitPeriod::Daily),
            "weekly" => LimitWindow::Periodic(LimitPeriod::Weekly),
            "monthly" => LimitWindow::Periodic(LimitPeriod::Monthly),
            "yearly" => LimitWindow::Periodic(LimitPeriod::Yearly),
            "custom" => {
                let days = days.and_then(NonZeroU32::new).ok_or_else(|| {
                    WorkflowError::InvalidLimit("custom window must be at least one day".into())
                })?;
                LimitWindow::CustomDays(days)
            }
            other => {
                return Err(WorkflowError::InvalidLimit(format!(
                    "unknown limit type '{other}'"
                )));
            }
        };
        let amount = amount.ok_or_else(|| {
            WorkflowError::InvalidLimit(format!("limit type '{}' needs an amount", window.tag()))
        })?;
        Self::new(window, amount).map(Some)
    }

    /// Returns the window.
    #[must_use]
    pub fn window(&self) -> LimitWindow {
        self.window
    }

    /// Returns the ceiling.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
