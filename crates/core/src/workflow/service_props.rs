//! Property-based tests for the review state machine.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::ReviewService;
use crate::workflow::types::{ReviewState, ReviewStatus};

/// Strategy for generating random ReviewStatus values.
fn arb_status() -> impl Strategy<Value = ReviewStatus> {
    prop_oneof![
        Just(ReviewStatus::Pending),
        Just(ReviewStatus::Approved),
        Just(ReviewStatus::Rejected),
    ]
}

/// Strategy for generating timestamps within a few decades.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..2_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Strategy for generating reasons with at least one visible character.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,60}"
}

/// Strategy for generating whitespace-only strings.
fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

/// Builds a state with the given status.
fn state_for(status: ReviewStatus, at: DateTime<Utc>) -> ReviewState<String> {
    match status {
        ReviewStatus::Pending => ReviewState::Pending,
        ReviewStatus::Approved => ReviewState::Approved {
            approval: "TXN-0".to_string(),
            processed_at: at,
        },
        ReviewStatus::Rejected => ReviewState::Rejected {
            reason: "earlier".to_string(),
            processed_at: at,
        },
    }
}

/// Strategy for a sequence of decision attempts: `None` approves, `Some` rejects.
fn arb_attempts() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of(arb_reason()), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Pending + approve → Approved carrying the exact approval data and time.
    #[test]
    fn prop_approve_from_pending_succeeds(txn in "[A-Z]{3}-[0-9]{1,8}", at in arb_timestamp()) {
        let state = ReviewService::approve(&ReviewState::Pending, txn.clone(), at).unwrap();
        prop_assert_eq!(state.status(), ReviewStatus::Approved);
        prop_assert_eq!(state.approval(), Some(&txn));
        prop_assert_eq!(state.processed_at(), Some(at));
        prop_assert!(state.rejection_reason().is_none());
    }

    /// Pending + reject → Rejected with the trimmed reason.
    #[test]
    fn prop_reject_from_pending_succeeds(reason in arb_reason(), at in arb_timestamp()) {
        let state: ReviewState<String> =
            ReviewService::reject(&ReviewState::Pending, &reason, at).unwrap();
        prop_assert_eq!(state.status(), ReviewStatus::Rejected);
        prop_assert_eq!(state.rejection_reason(), Some(reason.trim()));
        prop_assert!(state.approval().is_none());
    }

    /// Blank reasons fail a pending request; a decided one reports its state first.
    #[test]
    fn prop_blank_reason_never_decides(status in arb_status(), blank in arb_blank(), at in arb_timestamp()) {
        let result = ReviewService::reject(&state_for(status, at), &blank, at);
        if status.is_terminal() {
            let is_invalid = matches!(
                result,
                Err(WorkflowError::InvalidTransition { from, to: ReviewStatus::Rejected }) if from == status
            );
            prop_assert!(is_invalid);
        } else {
            prop_assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
        }
    }

    /// Terminal states accept no transition at all.
    #[test]
    fn prop_terminal_states_are_final(
        status in prop_oneof![Just(ReviewStatus::Approved), Just(ReviewStatus::Rejected)],
        reason in arb_reason(),
        at in arb_timestamp(),
    ) {
        let current = state_for(status, at);

        let approve = ReviewService::approve(&current, "TXN-9".to_string(), at);
        let is_invalid_approve = matches!(
            approve,
            Err(WorkflowError::InvalidTransition { from, to: ReviewStatus::Approved }) if from == status
        );
        prop_assert!(is_invalid_approve);

        let reject = ReviewService::reject(&current, &reason, at);
        let is_invalid_reject = matches!(
            reject,
            Err(WorkflowError::InvalidTransition { from, to: ReviewStatus::Rejected }) if from == status
        );
        prop_assert!(is_invalid_reject);
    }

    /// The outcome matches `is_valid_transition` for every status pair.
    #[test]
    fn prop_service_agrees_with_transition_table(status in arb_status(), at in arb_timestamp()) {
        let current = state_for(status, at);
        let approved = ReviewService::approve(&current, "TXN-1".to_string(), at).is_ok();
        let rejected = ReviewService::reject(&current, "reason", at).is_ok();

        prop_assert_eq!(approved, ReviewService::is_valid_transition(status, ReviewStatus::Approved));
        prop_assert_eq!(rejected, ReviewService::is_valid_transition(status, ReviewStatus::Rejected));
    }

    /// Whatever sequence of decisions is attempted, only the first one sticks.
    #[test]
    fn prop_first_decision_wins(attempts in arb_attempts(), at in arb_timestamp()) {
        let mut state: ReviewState<String> = ReviewState::Pending;
        let mut first: Option<ReviewState<String>> = None;

        for attempt in attempts {
            let next = match attempt {
                None => ReviewService::approve(&state, "TXN-1".to_string(), at),
                Some(reason) => ReviewService::reject(&state, &reason, at),
            };
            match next {
                Ok(decided) => {
                    prop_assert!(first.is_none(), "a second decision was accepted");
                    first = Some(decided.clone());
                    state = decided;
                }
                Err(err) => {
                    let is_invalid = matches!(err, WorkflowError::InvalidTransition { .. });
                    prop_assert!(is_invalid);
                }
            }
        }

        prop_assert_eq!(Some(state), first);
    }
}
