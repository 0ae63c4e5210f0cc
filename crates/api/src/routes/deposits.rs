//! Deposit request review routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use backoffice_core::deposit::{DepositRequest, NewDepositRequest};
use backoffice_core::workflow::ReviewStatus;
use backoffice_shared::AppError;
use backoffice_shared::types::{AccountId, Currency, DepositRequestId, Money};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery},
};

/// Creates the deposit request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests).post(submit_request))
        .route("/requests/{id}", get(get_request).delete(delete_request))
        .route("/requests/{id}/approve", post(approve_request))
        .route("/requests/{id}/reject", post(reject_request))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing deposit requests.
#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    /// Filter by status (pending, approved, rejected).
    pub status: Option<String>,
}

/// Request body for filing a deposit request.
#[derive(Debug, Deserialize)]
pub struct SubmitDepositRequest {
    /// Requesting user's account id.
    pub user_id: AccountId,
    /// Requesting user's username.
    pub username: String,
    /// Amount deposited.
    pub amount: Decimal,
    /// Currency, defaults to the ledger currency.
    pub currency: Option<Currency>,
    /// Day of the request, defaults to today.
    pub requested_on: Option<NaiveDate>,
    /// Receipt image reference.
    pub receipt: String,
}

/// Request body for approving a deposit.
///
/// Both fields may be omitted; a blank transaction id is stored as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApproveDepositRequest {
    /// Bank or provider transaction id.
    pub transaction_id: Option<String>,
    /// Processing time, defaults to now.
    pub processed_at: Option<DateTime<Utc>>,
}

/// Request body for rejecting a request.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// Why the request is declined.
    pub reason: String,
    /// Processing time, defaults to now.
    pub processed_at: Option<DateTime<Utc>>,
}

/// Response for a deposit request.
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    /// Request id.
    pub id: DepositRequestId,
    /// Requesting user's account id.
    pub user_id: AccountId,
    /// Requesting user's username.
    pub username: String,
    /// Amount.
    pub amount: String,
    /// Currency.
    pub currency: String,
    /// Day of the request.
    pub requested_on: String,
    /// Receipt image reference.
    pub receipt: String,
    /// Status.
    pub status: String,
    /// Transaction id (approved with one only).
    pub transaction_id: Option<String>,
    /// Rejection reason (rejected only).
    pub rejection_reason: Option<String>,
    /// Processing timestamp (decided only).
    pub processed_at: Option<String>,
    /// When the request was filed.
    pub submitted_at: String,
}

impl From<&DepositRequest> for DepositResponse {
    fn from(request: &DepositRequest) -> Self {
        let details = request.payload();
        Self {
            id: request.id(),
            user_id: request.subject().user_id,
            username: request.subject().username.clone(),
            amount: details.amount.amount.to_string(),
            currency: details.amount.currency.to_string(),
            requested_on: details.requested_on.to_string(),
            receipt: details.receipt.clone(),
            status: request.status().to_string(),
            transaction_id: request.transaction_id().map(str::to_string),
            rejection_reason: request.rejection_reason().map(str::to_string),
            processed_at: request.processed_at().map(|at| at.to_rfc3339()),
            submitted_at: request.submitted_at().to_rfc3339(),
        }
    }
}

/// Response for a list of deposit requests.
#[derive(Debug, Serialize)]
pub struct DepositListResponse {
    /// Requests in filing order.
    pub requests: Vec<DepositResponse>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/requests` - List deposit requests, optionally by status.
async fn list_requests(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListRequestsQuery>,
) -> ApiResult<Json<DepositListResponse>> {
    let status = parse_status_filter(query.status.as_deref())?;

    let office = state.office.read().await;
    let requests = office
        .deposits
        .list_by_status(status)
        .into_iter()
        .map(DepositResponse::from)
        .collect();

    Ok(Json(DepositListResponse { requests }))
}

/// POST `/requests` - File a new deposit request.
async fn submit_request(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitDepositRequest>,
) -> ApiResult<(StatusCode, Json<DepositResponse>)> {
    let mut office = state.office.write().await;
    let currency = payload
        .currency
        .unwrap_or_else(|| office.accounts.currency());
    let now = Utc::now();

    let input = NewDepositRequest {
        user_id: payload.user_id,
        username: payload.username,
        amount: Money::new(payload.amount, currency),
        requested_on: payload.requested_on.unwrap_or_else(|| now.date_naive()),
        receipt: payload.receipt,
    };
    let request = office.deposits.submit(input, now)?;

    info!(request_id = %request.id(), username = %request.subject().username, "Deposit request submitted");
    Ok((StatusCode::CREATED, Json(DepositResponse::from(request))))
}

/// GET `/requests/{id}` - Get one deposit request.
async fn get_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DepositRequestId>,
) -> ApiResult<Json<DepositResponse>> {
    let office = state.office.read().await;
    let request = office.deposits.get(id)?;
    Ok(Json(DepositResponse::from(request)))
}

/// POST `/requests/{id}/approve` - Approve a pending deposit.
async fn approve_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DepositRequestId>,
    ApiJson(payload): ApiJson<ApproveDepositRequest>,
) -> ApiResult<Json<DepositResponse>> {
    let processed_at = payload.processed_at.unwrap_or_else(Utc::now);

    let mut office = state.office.write().await;
    let request = office
        .deposits
        .approve(id, payload.transaction_id.as_deref(), processed_at)?;

    // User notification hooks in here once a mailer exists.
    info!(
        request_id = %id,
        username = %request.subject().username,
        transaction_id = ?request.transaction_id(),
        "Deposit request approved"
    );
    Ok(Json(DepositResponse::from(request)))
}

/// POST `/requests/{id}/reject` - Reject a pending deposit.
async fn reject_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DepositRequestId>,
    ApiJson(payload): ApiJson<RejectRequest>,
) -> ApiResult<Json<DepositResponse>> {
    let processed_at = payload.processed_at.unwrap_or_else(Utc::now);

    let mut office = state.office.write().await;
    let request = office.deposits.reject(id, &payload.reason, processed_at)?;

    info!(
        request_id = %id,
        username = %request.subject().username,
        reason = %payload.reason.trim(),
        "Deposit request rejected"
    );
    Ok(Json(DepositResponse::from(request)))
}

/// DELETE `/requests/{id}` - Delete a deposit request.
async fn delete_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DepositRequestId>,
) -> ApiResult<StatusCode> {
    let mut office = state.office.write().await;
    office.deposits.remove(id)?;

    info!(request_id = %id, "Deposit request deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses the optional `status` query parameter.
fn parse_status_filter(raw: Option<&str>) -> Result<Option<ReviewStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => ReviewStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("unknown status '{s}'"))),
    }
}
