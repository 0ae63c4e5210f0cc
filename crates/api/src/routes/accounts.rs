//! Account review and administration routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use backoffice_core::account::{Account, AccountStatus, LimitKind, LimitSpec, NewAccount};
use backoffice_shared::AppError;
use backoffice_shared::types::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery},
    routes::deposits::RejectRequest,
};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).delete(delete_account))
        .route("/accounts/{id}/approve", post(approve_account))
        .route("/accounts/{id}/reject", post(reject_account))
        .route("/accounts/{id}/balance", patch(adjust_balance))
        .route("/accounts/{id}/limits", patch(set_limit))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by status (pending, active, rejected).
    pub status: Option<String>,
}

/// Request body for approving a registration.
///
/// Both fields may be omitted; send `{}` for a plain approval.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApproveAccountRequest {
    /// Optional reviewer note.
    pub notes: Option<String>,
    /// Processing time, defaults to now.
    pub processed_at: Option<DateTime<Utc>>,
}

/// Request body for a balance adjustment.
#[derive(Debug, Deserialize)]
pub struct AdjustBalanceRequest {
    /// Signed amount added to the balance.
    pub delta: Decimal,
}

/// Request body for setting or clearing a limit.
#[derive(Debug, Deserialize)]
pub struct SetLimitRequest {
    /// Which limit to change.
    pub which: LimitKind,
    /// Window tag: none, standing, daily, weekly, monthly, yearly or custom.
    #[serde(rename = "type")]
    pub limit_type: String,
    /// Ceiling, required unless the type is `none`.
    pub value: Option<Decimal>,
    /// Window length for the `custom` type.
    pub days: Option<u32>,
}

/// Limit as returned to clients.
#[derive(Debug, Serialize)]
pub struct LimitResponse {
    /// Window tag.
    #[serde(rename = "type")]
    pub limit_type: String,
    /// Ceiling.
    pub value: String,
    /// Window length for custom windows.
    pub days: Option<u32>,
}

impl From<&LimitSpec> for LimitResponse {
    fn from(limit: &LimitSpec) -> Self {
        let window = limit.window();
        Self {
            limit_type: window.tag().to_string(),
            value: limit.amount().to_string(),
            days: window.days(),
        }
    }
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account id.
    pub id: AccountId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Date of birth.
    pub date_of_birth: String,
    /// Place of birth.
    pub place_of_birth: String,
    /// Residence.
    pub residence: String,
    /// Nationality.
    pub nationality: String,
    /// Role.
    pub role: String,
    /// Identity document image reference.
    pub id_card: Option<String>,
    /// Status (pending, active, rejected).
    pub status: String,
    /// Balance amount.
    pub balance: String,
    /// Balance currency.
    pub currency: String,
    /// Send limit, `null` when unlimited.
    pub send_limit: Option<LimitResponse>,
    /// Withdraw limit, `null` when unlimited.
    pub withdraw_limit: Option<LimitResponse>,
    /// Rejection reason (rejected only).
    pub rejection_reason: Option<String>,
    /// Reviewer note (active only).
    pub approval_notes: Option<String>,
    /// Processing timestamp (decided only).
    pub processed_at: Option<String>,
    /// Registration time.
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        let profile = account.profile();
        let identity = &profile.identity;
        Self {
            id: account.id(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            date_of_birth: identity.date_of_birth.to_string(),
            place_of_birth: identity.place_of_birth.clone(),
            residence: identity.residence.clone(),
            nationality: identity.nationality.clone(),
            role: profile.role.as_str().to_string(),
            id_card: profile.id_card.clone(),
            status: account.account_status().to_string(),
            balance: profile.balance.amount.to_string(),
            currency: profile.balance.currency.to_string(),
            send_limit: profile.send_limit.as_ref().map(LimitResponse::from),
            withdraw_limit: profile.withdraw_limit.as_ref().map(LimitResponse::from),
            rejection_reason: account.rejection_reason().map(str::to_string),
            approval_notes: account
                .state()
                .approval()
                .and_then(|approval| approval.notes.clone()),
            processed_at: account.processed_at().map(|at| at.to_rfc3339()),
            created_at: account.submitted_at().to_rfc3339(),
        }
    }
}

/// Response for a list of accounts.
#[derive(Debug, Serialize)]
pub struct AccountListResponse {
    /// Accounts in registration order.
    pub accounts: Vec<AccountResponse>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/accounts` - List accounts, optionally by status.
async fn list_accounts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListAccountsQuery>,
) -> ApiResult<Json<AccountListResponse>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            AccountStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("unknown status '{s}'")))?,
        ),
    };

    let office = state.office.read().await;
    let accounts = office
        .accounts
        .list_by_status(status)
        .into_iter()
        .map(AccountResponse::from)
        .collect();

    Ok(Json(AccountListResponse { accounts }))
}

/// POST `/accounts` - Register a new account.
async fn create_account(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewAccount>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let mut office = state.office.write().await;
    let account = office.accounts.create(payload, Utc::now())?;

    info!(account_id = %account.id(), username = %account.subject().username, "Account registered");
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// GET `/accounts/{id}` - Get one account.
async fn get_account(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
) -> ApiResult<Json<AccountResponse>> {
    let office = state.office.read().await;
    let account = office.accounts.get(id)?;
    Ok(Json(AccountResponse::from(account)))
}

/// POST `/accounts/{id}/approve` - Approve a pending registration.
async fn approve_account(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(payload): ApiJson<ApproveAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let processed_at = payload.processed_at.unwrap_or_else(Utc::now);

    let mut office = state.office.write().await;
    let account = office.accounts.approve(id, payload.notes, processed_at)?;

    // Activation email goes out from here once a mailer exists.
    info!(
        account_id = %id,
        username = %account.subject().username,
        name = %account.profile().identity.full_name(),
        "Account approved"
    );
    Ok(Json(AccountResponse::from(account)))
}

/// POST `/accounts/{id}/reject` - Reject a pending registration.
async fn reject_account(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(payload): ApiJson<RejectRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let processed_at = payload.processed_at.unwrap_or_else(Utc::now);

    let mut office = state.office.write().await;
    let account = office.accounts.reject(id, &payload.reason, processed_at)?;

    info!(
        account_id = %id,
        username = %account.subject().username,
        reason = %payload.reason.trim(),
        "Account rejected"
    );
    Ok(Json(AccountResponse::from(account)))
}

/// PATCH `/accounts/{id}/balance` - Add a signed amount to the balance.
async fn adjust_balance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(payload): ApiJson<AdjustBalanceRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let mut office = state.office.write().await;
    let account = office.accounts.adjust_balance(id, payload.delta)?;

    info!(
        account_id = %id,
        delta = %payload.delta,
        balance = %account.profile().balance,
        "Balance adjusted"
    );
    Ok(Json(AccountResponse::from(account)))
}

/// PATCH `/accounts/{id}/limits` - Set or clear a send or withdraw limit.
async fn set_limit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(payload): ApiJson<SetLimitRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let limit = LimitSpec::from_parts(&payload.limit_type, payload.value, payload.days)?;

    let mut office = state.office.write().await;
    let account = office.accounts.set_limit(id, payload.which, limit)?;

    info!(
        account_id = %id,
        which = %payload.which,
        limit_type = %payload.limit_type.trim(),
        "Limit updated"
    );
    Ok(Json(AccountResponse::from(account)))
}

/// DELETE `/accounts/{id}` - Delete an account.
async fn delete_account(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
) -> ApiResult<StatusCode> {
    let mut office = state.office.write().await;
    office.accounts.remove(id)?;

    info!(account_id = %id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
