//! Mock records for local development.
//!
//! Mirrors the sample data the admin screens were designed against: two
//! users and three deposit requests, one in each review status.

use backoffice_shared::types::{AccountId, Money};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{LimitKind, LimitSpec, NewAccount, Role};
use crate::backoffice::BackOffice;
use crate::deposit::NewDepositRequest;
use crate::workflow::WorkflowError;

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, WorkflowError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| WorkflowError::InvalidInput(format!("invalid date {y}-{m}-{d}")))
}

fn at(day: NaiveDate, h: u32, min: u32) -> Result<DateTime<Utc>, WorkflowError> {
    day.and_hms_opt(h, min, 0)
        .map(|dt: NaiveDateTime| dt.and_utc())
        .ok_or_else(|| WorkflowError::InvalidInput(format!("invalid time {h}:{min}")))
}

/// Fills an empty back-office with the sample records.
///
/// # Errors
///
/// Fails if the back-office already holds records that clash with the samples.
pub fn seed(office: &mut BackOffice) -> Result<(), WorkflowError> {
    let created = at(date(2023, 7, 1)?, 9, 0)?;
    let currency = office.accounts.currency();

    let john = office
        .accounts
        .create(
            NewAccount {
                first_name: "John".into(),
                last_name: "Doe".into(),
                username: "johndoe".into(),
                email: "john@example.com".into(),
                date_of_birth: date(1990, 1, 1)?,
                place_of_birth: "New York".into(),
                residence: "New York".into(),
                nationality: "USA".into(),
                role: Role::User,
                id_card: Some("/johndoe.jpg".into()),
            },
            created,
        )?
        .id();
    office.accounts.approve(john, None, created)?;
    office.accounts.adjust_balance(john, Decimal::from(1000))?;
    office.accounts.set_limit(
        john,
        LimitKind::Send,
        Some(LimitSpec::standing(Decimal::from(5000))?),
    )?;
    office.accounts.set_limit(
        john,
        LimitKind::Withdraw,
        Some(LimitSpec::standing(Decimal::from(10_000))?),
    )?;

    let jane = office
        .accounts
        .create(
            NewAccount {
                first_name: "Jane".into(),
                last_name: "Smith".into(),
                username: "janesmith".into(),
                email: "jane@example.com".into(),
                date_of_birth: date(1992, 5, 15)?,
                place_of_birth: "London".into(),
                residence: "London".into(),
                nationality: "UK".into(),
                role: Role::User,
                id_card: Some("/janesmith.jpg".into()),
            },
            created,
        )?
        .id();
    office.accounts.adjust_balance(jane, Decimal::from(500))?;

    let deposit = |user: u64, username: &str, amount: i64, day: NaiveDate| NewDepositRequest {
        user_id: AccountId::new(user),
        username: username.to_string(),
        amount: Money::new(Decimal::from(amount), currency),
        requested_on: day,
        receipt: "/placeholder.svg?height=300&width=200".to_string(),
    };

    let first_day = date(2023, 7, 5)?;
    office.deposits.submit(
        deposit(john.get(), "johndoe", 1000, first_day),
        at(first_day, 8, 0)?,
    )?;

    let second_day = date(2023, 7, 4)?;
    let second = office
        .deposits
        .submit(
            deposit(jane.get(), "janesmith", 1500, second_day),
            at(second_day, 8, 0)?,
        )?
        .id();
    office
        .deposits
        .approve(second, Some("TXN-67890"), at(date(2023, 7, 5)?, 11, 30)?)?;

    let third_day = date(2023, 7, 3)?;
    let third = office
        .deposits
        .submit(
            deposit(3, "bobjohnson", 500, third_day),
            at(third_day, 8, 0)?,
        )?
        .id();
    office
        .deposits
        .reject(third, "Insufficient funds", at(third_day, 16, 0)?)?;

    Ok(())
}
