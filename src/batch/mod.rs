//! Replays a list of operations against one customer, the way the console
//! front end would drive the core.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::{
    domain::{
        account::AccountId,
        bank::Bank,
        customer::CustomerId,
        error::{Error, Result},
    },
    error,
};

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Deposit,
    Withdraw,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    /// 1-based position in the customer's account list; unused by `open`.
    pub account: Option<usize>,
    #[serde(deserialize_with = "decimal_with_comma")]
    pub amount: Decimal,
}

/// Accepts both `1234.56` and `1234,56`.
fn decimal_with_comma<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .replace(',', ".")
        .parse()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based position of the operation in the input.
    pub line: usize,
    pub error: Error,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub applied: usize,
    pub rejected: Vec<Rejection>,
}

/// Applies every operation for `customer`, logging and collecting rejections.
///
/// With `strict` set, the first rejection is returned as
/// [`error::Error::Rejected`] instead and the remaining operations are skipped.
pub fn apply(
    bank: &mut Bank,
    customer: CustomerId,
    operations: impl IntoIterator<Item = Operation>,
    strict: bool,
) -> error::Result<Report> {
    let mut report = Report::default();

    for (index, operation) in operations.into_iter().enumerate() {
        let line = index + 1;

        match apply_one(bank, customer, &operation) {
            Ok(()) => report.applied += 1,
            Err(err) if strict => return Err(error::Error::Rejected { line, error: err }),
            Err(err) => {
                warn!(line, kind = ?operation.kind, error = %err, "rejected operation");
                report.rejected.push(Rejection { line, error: err });
            }
        }
    }

    info!(
        applied = report.applied,
        rejected = report.rejected.len(),
        "finished batch"
    );
    Ok(report)
}

fn apply_one(bank: &mut Bank, customer: CustomerId, operation: &Operation) -> Result<()> {
    match operation.kind {
        OperationKind::Open => {
            bank.open_account(customer, operation.amount)?;
        }
        OperationKind::Deposit => {
            let account = resolve(bank, customer, operation.account)?;
            bank.deposit(account, operation.amount)?;
        }
        OperationKind::Withdraw => {
            let account = resolve(bank, customer, operation.account)?;
            bank.withdraw(account, operation.amount)?;
        }
    }

    Ok(())
}

fn resolve(bank: &Bank, customer: CustomerId, position: Option<usize>) -> Result<AccountId> {
    let owner = bank
        .customer(customer)
        .ok_or(Error::UnknownCustomer { customer })?;

    position
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| owner.accounts().get(index).copied())
        .ok_or(Error::NullAccount)
}
