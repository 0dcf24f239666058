use std::io::{Read, Write};

use chrono::{DateTime, FixedOffset};
use csv::{ReaderBuilder, Result, Trim, Writer};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    batch::Operation,
    domain::{
        account::{Account, AccountId},
        transaction::{Transaction, TransactionKind},
    },
};

/// Parse [`Operation`]s from a reader.
///
/// Rows keep their input order, since a deposit only makes sense after the
/// `open` that created its account.
///
/// A row that does not parse (unknown `type`, empty or malformed `amount`)
/// fails the whole read, regardless of how lenient the later replay is:
/// only rows that reached the ledger can become a
/// [`Rejection`](crate::batch::Rejection).
pub fn read(reader: impl Read) -> Result<Vec<Operation>> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .collect()
}

#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    account: AccountId,
    owner: &'a str,
    balance: Decimal,
    deposited: Decimal,
    withdrawn: Decimal,
    transactions: usize,
}

#[derive(Debug, Serialize)]
struct StatementRow {
    account: AccountId,
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<FixedOffset>,
}

/// Writes one summary row per account; `owner` renders each account's owner.
pub fn write<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    owner: impl Fn(&Account) -> &'a str,
    writer: impl Write,
) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    for account in accounts {
        let totals = account.totals();
        let total = |kind: TransactionKind| totals.get(&kind).copied().unwrap_or(Decimal::ZERO);

        writer.serialize(AccountRow {
            account: account.id(),
            owner: owner(account),
            balance: account.balance(),
            deposited: total(TransactionKind::Deposit),
            withdrawn: total(TransactionKind::Withdrawal).abs(),
            transactions: account.statement().len(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_statements<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    writer: impl Write,
) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    for account in accounts {
        for tx in account.statement() {
            writer.serialize(statement_row(account.id(), tx))?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn statement_row(account: AccountId, tx: &Transaction) -> StatementRow {
    StatementRow {
        account,
        kind: tx.kind(),
        amount: tx.amount(),
        timestamp: tx.timestamp(),
    }
}
