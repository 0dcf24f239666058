use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{clock, error::Result, money};

#[derive(Debug, Serialize, Hash, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("deposit"),
            TransactionKind::Withdrawal => f.write_str("withdrawal"),
        }
    }
}

/// One balance-affecting entry of an account statement.
///
/// Built only through [`Transaction::deposit`] and [`Transaction::withdrawal`];
/// there is no way to change an entry once it exists.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<FixedOffset>,
}

impl Transaction {
    pub fn deposit(amount: Decimal) -> Result<Self> {
        let amount = money::positive(amount)?;
        Ok(Self::stamped(TransactionKind::Deposit, amount))
    }

    /// The stored amount is negated, so summing a statement yields the net
    /// balance change.
    pub fn withdrawal(amount: Decimal) -> Result<Self> {
        let amount = money::positive(amount)?;
        Ok(Self::stamped(TransactionKind::Withdrawal, -amount))
    }

    fn stamped(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            kind,
            amount,
            timestamp: clock::now(),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Signed amount: positive for deposits, negative for withdrawals.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionKind::Withdrawal
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_deposit() { '+' } else { '-' };
        write!(
            f,
            "[{}] {} {sign}{}",
            self.timestamp.date_naive(),
            self.kind.to_string().to_uppercase(),
            self.magnitude()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn deposit_is_stored_positive_and_rounded() {
        let tx = Transaction::deposit(dec!(750.505)).unwrap();

        assert_eq!(tx.kind(), TransactionKind::Deposit);
        assert_eq!(tx.amount(), dec!(750.50));
        assert!(tx.is_deposit());
        assert!(!tx.is_withdrawal());
    }

    #[test]
    fn withdrawal_is_stored_negative() {
        let tx = Transaction::withdrawal(dec!(400.75)).unwrap();

        assert_eq!(tx.kind(), TransactionKind::Withdrawal);
        assert_eq!(tx.amount(), dec!(-400.75));
        assert_eq!(tx.magnitude(), dec!(400.75));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [dec!(0), dec!(-1), dec!(-0.01)] {
            assert_eq!(
                Transaction::deposit(amount),
                Err(Error::InvalidAmount { amount })
            );
            assert_eq!(
                Transaction::withdrawal(amount),
                Err(Error::InvalidAmount { amount })
            );
        }
    }

    #[test]
    fn display_shows_date_kind_and_signed_amount() {
        let tx = Transaction::withdrawal(dec!(400.75)).unwrap();
        let expected = format!("[{}] WITHDRAWAL -400.75", tx.timestamp().date_naive());

        assert_eq!(tx.to_string(), expected);
    }
}
