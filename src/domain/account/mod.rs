use std::{collections::HashMap, fmt};

use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{
    customer::{Customer, CustomerId},
    error::{Error, Result},
    money,
    sequence::Sequence,
    transaction::{Transaction, TransactionKind},
};

static ACCOUNT_IDS: Sequence = Sequence::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AccountId(u64);

impl AccountId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A balance plus the append-only statement that explains it.
///
/// `balance == opening_balance + sum(statement amounts)` holds after every
/// operation; [`Account::deposit`] and [`Account::withdraw`] are the only ways
/// to move it.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    owner: Option<CustomerId>,
    opening_balance: Decimal,
    balance: Decimal,
    statement: Vec<Transaction>,
}

impl Account {
    /// Opens an account for `owner` and registers it in the owner's list.
    ///
    /// The id is only drawn once the initial balance passed validation.
    pub fn open(owner: &mut Customer, initial_balance: Decimal) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::NegativeInitialBalance {
                amount: initial_balance,
            });
        }

        let opening_balance = money::normalize(initial_balance)?;
        let mut account = Self {
            id: AccountId(ACCOUNT_IDS.next()),
            owner: None,
            opening_balance,
            balance: opening_balance,
            statement: Vec::new(),
        };

        owner.attach_account(&mut account)?;

        Ok(account)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner(&self) -> Option<CustomerId> {
        self.owner
    }

    pub(super) fn assign_owner(&mut self, owner: CustomerId) {
        self.owner = Some(owner);
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Entries oldest first.
    pub fn statement(&self) -> &[Transaction] {
        &self.statement
    }

    /// Fails with [`Error::AmountOutOfRange`] when the new balance could not
    /// keep two decimal places; the account is left as it was.
    pub fn deposit(&mut self, amount: Decimal) -> Result<&Transaction> {
        let tx = Transaction::deposit(amount)?;
        self.record(tx)
    }

    /// Withdrawing the whole balance is allowed and leaves it at zero.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<&Transaction> {
        let requested = money::positive(amount)?;

        if requested > self.balance {
            return Err(Error::InsufficientFunds {
                requested,
                available: self.balance,
            });
        }

        let tx = Transaction::withdrawal(requested)?;
        self.record(tx)
    }

    fn record(&mut self, tx: Transaction) -> Result<&Transaction> {
        self.balance = money::add(self.balance, tx.amount())?;
        self.statement.push(tx);

        match self.statement.last() {
            Some(tx) => Ok(tx),
            None => unreachable!("statement was just appended to"),
        }
    }

    /// Rebuilds the balance from the opening balance and the statement alone.
    pub fn replayed_balance(&self) -> Decimal {
        self.balance_history()
            .last()
            .copied()
            .unwrap_or(self.opening_balance)
    }

    pub fn is_consistent(&self) -> bool {
        self.replayed_balance() == self.balance
    }

    /// Balance right after each statement entry, in statement order.
    ///
    /// Replays the entries in the order they were recorded, so every
    /// intermediate value is one the account already held.
    pub fn balance_history(&self) -> Vec<Decimal> {
        self.statement
            .iter()
            .scan(self.opening_balance, |running, tx| {
                *running = money::add(*running, tx.amount()).ok()?;
                Some(*running)
            })
            .collect()
    }

    /// Signed sum of the statement per transaction kind. Kinds with no
    /// entries are absent.
    pub fn totals(&self) -> HashMap<TransactionKind, Decimal> {
        self.statement
            .iter()
            .map(|tx| (tx.kind(), tx.amount()))
            .into_grouping_map()
            .sum()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account {} balance {} ({} transactions)",
            self.id,
            self.balance,
            self.statement.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn owner() -> Customer {
        let born = NaiveDate::from_ymd_opt(1990, 1, 31).unwrap();
        Customer::create("Ana Souza", "529.982.247-25", born).unwrap()
    }

    fn account(initial: Decimal) -> Account {
        Account::open(&mut owner(), initial).unwrap()
    }

    #[test]
    fn open_rounds_initial_balance() {
        let account = account(dec!(1000.005));

        assert_eq!(account.balance(), dec!(1000.00));
        assert_eq!(account.opening_balance(), dec!(1000.00));
        assert!(account.statement().is_empty());
    }

    #[test]
    fn open_rejects_negative_initial_balance() {
        let mut owner = owner();
        let err = Account::open(&mut owner, dec!(-0.01)).unwrap_err();

        assert_eq!(
            err,
            Error::NegativeInitialBalance {
                amount: dec!(-0.01)
            }
        );
        assert!(owner.accounts().is_empty());
    }

    #[test]
    fn open_accepts_zero_initial_balance() {
        assert_eq!(account(dec!(0)).balance(), dec!(0.00));
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let ids: Vec<_> = (0..5).map(|_| account(dec!(1)).id()).collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn deposit_and_withdraw_follow_the_statement() {
        let mut account = account(dec!(1000.00));

        account.deposit(dec!(750.50)).unwrap();
        assert_eq!(account.balance(), dec!(1750.50));

        let tx = account.withdraw(dec!(400.75)).unwrap();
        assert_eq!(tx.amount(), dec!(-400.75));
        assert_eq!(account.balance(), dec!(1349.75));

        assert_eq!(account.statement().len(), 2);
        assert!(account.is_consistent());
        assert_eq!(account.balance_history(), vec![dec!(1750.50), dec!(1349.75)]);
    }

    #[test]
    fn withdrawing_entire_balance_drains_to_zero() {
        let mut account = account(dec!(250.30));

        account.withdraw(dec!(250.30)).unwrap();

        assert_eq!(account.balance(), dec!(0.00));
        assert_eq!(account.statement().len(), 1);
    }

    #[test]
    fn overdraw_leaves_account_untouched() {
        let mut account = account(dec!(100));
        account.deposit(dec!(1)).unwrap();

        let err = account.withdraw(dec!(101.01)).unwrap_err();

        assert_eq!(
            err,
            Error::InsufficientFunds {
                requested: dec!(101.01),
                available: dec!(101.00)
            }
        );
        assert_eq!(account.balance(), dec!(101.00));
        assert_eq!(account.statement().len(), 1);
    }

    #[test]
    fn withdrawal_is_compared_after_rounding() {
        let mut account = account(dec!(10));

        // 10.004 rounds to 10.00, which the balance covers
        account.withdraw(dec!(10.004)).unwrap();
        assert_eq!(account.balance(), dec!(0.00));
    }

    #[test]
    fn invalid_amounts_leave_account_untouched() {
        let mut account = account(dec!(1000));

        for amount in [dec!(0), dec!(-5000)] {
            assert_eq!(
                account.deposit(amount).unwrap_err(),
                Error::InvalidAmount { amount }
            );
            assert_eq!(
                account.withdraw(amount).unwrap_err(),
                Error::InvalidAmount { amount }
            );
        }

        assert_eq!(account.balance(), dec!(1000.00));
        assert!(account.statement().is_empty());
    }

    #[test]
    fn open_rejects_balance_that_cannot_keep_cents() {
        let mut owner = owner();
        let err = Account::open(&mut owner, Decimal::MAX).unwrap_err();

        assert_eq!(
            err,
            Error::AmountOutOfRange {
                amount: Decimal::MAX
            }
        );
        assert!(owner.accounts().is_empty());
    }

    #[test]
    fn oversized_deposit_is_rejected_without_panicking() {
        let mut account = account(dec!(1));

        assert_eq!(
            account.deposit(Decimal::MAX).unwrap_err(),
            Error::AmountOutOfRange {
                amount: Decimal::MAX
            }
        );
        account.deposit(dec!(1)).unwrap();

        assert_eq!(account.balance(), dec!(2.00));
        assert_eq!(account.statement().len(), 1);
    }

    #[test]
    fn deposit_overflowing_the_balance_leaves_account_untouched() {
        let big = money::normalize(Decimal::MAX / dec!(200)).unwrap();
        let mut account = account(big);

        let err = account.deposit(big).unwrap_err();

        assert_eq!(err, Error::AmountOutOfRange { amount: big });
        assert_eq!(account.balance(), big);
        assert_eq!(account.balance().scale(), money::SCALE);
        assert!(account.statement().is_empty());
        assert!(account.is_consistent());

        account.withdraw(big).unwrap();
        assert_eq!(account.balance(), dec!(0.00));
    }

    #[test]
    fn totals_split_by_kind() {
        let mut account = account(dec!(0));
        account.deposit(dec!(100)).unwrap();
        account.deposit(dec!(50.25)).unwrap();
        account.withdraw(dec!(30)).unwrap();

        let totals = account.totals();

        assert_eq!(totals[&TransactionKind::Deposit], dec!(150.25));
        assert_eq!(totals[&TransactionKind::Withdrawal], dec!(-30.00));
        assert_eq!(account.balance(), dec!(120.25));
    }

    #[test]
    fn empty_statement_has_no_totals() {
        assert!(account(dec!(5)).totals().is_empty());
    }
}
