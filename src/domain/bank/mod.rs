use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{
    account::{Account, AccountId},
    customer::{Customer, CustomerId},
    error::{Error, Result},
    transaction::Transaction,
};

/// In-memory registry owning every customer and account by id.
///
/// Customers reference their accounts by [`AccountId`] and accounts point back
/// at their owner by [`CustomerId`], so neither side holds the other.
#[derive(Debug, Default)]
pub struct Bank {
    customers: BTreeMap<CustomerId, Customer>,
    accounts: BTreeMap<AccountId, Account>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_customer(&mut self, customer: Customer) -> CustomerId {
        let id = customer.id();
        info!(customer = %id, name = customer.name(), "registered customer");
        self.customers.insert(id, customer);
        id
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// All accounts, oldest id first.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn open_account(&mut self, owner: CustomerId, initial_balance: Decimal) -> Result<AccountId> {
        let customer = self
            .customers
            .get_mut(&owner)
            .ok_or(Error::UnknownCustomer { customer: owner })?;

        let account = Account::open(customer, initial_balance)?;
        let id = account.id();
        info!(account = %id, customer = %owner, balance = %account.balance(), "opened account");

        self.accounts.insert(id, account);
        Ok(id)
    }

    pub fn attach_account(&mut self, customer: CustomerId, account: AccountId) -> Result<()> {
        let owner = self
            .customers
            .get_mut(&customer)
            .ok_or(Error::UnknownCustomer { customer })?;
        let account = self.accounts.get_mut(&account).ok_or(Error::NullAccount)?;

        owner.attach_account(account)?;
        info!(account = %account.id(), customer = %customer, "attached account");

        Ok(())
    }

    /// Accounts of `customer` in the order they were attached.
    pub fn accounts_of(&self, customer: CustomerId) -> Result<Vec<&Account>> {
        let owner = self
            .customer(customer)
            .ok_or(Error::UnknownCustomer { customer })?;

        owner
            .accounts()
            .iter()
            .map(|id| self.account(*id).ok_or(Error::NullAccount))
            .collect()
    }

    pub fn deposit(&mut self, account: AccountId, amount: Decimal) -> Result<&Transaction> {
        let account = self.accounts.get_mut(&account).ok_or(Error::NullAccount)?;
        let id = account.id();

        let tx = account.deposit(amount)?;
        debug!(account = %id, amount = %tx.amount(), "recorded deposit");

        Ok(tx)
    }

    pub fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<&Transaction> {
        let account = self.accounts.get_mut(&account).ok_or(Error::NullAccount)?;
        let id = account.id();

        let tx = account.withdraw(amount)?;
        debug!(account = %id, amount = %tx.amount(), "recorded withdrawal");

        Ok(tx)
    }
}
