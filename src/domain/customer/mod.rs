use std::fmt;

use chrono::NaiveDate;

use super::{
    account::{Account, AccountId},
    error::{Error, Result},
    clock,
    national_id::NationalId,
    sequence::Sequence,
};

static CUSTOMER_IDS: Sequence = Sequence::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct Customer {
    id: CustomerId,
    name: String,
    national_id: NationalId,
    date_of_birth: NaiveDate,
    accounts: Vec<AccountId>,
}

impl Customer {
    /// Validates the identity fields and returns a customer with no accounts.
    ///
    /// The name is stored trimmed; the national id is stored as given.
    pub fn create(name: &str, national_id: &str, date_of_birth: NaiveDate) -> Result<Self> {
        Self::create_as_of(name, national_id, date_of_birth, clock::today())
    }

    fn create_as_of(
        name: &str,
        national_id: &str,
        date_of_birth: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }

        let national_id = NationalId::parse(national_id)?;

        if date_of_birth > today {
            return Err(Error::InvalidDateOfBirth { date_of_birth });
        }

        Ok(Self {
            id: CustomerId(CUSTOMER_IDS.next()),
            name: name.to_string(),
            national_id,
            date_of_birth,
            accounts: Vec::new(),
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Accounts in the order they were attached.
    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn owns(&self, account: AccountId) -> bool {
        self.accounts.contains(&account)
    }

    /// Adds `account` to this customer and points its owner back here.
    ///
    /// Nothing changes on either side when the account is already listed or
    /// already owned by someone else.
    pub fn attach_account(&mut self, account: &mut Account) -> Result<()> {
        if self.owns(account.id()) {
            return Err(Error::DuplicateAccount {
                account: account.id(),
            });
        }

        if let Some(owner) = account.owner().filter(|owner| *owner != self.id) {
            return Err(Error::OwnershipConflict {
                account: account.id(),
                owner,
            });
        }

        self.accounts.push(account.id());
        account.assign_owner(self.id);

        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.national_id)
    }
}
