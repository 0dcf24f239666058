use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::{account::AccountId, customer::CustomerId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("amount must be greater than zero, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("insufficient funds: balance is {available}, tried to withdraw {requested}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("amount {amount} is too large to keep two decimal places")]
    AmountOutOfRange { amount: Decimal },
    #[error("initial balance cannot be negative, got {amount}")]
    NegativeInitialBalance { amount: Decimal },
    #[error("customer name cannot be empty")]
    InvalidName,
    #[error("invalid national id: {national_id}")]
    InvalidNationalId { national_id: String },
    #[error("date of birth {date_of_birth} is in the future")]
    InvalidDateOfBirth { date_of_birth: NaiveDate },
    #[error("account does not exist")]
    NullAccount,
    #[error("account {account} already belongs to this customer")]
    DuplicateAccount { account: AccountId },
    #[error("account {account} is already owned by customer {owner}")]
    OwnershipConflict {
        account: AccountId,
        owner: CustomerId,
    },
    #[error("customer {customer} does not exist")]
    UnknownCustomer { customer: CustomerId },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn messages_carry_the_offending_values() {
        let err = Error::InsufficientFunds {
            requested: dec!(5000),
            available: dec!(1349.75),
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: balance is 1349.75, tried to withdraw 5000"
        );

        let err = Error::InvalidNationalId {
            national_id: "123.456.789-00".to_string(),
        };
        assert_eq!(err.to_string(), "invalid national id: 123.456.789-00");
    }
}
