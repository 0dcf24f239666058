//! Personal banking ledger: customers, accounts, and the deposit/withdrawal
//! statement every balance is derived from.

pub mod batch;
pub mod csv;
pub mod domain;
pub mod error;
