pub mod account;
pub mod bank;
pub mod clock;
pub mod customer;
pub mod error;
pub mod money;
pub mod national_id;
pub mod transaction;

mod sequence;
