use thiserror::Error;

use crate::domain::error::Error as DomainError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not open operations file")]
    FileError(#[from] std::io::Error),
    #[error("could not read or write ledger CSV")]
    CsvError(#[from] csv::Error),
    #[error("operation {line} was rejected")]
    Rejected {
        line: usize,
        #[source]
        error: DomainError,
    },
    #[error(transparent)]
    BusinessError(#[from] DomainError),
}

pub type Result<T> = std::result::Result<T, Error>;
