use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Values must be between 1.0 and 100.1")]
    OutOfRange,
    #[error("Values may have at most one fractional digit")]
    TooPrecise,
    #[error("Not a finite decimal number")]
    InvalidFloat,
    #[error("No values to bin")]
    Empty,
}
