use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};
use log::info;

use crate::error::GenError;
use crate::value::Value;

/// Reads back files produced by [`ValueWriter`](crate::writer::ValueWriter).
#[derive(Debug)]
pub struct ValueReader<R: io::Read> {
    reader: Reader<R>,
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).trim(Trim::All).flexible(true);
    builder
}

impl ValueReader<File> {
    /// # Errors
    /// Errors when the file cannot be opened
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GenError> {
        let path = path.as_ref();
        info!("Reading values from {}", path.display());
        Ok(ValueReader {
            reader: builder().from_path(path)?,
        })
    }
}

impl<R: io::Read> ValueReader<R> {
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        ValueReader {
            reader: builder().from_reader(reader),
        }
    }

    /// One result per non-empty line, in file order
    pub fn values(&mut self) -> impl Iterator<Item = Result<Value, GenError>> + '_ {
        self.reader
            .deserialize::<Value>()
            .map(|res| res.map_err(GenError::from))
    }
}

/// Reads every value in `path`, failing on the first malformed line.
///
/// # Errors
/// Errors when the file cannot be read or a line is not a valid value
pub fn read_values(path: impl AsRef<Path>) -> Result<Vec<Value>, GenError> {
    ValueReader::from_path(path)?.values().collect()
}
