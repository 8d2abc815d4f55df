use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Terminator, Writer, WriterBuilder};
use log::{debug, info};

use crate::error::GenError;
use crate::value::Value;

pub const DEFAULT_OUTPUT_FILE: &str = "data100000000.txt";

const BUFFER_CAPACITY: usize = 1 << 16;

/// Writes [Value]s as newline-delimited text, one value per line.
#[derive(Debug)]
pub struct ValueWriter<W: io::Write> {
    writer: Writer<W>,
    written: u64,
}

fn builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .buffer_capacity(BUFFER_CAPACITY);
    builder
}

impl ValueWriter<File> {
    /// Creates the file at `path`, truncating it if it already exists.
    ///
    /// # Errors
    /// Errors when the file cannot be created
    pub fn create(path: impl AsRef<Path>) -> Result<Self, GenError> {
        let path = path.as_ref();
        info!("Writing values to {}", path.display());
        Ok(ValueWriter {
            writer: builder().from_path(path)?,
            written: 0,
        })
    }
}

impl<W: io::Write> ValueWriter<W> {
    #[must_use]
    pub fn from_writer(writer: W) -> Self {
        ValueWriter {
            writer: builder().from_writer(writer),
            written: 0,
        }
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_value(&mut self, value: Value) -> Result<(), GenError> {
        self.writer.serialize(value)?;
        self.written += 1;
        Ok(())
    }

    /// Writes every value in order and returns how many were written by this call.
    ///
    /// # Errors
    /// Stops at the first failed write; earlier lines are left in place
    pub fn write_all(&mut self, values: impl IntoIterator<Item = Value>) -> Result<u64, GenError> {
        let before = self.written;
        for value in values {
            self.write_value(value)?;
        }
        Ok(self.written - before)
    }

    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes buffered lines and returns the total number of values written.
    ///
    /// # Errors
    /// Errors when the flush fails, e.g. the disk is full
    pub fn finish(mut self) -> Result<u64, GenError> {
        self.writer.flush()?;
        debug!("Flushed {} values", self.written);
        Ok(self.written)
    }
}

/// Creates (or truncates) `path` and writes all `values` to it.
///
/// # Errors
/// Errors when the file cannot be created or written
pub fn write_values_to_path(
    path: impl AsRef<Path>,
    values: impl IntoIterator<Item = Value>,
) -> Result<u64, GenError> {
    let mut writer = ValueWriter::create(path)?;
    writer.write_all(values)?;
    writer.finish()
}
