//! Append-only identifier sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::BallchasingError;

/// Append-only receiver for replay ids discovered during a windowed fetch.
///
/// The fetcher flushes once per completed sub-window, passing only that
/// window's new ids. This bounds memory on very long fetches and leaves
/// partial progress behind when a fetch aborts; resuming from a partial sink
/// is the caller's responsibility.
pub trait IdSink {
    /// Persist one window's worth of ids.
    fn flush(&mut self, ids: &[String]) -> io::Result<()>;
}

/// In-memory sink, mostly useful for tests and small fetches.
impl IdSink for Vec<String> {
    fn flush(&mut self, ids: &[String]) -> io::Result<()> {
        self.extend_from_slice(ids);
        Ok(())
    }
}

/// A `.csv` file appender writing one replay id per record.
#[derive(Debug)]
pub struct CsvSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl CsvSink {
    /// Open a `.csv` file for appending, creating it if necessary.
    ///
    /// The path must end in `.csv`; anything else is a validation error,
    /// raised before any network activity when used with the fetcher.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BallchasingError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            return Err(BallchasingError::Validation(format!(
                "output file path must end '.csv', got {}",
                path.display()
            )));
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                BallchasingError::Validation(format!("cannot open {}: {e}", path.display()))
            })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// The path this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdSink for CsvSink {
    fn flush(&mut self, ids: &[String]) -> io::Result<()> {
        for id in ids {
            writeln!(self.writer, "{id}")?;
        }
        self.writer.flush()
    }
}
