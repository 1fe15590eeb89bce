//! Append-only CSV output.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer, WriterBuilder};
use thiserror::Error;

use crate::forecast::{Forecast, ForecastRecord};

/// How the sink file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    /// Start a new file (truncating any existing one) and write a header row.
    Create,
    /// Add rows to the end of the file. A header is written only when the
    /// file is missing or empty.
    Append,
}

impl SinkMode {
    /// `Create` for a file that does not exist yet, `Append` otherwise.
    pub fn for_path(path: &Path) -> Self {
        if path.exists() {
            SinkMode::Append
        } else {
            SinkMode::Create
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Single-writer CSV sink for forecast rows.
pub struct CsvSink {
    writer: Writer<File>,
    mode: SinkMode,
}

impl CsvSink {
    pub fn open(path: impl AsRef<Path>, mode: SinkMode) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        match mode {
            SinkMode::Create => options.write(true).create(true).truncate(true),
            SinkMode::Append => options.append(true).create(true),
        };
        let io_err = |source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = options.open(path).map_err(io_err)?;
        let is_empty = file.metadata().map_err(io_err)?.len() == 0;

        let writer = WriterBuilder::new()
            .has_headers(mode == SinkMode::Create || is_empty)
            .from_writer(file);

        Ok(Self { writer, mode })
    }

    pub fn mode(&self) -> SinkMode {
        self.mode
    }

    /// Write every record of `forecast` and flush. Returns the row count.
    pub fn write_forecast(&mut self, forecast: &Forecast) -> Result<usize, SinkError> {
        self.write_records(forecast.records())
    }

    pub fn write_records(&mut self, records: &[ForecastRecord]) -> Result<usize, SinkError> {
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(records.len())
    }
}

/// Read a sink file back. The first line must be the header row.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ForecastRecord>, SinkError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<ForecastRecord>, _>>()?;
    Ok(records)
}
