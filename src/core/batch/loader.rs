//! Batch loader
//!
//! Reads an identities CSV file into ordered raw rows. Any problem with the
//! file itself is fatal for the run and surfaces as [`BatchReadError`]
//! before a single row is processed.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fatal batch file errors
#[derive(Debug, Error)]
pub enum BatchReadError {
    #[error("Unable to open identities file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Identities file {} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Unable to parse identities file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Identities file {} has no header row", path.display())]
    MissingHeader { path: PathBuf },
}

/// One data row: column name to raw string value, in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    index: usize,
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new<K, V>(index: usize, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            index,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Zero-based data row position (the header is not counted)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of a column; column names are matched exactly.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column, treating a blank cell the same as a missing column
    pub fn non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.trim().is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", name, value)?;
        }
        f.write_str("}")
    }
}

/// Immutable, ordered contents of an identities file
#[derive(Debug, Clone)]
pub struct BatchFile {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl BatchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// CSV reader for identities files
#[derive(Debug, Clone, Default)]
pub struct BatchLoader;

impl BatchLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a batch file, echoing every row as it is read.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<BatchFile, BatchReadError> {
        let path = path.as_ref();
        info!("Loading identities from {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| BatchReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse(path, &bytes)
    }

    /// Parse batch file contents; `path` is only used for error messages.
    pub fn parse(&self, path: &Path, bytes: &[u8]) -> Result<BatchFile, BatchReadError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let content = std::str::from_utf8(bytes).map_err(|source| BatchReadError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());

        let format_error = |source: csv::Error| BatchReadError::Format {
            path: path.to_path_buf(),
            source,
        };

        let headers: Vec<String> = reader
            .headers()
            .map_err(format_error)?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(BatchReadError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
        debug!("Identities file columns: {:?}", headers);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(format_error)?;
            let row = Self::to_raw_row(index, &headers, &record);
            info!("{}", row);
            rows.push(row);
        }

        info!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(BatchFile {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    fn to_raw_row(index: usize, headers: &[String], record: &StringRecord) -> RawRow {
        RawRow::new(
            index,
            headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.as_str(), value)),
        )
    }
}
