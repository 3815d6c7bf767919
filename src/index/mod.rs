mod builder;
mod csv_row;
mod record;

pub use builder::*;
pub use record::*;

use crate::atomic_file::write_replacing;
use crate::error::Error;
use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Ordered records, one per indexed file, in walk order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Index {
    records: Vec<Record>,
}

impl Index {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read an index CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::MalformedIndex`] if a row is not exactly four fields.
    pub fn load(path: &Path) -> Result<Index> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let rows = csv_row::parse_rows(&text).map_err(|e| Error::MalformedIndex {
            path: path.to_path_buf(),
            line: e.line,
            reason: e.reason,
        })?;

        let mut index = Index::new();
        for row in rows {
            let line = row.line;
            let found = row.fields.len();
            let record = Record::from_fields(row.fields).ok_or_else(|| Error::MalformedIndex {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {} fields, found {found}", Record::FIELD_COUNT),
            })?;
            index.push(record);
        }
        debug!(path = %path.display(), records = index.len(), "Loaded index");
        Ok(index)
    }

    /// Write every record as CSV.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for record in &self.records {
            writer.write_all(record.to_csv_row().as_bytes())?;
        }
        writer.flush()
    }

    /// Persist the index to `path`, replacing any previous file only once the
    /// new content is fully written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut data = Vec::new();
        self.write_to(&mut data).map_err(|e| Error::io(path, e))?;
        write_replacing(path, &data)
    }
}

/// Write records as CSV rows as they arrive, stopping at the first error.
/// Returns how many rows were written.
///
/// # Errors
///
/// Returns the first error yielded by `records`, or [`Error::Io`] naming
/// `destination` if writing fails.
pub fn stream_records<W: Write>(
    records: impl IntoIterator<Item = Result<Record>>,
    mut writer: W,
    destination: &Path,
) -> Result<usize> {
    let mut written = 0;
    for record in records {
        let row = record?.to_csv_row();
        writer
            .write_all(row.as_bytes())
            .map_err(|e| Error::io(destination, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| Error::io(destination, e))?;
    Ok(written)
}

impl IntoIterator for Index {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Index {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Index {
            records: iter.into_iter().collect(),
        }
    }
}
