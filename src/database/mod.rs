//! The photo metadata database: every key ever indexed, grouped by label.

mod id_set;
mod label;

pub use id_set::*;
pub use label::*;

use crate::atomic_file::write_replacing;
use crate::error::Error;
use crate::error::Result;
use crate::index::Record;
use chrono::Local;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Title given to databases created from scratch.
pub const DEFAULT_TITLE: &str = "My Photo Archive";

/// `Mon Jan  2 2006 15:04:05`
const CREATED_FORMAT: &str = "%a %b %e %Y %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created: String,
    /// Where this database is saved.
    #[serde(default)]
    pub filepath: String,
    /// The index it was last built from.
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub ids: IdSet,
    #[serde(default)]
    pub labels: BTreeMap<String, IdSet>,
}

impl Database {
    pub fn new(title: impl Into<String>, filepath: &Path, index: &Path) -> Self {
        Self {
            title: title.into(),
            created: Local::now().format(CREATED_FORMAT).to_string(),
            filepath: filepath.to_string_lossy().into_owned(),
            index: index.to_string_lossy().into_owned(),
            ids: IdSet::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Load the database saved at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no file, [`Error::Io`] if it
    /// cannot be read and [`Error::MalformedPersisted`] if it is not a
    /// database document.
    pub fn load(path: &Path) -> Result<Database> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::io(path, e),
        })?;
        debug!(bytes = bytes.len(), "Read database {}", path.display());

        let mut db: Database =
            serde_json::from_slice(&bytes).map_err(|source| Error::MalformedPersisted {
                path: path.to_path_buf(),
                source,
            })?;
        db.filepath = path.to_string_lossy().into_owned();
        Ok(db)
    }

    /// Load the database at `path`, or start a fresh one if there is no file.
    ///
    /// A loaded database keeps its title, creation time, ids and labels; its
    /// `filepath` and `index` are pointed at `path` and `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read and
    /// [`Error::MalformedPersisted`] if it is not a database document.
    pub fn load_or_init(path: &Path, index: &Path) -> Result<Database> {
        let mut db = match Database::load(path) {
            Ok(db) => db,
            Err(Error::NotFound(_)) => {
                info!("Database {} does not exist, creating", path.display());
                return Ok(Database::new(DEFAULT_TITLE, path, index));
            }
            Err(e) => return Err(e),
        };
        db.index = index.to_string_lossy().into_owned();
        Ok(db)
    }

    /// Fold one index record into the database.
    ///
    /// The key always lands in `ids`. A datetime that is present but cannot be
    /// parsed is logged and leaves the record unlabeled.
    pub fn process_record(&mut self, record: &Record) {
        let labels = date_labels(&record.datetime);
        self.ids.insert(record.key.as_str());

        match labels {
            Ok(DateLabels::Dated { year, month }) => {
                self.label(year, &record.key);
                self.label(month, &record.key);
            }
            Ok(DateLabels::Undated) => self.label(UNDATED.to_string(), &record.key),
            Err(e) => warn!(
                key = %record.key,
                "Error decoding datetime {:?} from index: {e}",
                record.datetime
            ),
        }
    }

    /// Fold every record in order.
    pub fn process_records<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        for record in records {
            self.process_record(record);
        }
    }

    fn label(&mut self, label: String, key: &str) {
        self.labels.entry(label).or_default().insert(key);
    }

    /// Keys carrying `label`, if the label exists.
    #[must_use]
    pub fn label_ids(&self, label: &str) -> Option<&IdSet> {
        self.labels.get(label)
    }

    /// Pretty-printed JSON for the whole database.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot happen for string-keyed maps.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the database to its `filepath`, replacing the previous file
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the database has no path and
    /// [`Error::Io`] if writing fails.
    pub fn save(&self) -> Result<()> {
        if self.filepath.is_empty() {
            return Err(Error::InvalidArgument(
                "database has no file path to save to".to_string(),
            ));
        }
        let path = PathBuf::from(&self.filepath);
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| Error::io(&path, std::io::Error::other(e)))?;
        write_replacing(&path, &json)?;
        debug!(
            ids = self.ids.len(),
            labels = self.labels.len(),
            "Saved database {}",
            path.display()
        );
        Ok(())
    }
}
