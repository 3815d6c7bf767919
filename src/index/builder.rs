use crate::error::Error;
use crate::error::Result;
use crate::index::Index;
use crate::index::Record;
use crate::key::derive_key;
use crate::photo_metadata::PhotoMetadata;
use crate::thumbnail::ImageCodec;
use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Name of the per-directory thumbnail folder. Directories with this name are
/// never indexed.
pub const THUMBS_DIR_NAME: &str = "thumbs";
/// Inserted between a photo's stem and extension to name its thumbnail.
pub const THUMB_SUFFIX: &str = "_thumb";

/// What to do when a single file cannot be indexed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the walk at the first failure.
    #[default]
    Abort,
    /// Log the failure, remember it, and keep walking.
    Continue,
}

/// Walks a photo tree and produces its index, writing thumbnails as it goes.
#[derive(Clone, Debug)]
pub struct IndexBuilder {
    root: PathBuf,
    policy: FailurePolicy,
}

impl IndexBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start a lazy walk over the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty root and
    /// [`Error::NotFound`] if the root is not an existing directory. Nothing is
    /// traversed in either case.
    pub fn walk(&self) -> Result<IndexWalk> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "empty root directory given to the index builder".to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(Error::NotFound(self.root.clone()));
        }

        let entries = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(not_thumbs_dir as fn(&DirEntry) -> bool);
        Ok(IndexWalk {
            entries,
            prepared_dirs: HashSet::new(),
            policy: self.policy,
            failures: Vec::new(),
            finished: false,
        })
    }

    /// Walk the whole tree and collect the records.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::Abort`], returns the first failure. With
    /// [`FailurePolicy::Continue`] only precondition failures are returned;
    /// use [`IndexBuilder::walk`] to inspect per-file failures.
    pub fn build(&self) -> Result<Index> {
        self.walk()?.collect()
    }
}

fn not_thumbs_dir(entry: &DirEntry) -> bool {
    !(entry.file_type().is_dir() && entry.file_name() == THUMBS_DIR_NAME)
}

type Entries = walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

/// A walk in progress. Yields one record per supported image, in lexical
/// order.
///
/// Owns the set of directories whose `thumbs` folder has already been
/// prepared, so separate walks never share state.
pub struct IndexWalk {
    entries: Entries,
    prepared_dirs: HashSet<PathBuf>,
    policy: FailurePolicy,
    failures: Vec<Error>,
    finished: bool,
}

impl std::fmt::Debug for IndexWalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexWalk")
            .field("prepared_dirs", &self.prepared_dirs)
            .field("policy", &self.policy)
            .field("failures", &self.failures)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl IndexWalk {
    /// Failures skipped under [`FailurePolicy::Continue`].
    #[must_use]
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Error> {
        self.failures
    }

    fn visit(&mut self, entry: &DirEntry) -> Option<Result<Record>> {
        if entry.file_type().is_dir() {
            return None;
        }
        let path = entry.path();
        let Ok(codec) = ImageCodec::try_from(path) else {
            return None;
        };
        Some(self.index_file(path, codec))
    }

    fn index_file(&mut self, path: &Path, codec: ImageCodec) -> Result<Record> {
        // The key and the filepath column must agree byte for byte.
        let filepath = path
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;
        let key = derive_key(filepath);
        let thumbs_dir = self.prepare_thumbs_dir(path)?;

        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut reader = BufReader::new(file);
        let metadata = PhotoMetadata::read_from(&mut reader);
        let datetime = metadata.datetime_or_sentinel();

        let data = match metadata.embedded_thumbnail {
            Some(data) => data,
            None => {
                reader
                    .seek(SeekFrom::Start(0))
                    .map_err(|e| Error::io(path, e))?;
                codec
                    .synthesize(reader)
                    .map_err(|e| Error::ThumbnailUnavailable {
                        path: path.to_path_buf(),
                        source: Box::new(e),
                    })?
            }
        };

        let thumb_path = thumbs_dir.join(thumb_file_name(path));
        fs::write(&thumb_path, &data).map_err(|e| Error::io(&thumb_path, e))?;

        debug!(
            key = %key,
            path = %path.display(),
            thumb = %thumb_path.display(),
            datetime = %datetime,
            "Indexed photo"
        );
        Ok(Record {
            key,
            filepath: filepath.to_string(),
            thumbpath: thumb_path.to_string_lossy().into_owned(),
            datetime,
        })
    }

    /// Create `<dir>/thumbs` the first time a photo from `dir` is seen.
    fn prepare_thumbs_dir(&mut self, photo: &Path) -> Result<PathBuf> {
        let dir = photo.parent().unwrap_or_else(|| Path::new(""));
        let thumbs_dir = dir.join(THUMBS_DIR_NAME);
        if !self.prepared_dirs.contains(dir) {
            match fs::create_dir(&thumbs_dir) {
                Ok(()) => debug!(dir = %thumbs_dir.display(), "Created thumbnail directory"),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(Error::io(&thumbs_dir, e)),
            }
            self.prepared_dirs.insert(dir.to_path_buf());
        }
        Ok(thumbs_dir)
    }
}

impl Iterator for IndexWalk {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let outcome = match self.entries.next()? {
                Ok(entry) => match self.visit(&entry) {
                    Some(outcome) => outcome,
                    None => continue,
                },
                Err(e) => Err(Error::Walk(e)),
            };
            match (outcome, self.policy) {
                (Ok(record), _) => return Some(Ok(record)),
                (Err(e), FailurePolicy::Abort) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                (Err(e), FailurePolicy::Continue) => {
                    warn!("Skipping after failure: {e}");
                    self.failures.push(e);
                }
            }
        }
        None
    }
}

/// `<stem>_thumb<.ext>`, keeping the original extension's case.
#[must_use]
pub fn thumb_file_name(photo: &Path) -> String {
    let stem = photo.file_stem().unwrap_or_default().to_string_lossy();
    match photo.extension() {
        Some(ext) => format!("{stem}{THUMB_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{THUMB_SUFFIX}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn thumb_names_keep_extension_case() {
        assert_eq!(thumb_file_name(Path::new("/p/CIMG0024.JPG")), "CIMG0024_thumb.JPG");
        assert_eq!(thumb_file_name(Path::new("a.b.tif")), "a.b_thumb.tif");
    }

    #[test]
    fn empty_root_is_invalid() {
        assert!(matches!(
            IndexBuilder::new("").walk(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_root_is_not_found() {
        let td = tempdir().unwrap();
        let missing = td.path().join("nope");
        assert!(matches!(
            IndexBuilder::new(&missing).walk(),
            Err(Error::NotFound(p)) if p == missing
        ));
    }

    #[test]
    fn file_root_is_not_found() {
        let td = tempdir().unwrap();
        let file = td.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(IndexBuilder::new(&file).walk(), Err(Error::NotFound(_))));
    }

    #[test]
    fn prepared_dirs_are_per_walk() {
        let td = tempdir().unwrap();
        let photo = td.path().join("a.jpg");
        let builder = IndexBuilder::new(td.path());

        let mut first = builder.walk().unwrap();
        first.prepare_thumbs_dir(&photo).unwrap();
        assert!(td.path().join(THUMBS_DIR_NAME).is_dir());
        assert_eq!(first.prepared_dirs.len(), 1);

        let mut second = builder.walk().unwrap();
        assert!(second.prepared_dirs.is_empty());
        // already on disk from the first walk
        second.prepare_thumbs_dir(&photo).unwrap();
        assert_eq!(second.prepared_dirs.len(), 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_path_is_rejected_before_any_write() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let td = tempdir().unwrap();
        let bad = td.path().join(OsStr::from_bytes(b"caf\xe9.jpg"));
        fs::write(&bad, b"x").unwrap();

        let mut walk = IndexBuilder::new(td.path()).walk().unwrap();
        assert!(matches!(walk.next(), Some(Err(Error::NonUtf8Path(p))) if p == bad));
        assert!(walk.next().is_none());
        assert!(!td.path().join(THUMBS_DIR_NAME).exists());
    }

    #[test]
    fn unsupported_files_yield_nothing() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("notes.txt"), b"hello").unwrap();
        fs::write(td.path().join("anim.gif"), b"GIF89a").unwrap();
        let index = IndexBuilder::new(td.path()).build().unwrap();
        assert!(index.is_empty());
        assert!(!td.path().join(THUMBS_DIR_NAME).exists());
    }
}
