use crate::error::Error;
use crate::error::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Write `data` to a sibling temp file and rename it over `path`, so readers
/// see either the old content or the new, never a partial file. Missing
/// parent directories are created.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the path that could not be created, written or
/// renamed.
pub fn write_replacing(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let tmp = temp_sibling(path);
    fs::write(&tmp, data).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::io(path, e)
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
