//! Generators for argument values that must survive a trip through the
//! command line: non-empty paths and titles that never look like flags.

use arbitrary::Unstructured;
use std::path::PathBuf;

/// # Errors
///
/// Returns an error if the input is exhausted mid-choice.
pub fn arbitrary_path(u: &mut Unstructured<'_>) -> arbitrary::Result<PathBuf> {
    let n = u.int_in_range(0..=9999_u16)?;
    let ext = *u.choose(&["jpg", "csv", "json", "d"])?;
    Ok(PathBuf::from(format!("photos/item-{n}.{ext}")))
}

/// # Errors
///
/// Returns an error if the input is exhausted mid-choice.
pub fn arbitrary_optional_path(u: &mut Unstructured<'_>) -> arbitrary::Result<Option<PathBuf>> {
    if u.arbitrary()? {
        Ok(Some(arbitrary_path(u)?))
    } else {
        Ok(None)
    }
}

/// # Errors
///
/// Returns an error if the input is exhausted mid-choice.
pub fn arbitrary_optional_title(u: &mut Unstructured<'_>) -> arbitrary::Result<Option<String>> {
    if u.arbitrary()? {
        let word = *u.choose(&["Family", "Holidays", "My Photo Archive", "Scans 1998"])?;
        Ok(Some(word.to_string()))
    } else {
        Ok(None)
    }
}
