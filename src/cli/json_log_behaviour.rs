use std::path::PathBuf;

/// Where structured (JSON) log lines go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum JsonLogBehaviour {
    /// Human readable logs on stderr only
    #[default]
    None,
    /// JSON logs on stderr instead of human readable ones
    Stderr,
    /// Human readable logs on stderr, JSON logs appended to a file
    File(PathBuf),
}
