use std::ffi::OsString;

/// Turn parsed arguments back into the command line that produces them.
pub trait ToArgs {
    fn to_args(&self) -> Vec<OsString>;
}
