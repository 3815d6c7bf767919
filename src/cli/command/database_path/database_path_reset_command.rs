use crate::app_home::APP_HOME;
use crate::cli::to_args::ToArgs;
use crate::database_path::DatabasePath;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

/// Reset the default database path and persist it to the config file
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct DatabasePathResetArgs {}

impl DatabasePathResetArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        let default = DatabasePath::reset(&APP_HOME)?;
        println!("Reset database path to default: {}", default.as_path().display());
        Ok(())
    }
}

impl ToArgs for DatabasePathResetArgs {
    fn to_args(&self) -> Vec<OsString> {
        Vec::new()
    }
}
