use crate::app_home::APP_HOME;
use crate::cli::to_args::ToArgs;
use crate::database_path::DatabasePath;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

/// Show the default database path
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct DatabasePathShowArgs {}

impl DatabasePathShowArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or created.
    pub fn invoke(self) -> eyre::Result<()> {
        let path = DatabasePath::load(&APP_HOME)?;
        println!("{}", path.as_path().display());
        Ok(())
    }
}

impl ToArgs for DatabasePathShowArgs {
    fn to_args(&self) -> Vec<OsString> {
        Vec::new()
    }
}
