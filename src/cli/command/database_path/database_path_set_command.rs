use crate::app_home::APP_HOME;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::database_path::DatabasePath;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;

/// Set the default database path
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct DatabasePathSetArgs {
    /// Database file to use when --database is not given
    #[arbitrary(with = arbitrary_path)]
    pub path: PathBuf,
}

impl DatabasePathSetArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        let path = std::path::absolute(&self.path)?;
        DatabasePath::set_to(&APP_HOME, &path)?;
        info!("Database path set to {}", path.display());
        Ok(())
    }
}

impl ToArgs for DatabasePathSetArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![self.path.clone().into()]
    }
}
