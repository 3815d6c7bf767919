use crate::cli::command::build::build_database_command::BuildDatabaseArgs;
use crate::cli::command::build::build_index_command::BuildIndexArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Clone, Arbitrary, PartialEq, Debug)]
pub enum BuildCommand {
    /// Walk a photo directory, write thumbnails and emit an index CSV
    Index(BuildIndexArgs),

    /// Merge an index (or a freshly indexed directory) into the database
    Database(BuildDatabaseArgs),
}

impl BuildCommand {
    /// # Errors
    ///
    /// Returns an error if the selected build fails.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            BuildCommand::Index(args) => args.invoke(),
            BuildCommand::Database(args) => args.invoke(),
        }
    }
}

impl ToArgs for BuildCommand {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            BuildCommand::Index(a) => {
                args.push("index".into());
                args.extend(a.to_args());
            }
            BuildCommand::Database(a) => {
                args.push("database".into());
                args.extend(a.to_args());
            }
        }
        args
    }
}
