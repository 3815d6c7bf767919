pub mod build;
pub mod database_path;
pub mod show;

use crate::cli::command::build::BuildArgs;
use crate::cli::command::database_path::DatabasePathArgs;
use crate::cli::command::show::show_command::ShowArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Arbitrary, PartialEq, Debug)]
pub enum Command {
    /// Build an index or a database
    Build(BuildArgs),

    /// Print the database (the default when no command is given)
    Show(ShowArgs),

    /// Default database location (show/set/reset)
    DatabasePath(DatabasePathArgs),
}
impl Default for Command {
    fn default() -> Self {
        Command::Show(ShowArgs::default())
    }
}

impl Command {
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            Command::Build(args) => args.invoke(),
            Command::Show(args) => args.invoke(),
            Command::DatabasePath(args) => args.invoke(),
        }
    }
}

impl ToArgs for Command {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            Command::Build(build_args) => {
                args.push("build".into());
                args.extend(build_args.to_args());
            }
            Command::Show(show_args) => {
                args.push("show".into());
                args.extend(show_args.to_args());
            }
            Command::DatabasePath(database_path_args) => {
                args.push("database-path".into());
                args.extend(database_path_args.to_args());
            }
        }
        args
    }
}
