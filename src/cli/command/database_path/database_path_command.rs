use crate::cli::command::database_path::database_path_reset_command::DatabasePathResetArgs;
use crate::cli::command::database_path::database_path_set_command::DatabasePathSetArgs;
use crate::cli::command::database_path::database_path_show_command::DatabasePathShowArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Clone, Arbitrary, PartialEq, Debug)]
pub enum DatabasePathCommand {
    /// Show the default database path
    Show(DatabasePathShowArgs),

    /// Set the default database path
    Set(DatabasePathSetArgs),

    /// Reset the default database path and write it to the config file
    Reset(DatabasePathResetArgs),
}

impl DatabasePathCommand {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or written.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            DatabasePathCommand::Show(args) => args.invoke(),
            DatabasePathCommand::Set(args) => args.invoke(),
            DatabasePathCommand::Reset(args) => args.invoke(),
        }
    }
}

impl ToArgs for DatabasePathCommand {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            DatabasePathCommand::Show(a) => {
                args.push("show".into());
                args.extend(a.to_args());
            }
            DatabasePathCommand::Set(a) => {
                args.push("set".into());
                args.extend(a.to_args());
            }
            DatabasePathCommand::Reset(a) => {
                args.push("reset".into());
                args.extend(a.to_args());
            }
        }
        args
    }
}
