pub mod database_path_command;
pub mod database_path_reset_command;
pub mod database_path_set_command;
pub mod database_path_show_command;

use crate::cli::command::database_path::database_path_command::DatabasePathCommand;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct DatabasePathArgs {
    #[clap(subcommand)]
    pub command: DatabasePathCommand,
}

impl DatabasePathArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or written.
    pub fn invoke(self) -> eyre::Result<()> {
        self.command.invoke()
    }
}

impl ToArgs for DatabasePathArgs {
    fn to_args(&self) -> Vec<OsString> {
        self.command.to_args()
    }
}
