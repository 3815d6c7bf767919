pub mod build_command;
pub mod build_database_command;
pub mod build_index_command;

use crate::cli::command::build::build_command::BuildCommand;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct BuildArgs {
    #[clap(subcommand)]
    pub command: BuildCommand,
}

impl BuildArgs {
    /// # Errors
    ///
    /// Returns an error if the build fails.
    pub fn invoke(self) -> eyre::Result<()> {
        self.command.invoke()
    }
}

impl ToArgs for BuildArgs {
    fn to_args(&self) -> Vec<OsString> {
        self.command.to_args()
    }
}
