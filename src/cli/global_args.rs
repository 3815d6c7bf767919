use crate::cli::arbitrary_values::arbitrary_optional_path;
use crate::cli::json_log_behaviour::JsonLogBehaviour;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::Level;

#[derive(Args, Arbitrary, PartialEq, Debug, Default)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[clap(long, global = true)]
    pub debug: bool,

    /// Emit logs on stderr as JSON
    #[clap(long, global = true)]
    pub json: bool,

    /// Also write JSON logs to this file (takes precedence over --json)
    #[clap(long, global = true, value_name = "FILE")]
    #[arbitrary(with = arbitrary_optional_path)]
    pub log_file: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn log_level(&self) -> Level {
        if self.debug { Level::DEBUG } else { Level::INFO }
    }

    #[must_use]
    pub fn json_log_behaviour(&self) -> JsonLogBehaviour {
        match (&self.log_file, self.json) {
            (Some(path), _) => JsonLogBehaviour::File(path.clone()),
            (None, true) => JsonLogBehaviour::Stderr,
            (None, false) => JsonLogBehaviour::None,
        }
    }
}

impl ToArgs for GlobalArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.debug {
            args.push("--debug".into());
        }
        if self.json {
            args.push("--json".into());
        }
        if let Some(path) = &self.log_file {
            args.push("--log-file".into());
            args.push(path.into());
        }
        args
    }
}
