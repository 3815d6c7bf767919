use crate::cli::arbitrary_values::arbitrary_optional_path;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::index::FailurePolicy;
use crate::index::Index;
use crate::index::IndexBuilder;
use crate::index::stream_records;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;
use tracing::error;
use tracing::info;

/// Walk a photo directory, write thumbnails and emit an index CSV
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct BuildIndexArgs {
    /// Root directory of the photo archive
    #[clap(long, value_name = "DIR")]
    #[arbitrary(with = arbitrary_path)]
    pub from: PathBuf,

    /// Write the index to this file instead of stdout
    #[clap(long, value_name = "FILE")]
    #[arbitrary(with = arbitrary_optional_path)]
    pub output: Option<PathBuf>,

    /// Skip files that fail and report them all at the end
    #[clap(long)]
    pub keep_going: bool,
}

impl BuildIndexArgs {
    /// # Errors
    ///
    /// Returns an error if the root is unusable, a file fails to index (all
    /// failures, with `--keep-going`), or the index cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        let started = Instant::now();
        let root = canonical_root(&self.from);
        let policy = if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };
        let mut walk = IndexBuilder::new(&root)
            .with_failure_policy(policy)
            .walk()?;

        let written = match &self.output {
            Some(path) => {
                let index: Index = walk.by_ref().collect::<crate::error::Result<_>>()?;
                index.save(path)?;
                index.len()
            }
            None => {
                let stdout = std::io::stdout();
                stream_records(walk.by_ref(), stdout.lock(), Path::new("<stdout>"))?
            }
        };

        let failures = walk.into_failures();
        info!(
            "Indexed {written} photos under {} in {}",
            root.display(),
            humantime::format_duration(rounded(started.elapsed()))
        );
        if !failures.is_empty() {
            for failure in &failures {
                error!("{}", error_chain(failure));
            }
            eyre::bail!("{} files could not be indexed", failures.len());
        }
        Ok(())
    }
}

/// Keys are derived from the path string, so resolve the root the same way
/// every run. A root that cannot be resolved is left for the builder to
/// reject.
pub(crate) fn canonical_root(from: &Path) -> PathBuf {
    dunce::canonicalize(from).unwrap_or_else(|_| from.to_path_buf())
}

pub(crate) fn rounded(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

fn error_chain(error: &crate::error::Error) -> String {
    std::iter::successors(Some(error as &dyn std::error::Error), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

impl ToArgs for BuildIndexArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--from".into(), self.from.clone().into()];
        if let Some(output) = &self.output {
            args.push("--output".into());
            args.push(output.into());
        }
        if self.keep_going {
            args.push("--keep-going".into());
        }
        args
    }
}
