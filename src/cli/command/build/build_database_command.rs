use crate::app_home::APP_HOME;
use crate::cli::arbitrary_values::arbitrary_optional_path;
use crate::cli::arbitrary_values::arbitrary_optional_title;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::command::build::build_index_command::canonical_root;
use crate::cli::command::build::build_index_command::rounded;
use crate::cli::to_args::ToArgs;
use crate::database::Database;
use crate::database_path::DatabasePath;
use crate::index::Index;
use crate::index::IndexBuilder;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Merge an index (or a freshly indexed directory) into the database
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct BuildDatabaseArgs {
    /// Index CSV to merge, or a photo directory to index first
    #[clap(long, value_name = "PATH")]
    #[arbitrary(with = arbitrary_path)]
    pub from: PathBuf,

    /// Database file (defaults to the configured database path)
    #[clap(long, value_name = "FILE")]
    #[arbitrary(with = arbitrary_optional_path)]
    pub database: Option<PathBuf>,

    /// Set the database title
    #[clap(long)]
    #[arbitrary(with = arbitrary_optional_title)]
    pub title: Option<String>,
}

impl BuildDatabaseArgs {
    /// # Errors
    ///
    /// Returns an error if the database is corrupt, the index cannot be read
    /// or built, or the database cannot be saved.
    pub fn invoke(self) -> eyre::Result<()> {
        let started = Instant::now();
        let database = DatabasePath::resolve(self.database, &APP_HOME)?;

        // Load before touching the source so a corrupt database fails fast.
        let mut db = Database::load_or_init(&database, &self.from)?;
        if let Some(title) = self.title {
            db.title = title;
        }

        let index = if self.from.is_dir() {
            IndexBuilder::new(canonical_root(&self.from)).build()?
        } else {
            Index::load(&self.from)?
        };
        let known = db.ids.len();
        db.process_records(&index);
        db.save()?;

        info!(
            "Merged {} records ({} new) into {} in {}",
            index.len(),
            db.ids.len() - known,
            database.display(),
            humantime::format_duration(rounded(started.elapsed()))
        );
        Ok(())
    }
}

impl ToArgs for BuildDatabaseArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--from".into(), self.from.clone().into()];
        if let Some(database) = &self.database {
            args.push("--database".into());
            args.push(database.into());
        }
        if let Some(title) = &self.title {
            args.push("--title".into());
            args.push(title.into());
        }
        args
    }
}
