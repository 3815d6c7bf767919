use crate::app_home::APP_HOME;
use crate::cli::arbitrary_values::arbitrary_optional_path;
use crate::cli::to_args::ToArgs;
use crate::database::Database;
use crate::database::UNDATED;
use crate::database_path::DatabasePath;
use arbitrary::Arbitrary;
use chrono::Month;
use clap::Args;
use clap::ValueEnum;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(ValueEnum, Arbitrary, Clone, Copy, Default, PartialEq, Debug)]
pub enum OutputFormat {
    #[default]
    Auto,
    Json,
    Pretty,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Print the database
#[derive(Args, Arbitrary, Clone, Default, PartialEq, Debug)]
pub struct ShowArgs {
    /// Database file (defaults to the configured database path)
    #[clap(long, value_name = "FILE")]
    #[arbitrary(with = arbitrary_optional_path)]
    pub database: Option<PathBuf>,

    /// Output mode: auto|json|pretty
    #[clap(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,
}

impl ShowArgs {
    /// # Errors
    ///
    /// Returns an error if there is no readable database.
    pub fn invoke(self) -> eyre::Result<()> {
        let path = DatabasePath::resolve(self.database, &APP_HOME)?;
        let db = Database::load(&path)?;
        let output = match self.output {
            OutputFormat::Auto => {
                if atty::is(atty::Stream::Stdout) {
                    OutputFormat::Pretty
                } else {
                    OutputFormat::Json
                }
            }
            other => other,
        };
        output.print(&db)
    }
}

impl OutputFormat {
    fn print(self, db: &Database) -> eyre::Result<()> {
        match self {
            OutputFormat::Json => println!("{}", db.to_json_pretty()?),
            OutputFormat::Pretty | OutputFormat::Auto => print!("{}", Summary(db)),
        }
        Ok(())
    }
}

/// Title, provenance and label counts. Years come first, then months in
/// calendar order, then anything else.
#[derive(Debug)]
pub struct Summary<'a>(pub &'a Database);

impl std::fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let db = self.0;
        writeln!(f, "{}", db.title)?;
        writeln!(f, "  created  {}", db.created)?;
        writeln!(f, "  file     {}", db.filepath)?;
        writeln!(f, "  index    {}", db.index)?;
        writeln!(f, "  photos   {}", db.ids.len())?;

        let mut labels: Vec<_> = db.labels.iter().collect();
        labels.sort_by_key(|(label, _)| label_rank(label));
        for (label, ids) in labels {
            writeln!(f, "  {label:<10} {}", ids.len())?;
        }
        Ok(())
    }
}

fn label_rank(label: &str) -> (u8, u32, String) {
    if let Ok(year) = label.parse::<u32>() {
        (0, year, String::new())
    } else if let Ok(month) = label.parse::<Month>() {
        (1, month.number_from_month(), String::new())
    } else if label == UNDATED {
        (3, 0, String::new())
    } else {
        (2, 0, label.to_string())
    }
}

impl ToArgs for ShowArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(database) = &self.database {
            args.push("--database".into());
            args.push(database.into());
        }
        if self.output != OutputFormat::Auto {
            args.push("--output".into());
            args.push(self.output.to_string().into());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Record;
    use std::path::Path;

    #[test]
    fn summary_orders_years_months_then_undated() {
        let mut db = Database::new("Family", Path::new("db.json"), Path::new("index.csv"));
        for (key, datetime) in [
            ("a", "2011:12:01 00:00:00"),
            ("b", "2004:04:25 02:20:24"),
            ("c", "NONE"),
        ] {
            db.process_record(&Record {
                key: key.to_string(),
                filepath: format!("/{key}.jpg"),
                thumbpath: format!("/thumbs/{key}_thumb.jpg"),
                datetime: datetime.to_string(),
            });
        }

        let text = Summary(&db).to_string();
        let labels: Vec<&str> = text
            .lines()
            .skip(5)
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(labels, ["2004", "2011", "April", "December", UNDATED]);
        assert!(text.starts_with("Family\n"));
        assert!(text.contains("  photos   3\n"));
    }
}
