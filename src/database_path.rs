use crate::app_home::AppHome;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Where the database lives when no `--database` is given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabasePath(pub PathBuf);

impl DatabasePath {
    /// File name of the default database inside the app home.
    pub const DEFAULT_FILE_NAME: &'static str = "pictures.json";
    const FILE_NAME: &'static str = "database_path.txt";
    const ENV_VAR: &'static str = "PICTURES_DATABASE";

    /// The database path used when nothing has been configured.
    #[must_use]
    pub fn default_for(home: &AppHome) -> DatabasePath {
        DatabasePath(home.file_path(Self::DEFAULT_FILE_NAME))
    }

    /// Loads resolving rules:
    /// 1. If $`PICTURES_DATABASE` is set -> use it (and DO NOT create file)
    /// 2. Otherwise, look for `${config_dir}/database_path.txt`
    ///    - if file exists and is not blank, use its trimmed contents
    ///    - otherwise, create the file containing the default and return default
    ///
    /// # Errors
    ///
    /// Returns an error if reading or creating the config file fails.
    pub fn load(home: &AppHome) -> eyre::Result<DatabasePath> {
        // 1. Env var
        if let Ok(envv) = env::var(Self::ENV_VAR)
            && !envv.trim().is_empty()
        {
            return Ok(DatabasePath(PathBuf::from(envv.trim())));
        }

        // 2. Config file
        let path = Self::config_file_path(home);
        if path.exists() {
            let s = fs::read_to_string(&path)?.trim().to_string();
            if !s.is_empty() {
                return Ok(DatabasePath(PathBuf::from(s)));
            }
        }

        // create containing default
        let default = Self::default_for(home);
        Self::write(home, &default.0)?;
        Ok(default)
    }

    /// An explicit `--database` wins; otherwise fall back to [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default cannot be resolved.
    pub fn resolve(explicit: Option<PathBuf>, home: &AppHome) -> eyre::Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path),
            None => Ok(Self::load(home)?.0),
        }
    }

    /// Returns the path the config file should live at
    #[must_use]
    pub fn config_file_path(home: &AppHome) -> PathBuf {
        home.file_path(Self::FILE_NAME)
    }

    /// Persist a new default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn set_to(home: &AppHome, database: &std::path::Path) -> eyre::Result<()> {
        Self::write(home, database)
    }

    /// Point the default back at `pictures.json` in the app home.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn reset(home: &AppHome) -> eyre::Result<DatabasePath> {
        let default = Self::default_for(home);
        Self::write(home, &default.0)?;
        Ok(default)
    }

    fn write(home: &AppHome, database: &std::path::Path) -> eyre::Result<()> {
        fs::create_dir_all(&home.0)?;
        let mut f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(Self::config_file_path(home))?;
        f.write_all(database.to_string_lossy().as_bytes())?;
        f.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }
}
