use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Directory holding `database_path.txt` and, unless configured otherwise,
/// the database itself.
#[derive(Clone, Debug)]
pub struct AppHome(pub PathBuf);

impl AppHome {
    pub const ENV_VAR: &'static str = "PICTURES_CONFIG_DIR";

    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    /// `$PICTURES_CONFIG_DIR` when set and non-empty, else the platform config
    /// directory for `pictures`.
    #[must_use]
    pub fn resolve() -> Option<AppHome> {
        env::var_os(Self::ENV_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                ProjectDirs::from("", "", "pictures").map(|dirs| dirs.config_dir().to_path_buf())
            })
            .map(AppHome)
    }
}

pub static APP_HOME: Lazy<AppHome> = Lazy::new(|| {
    AppHome::resolve().unwrap_or_else(|| {
        warn!("No config directory for this platform, using ./.pictures");
        AppHome(PathBuf::from(".pictures"))
    })
});
