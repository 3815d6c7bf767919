use crate::cli::json_log_behaviour::JsonLogBehaviour;
use std::fs::File;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber.
///
/// Everything is written to stderr so an index streamed to stdout stays clean.
/// `RUST_LOG` directives take precedence over `level`.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init_tracing(level: Level, json_log_behaviour: JsonLogBehaviour) -> eyre::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let plain = (!matches!(json_log_behaviour, JsonLogBehaviour::Stderr)).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });
    let json_stderr = matches!(json_log_behaviour, JsonLogBehaviour::Stderr)
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let json_file = match &json_log_behaviour {
        JsonLogBehaviour::File(path) => {
            let file = File::create(path)
                .map_err(|e| eyre::eyre!("Failed to create log file {}: {}", path.display(), e))?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        JsonLogBehaviour::None | JsonLogBehaviour::Stderr => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(plain)
        .with(json_stderr)
        .with(json_file)
        .try_init()?;
    Ok(())
}
