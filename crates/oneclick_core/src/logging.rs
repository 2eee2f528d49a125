//! Logger setup

use crate::config::LogConfig;

/// Install the global logger
///
/// `RUST_LOG` still takes precedence over the configured level. Returns
/// `false` when a logger was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    let level = config.level_filter();
    let installed = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str().to_lowercase()),
    )
    .format_target(false)
    .try_init()
    .is_ok();

    if installed {
        log::debug!("Logging initialised at {}", level);
    }
    installed
}
