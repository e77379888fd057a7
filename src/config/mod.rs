mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, SchedulerSettings, Settings};

/// Prefix for environment overrides, e.g. `TICKSUB_SCHEDULER_KIND=local`.
pub const ENV_PREFIX: &str = "TICKSUB";

/// Loads the configuration from `.env`, the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the logging and scheduler configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        logging: LoggingSettings {
            level: partial
                .logging
                .and_then(|l| l.level)
                .unwrap_or(default.logging.level),
        },
        scheduler: SchedulerSettings {
            kind: partial
                .scheduler
                .and_then(|s| s.kind)
                .unwrap_or(default.scheduler.kind),
        },
    })
}

#[cfg(test)]
mod tests;
