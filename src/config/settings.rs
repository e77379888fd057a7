use serde::Deserialize;

use crate::scheduler::SchedulerKind;

/// Top-level configuration for a host embedding the registry.
///
/// Includes settings for logging and for the deferred-task scheduler.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub scheduler: SchedulerSettings,
}

/// Configuration settings for logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration settings for the scheduler that runs deferred deliveries.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub kind: SchedulerKind,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub logging: Option<PartialLoggingSettings>,
    pub scheduler: Option<PartialSchedulerSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSchedulerSettings {
    pub kind: Option<SchedulerKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings {
                level: "info".to_string(),
            },
            scheduler: SchedulerSettings {
                kind: SchedulerKind::Queue,
            },
        }
    }
}
