use crate::log::{Level, Logger};
use serde::{Deserialize, Serialize};

///
/// Defaults
///

mod defaults {
    use crate::log::Level;

    pub const fn enabled() -> bool {
        true
    }

    pub const fn level() -> Level {
        Level::Info
    }
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    #[serde(default = "defaults::level")]
    pub level: Level,
}

impl LogConfig {
    #[must_use]
    pub const fn logger(&self) -> Logger {
        if self.enabled {
            Logger::new(self.level)
        } else {
            Logger::silent()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            level: defaults::level(),
        }
    }
}
